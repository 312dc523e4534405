mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use smartchef_core::ai::AiConfig;
use smartchef_core::{
    Favorites, IngredientList, JsonFileStore, NoticeKind, RecipeGenerator, Session,
    DEFAULT_DIETARY_PREFERENCE, DIETARY_OPTIONS,
};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "smartchef")]
#[command(about = "Recipe ideas from the ingredients you have", long_about = None)]
struct Cli {
    /// Favorites file (default: ~/.smartchef/smartchef-favorites.json)
    #[arg(long, global = true, env = "SMARTCHEF_FAVORITES_PATH")]
    favorites_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate recipes from ingredients
    Generate {
        /// Ingredient you have (repeat for more)
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,
        /// Dietary preference (see `smartchef diets`)
        #[arg(short, long, default_value = DEFAULT_DIETARY_PREFERENCE)]
        diet: String,
        /// Ask for one creative surprise recipe instead of three
        #[arg(long)]
        surprise: bool,
        /// Skip the remote model and use the offline generator
        #[arg(long)]
        offline: bool,
        /// Model name override
        #[arg(long)]
        model: Option<String>,
        /// Add the Nth generated recipe (1-based) to favorites
        #[arg(long = "favorite")]
        favorites: Vec<usize>,
        /// Print recipes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage favorite recipes
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// List the dietary preferences on offer
    Diets,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    List {
        /// Print favorites as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one favorite in full
    Show { id: String },
    /// Remove a favorite
    Remove { id: String },
    /// Remove all favorites
    Clear,
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store = match cli.favorites_path {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::from_env(),
    };

    match cli.command {
        Commands::Generate {
            ingredients,
            diet,
            surprise,
            offline,
            model,
            favorites,
            json,
        } => {
            let mut config = AiConfig::from_env().context("Invalid AI configuration")?;
            config.offline |= offline;
            if let Some(model) = model {
                config.model = model;
            }

            let generator = RecipeGenerator::from_config(&config)?;
            let session = Session::new(generator, Favorites::load(store));
            generate(&session, ingredients, diet, surprise, &favorites, json).await?;
        }
        Commands::Favorites { action } => {
            favorites_command(Favorites::load(store), action)?;
        }
        Commands::Diets => {
            for option in DIETARY_OPTIONS {
                println!("{}", option);
            }
        }
    }

    Ok(())
}

async fn generate(
    session: &Session<JsonFileStore>,
    ingredients: Vec<String>,
    diet: String,
    surprise: bool,
    favorite_indexes: &[usize],
    json: bool,
) -> Result<()> {
    if !DIETARY_OPTIONS.contains(&diet.as_str()) {
        tracing::warn!(diet = %diet, "Unlisted dietary preference, passing it through");
    }

    let Some(request) = ingredients
        .iter()
        .collect::<IngredientList>()
        .into_request(diet, surprise)
    else {
        bail!("Enter at least one ingredient");
    };

    let notice = session.generate(&request).await?;
    let recipes = session.recipes();

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
    } else {
        render::print_recipes(&recipes, session.last_fallback().as_ref());
        println!("{}", notice.message);
    }

    for &n in favorite_indexes {
        let Some(recipe) = n.checked_sub(1).and_then(|i| recipes.get(i)) else {
            bail!("No recipe number {} (got {})", n, recipes.len());
        };
        if session.is_favorite(recipe) {
            continue;
        }
        let notice = session.toggle_favorite(recipe);
        if notice.kind == NoticeKind::Error {
            bail!("{}", notice.message);
        }
        eprintln!("{}: {}", recipe.name, notice.message);
    }

    Ok(())
}

fn favorites_command(
    mut favorites: Favorites<JsonFileStore>,
    action: FavoritesAction,
) -> Result<()> {
    match action {
        FavoritesAction::List { json } => {
            let recipes: Vec<_> = favorites.set().iter().cloned().collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&recipes)?);
            } else if recipes.is_empty() {
                println!("No favorites yet");
            } else {
                render::print_summary(&recipes);
            }
        }
        FavoritesAction::Show { id } => match favorites.set().get(&id) {
            Some(recipe) => println!("{}", smartchef_core::format_recipe(recipe)),
            None => bail!("No favorite with id {}", id),
        },
        FavoritesAction::Remove { id } => {
            if favorites.remove(&id)?.is_none() {
                bail!("No favorite with id {}", id);
            }
            println!("Removed from favorites");
        }
        FavoritesAction::Clear => {
            favorites.clear()?;
            println!("Cleared favorites in {}", favorites.store().path().display());
        }
    }

    Ok(())
}
