//! Mealcart CLI - Build grocery lists from dish names
//!
//! # Main Commands
//!
//! ```bash
//! mealcart resolve "spaghetti bolognese" --servings 4
//! mealcart combine "chicken curry:2" "caesar salad"
//! mealcart combine --file requests.json
//! mealcart alias add "Spaghetti Bolognese" "spag bol" "bolognese"
//! mealcart alias list
//! mealcart dishes --limit 20
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! mealcart parse "500g ground beef; 2 large onions, garlic"
//! mealcart standardize milk "2 cups"
//! ```
//!
//! Results are printed as JSON on stdout; progress goes to stderr.

use clap::{Parser, Subcommand};
use mealcart::logs::{log_info, log_success, log_warning};
use mealcart::{
    parse_ingredients, standardize, AggregationPipeline, AiClient, AliasStore, AppConfig,
    AppError, DishCache, DishRequest, DishResolver, JsonAliasStore,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mealcart")]
#[command(about = "Build a consolidated grocery list from dish names", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one dish to its ingredients
    Resolve {
        /// Dish name
        dish: String,

        /// Number of servings
        #[arg(short, long, default_value = "1")]
        servings: u32,
    },

    /// Combine several dishes into one grocery list
    Combine {
        /// Dishes as `name` or `name:servings`
        dishes: Vec<String>,

        /// JSON file with an array of `{ "name", "servings" }` requests
        #[arg(short, long, conflicts_with = "dishes")]
        file: Option<PathBuf>,
    },

    /// Manage dish aliases
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// List cached dish names
    Dishes {
        /// Maximum number of names to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Parse a raw ingredient list
    Parse {
        /// Raw ingredient text
        raw: String,
    },

    /// Convert one quantity to metric/count form
    Standardize {
        /// Ingredient name
        name: String,
        /// Quantity text
        quantity: String,
    },
}

#[derive(Subcommand)]
enum AliasAction {
    /// Map user terms to a canonical dish name
    Add {
        /// Canonical dish name
        dish: String,
        /// Terms to map
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// List stored aliases
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve { dish, servings } => cmd_resolve(&dish, servings).await,
        Commands::Combine { dishes, file } => cmd_combine(dishes, file.as_deref()).await,
        Commands::Alias { action } => cmd_alias(action),
        Commands::Dishes { limit } => cmd_dishes(limit),
        Commands::Parse { raw } => print_json(&parse_ingredients(&raw)),
        Commands::Standardize { name, quantity } => {
            println!("{}", standardize(&name, &quantity));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the dish cache, or an empty one if the file does not exist yet.
fn load_cache(config: &AppConfig) -> Result<DishCache, AppError> {
    let path = &config.dish_cache_path;
    if !path.exists() {
        log_warning(format!("Dish cache not found at {}, starting empty", path.display()));
        return Ok(DishCache::new());
    }
    let cache = DishCache::load(path)?;
    log_success(format!("Loaded {} dishes from {}", cache.len(), path.display()));
    Ok(cache)
}

fn build_resolver(config: &AppConfig) -> Result<DishResolver, AppError> {
    let cache = load_cache(config)?;
    let aliases: Arc<dyn AliasStore> = Arc::new(JsonAliasStore::open(&config.alias_store_path)?);

    let resolver = DishResolver::new(cache, aliases).with_suggestion_count(config.suggestion_count);
    match AiClient::from_config(config) {
        Some(client) => Ok(resolver.with_suggester(Arc::new(client))),
        None => {
            log_info("ANTHROPIC_API_KEY not set, generated ingredients disabled");
            Ok(resolver)
        }
    }
}

async fn cmd_resolve(dish: &str, servings: u32) -> CliResult {
    let config = AppConfig::from_env()?;
    let resolver = build_resolver(&config)?;

    let result = resolver.resolve(dish, servings.max(1)).await;
    print_json(&result)
}

async fn cmd_combine(dishes: Vec<String>, file: Option<&Path>) -> CliResult {
    let requests: Vec<DishRequest> = match file {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        }
        None => dishes.iter().map(|d| DishRequest::from_arg(d)).collect(),
    };
    if requests.is_empty() {
        return Err(AppError::BadRequest("no dishes given".to_string()).into());
    }

    let config = AppConfig::from_env()?;
    let pipeline = AggregationPipeline::new(Arc::new(build_resolver(&config)?));

    let result = pipeline.combine_dishes(&requests).await;
    print_json(&result)
}

fn cmd_alias(action: AliasAction) -> CliResult {
    let config = AppConfig::from_env()?;

    match action {
        AliasAction::Add { dish, terms } => {
            let cache = load_cache(&config)?;
            if !cache.contains(&dish) {
                log_warning(format!("\"{}\" is not in the dish cache", dish));
            }
            let aliases: Arc<dyn AliasStore> =
                Arc::new(JsonAliasStore::open(&config.alias_store_path)?);
            let resolver = DishResolver::new(cache, aliases);

            if !resolver.add_dish_mapping(&dish, &terms) {
                return Err(AppError::BadRequest(format!("could not map terms to \"{}\"", dish)).into());
            }
            eprintln!("💾 Aliases saved to: {}", config.alias_store_path.display());
        }

        AliasAction::List => {
            let store = JsonAliasStore::open(&config.alias_store_path)?;
            let aliases = store.list()?;
            if aliases.is_empty() {
                eprintln!("📋 No aliases stored yet.");
                eprintln!("   Use 'mealcart alias add <dish> <terms>...' to add some.");
            }
            print_json(&aliases)?;
        }
    }

    Ok(())
}

fn cmd_dishes(limit: Option<usize>) -> CliResult {
    let config = AppConfig::from_env()?;
    let cache = load_cache(&config)?;
    print_json(&cache.names(limit.unwrap_or(cache.len())))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
