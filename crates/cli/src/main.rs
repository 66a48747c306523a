//! # shopper-cli
//!
//! This is the main entry point for the `shopper` command-line interface.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use shopper::{NewIngredient, NewItem, NewRecipe, NewStore};
use shopper_cli::{render, ApiClient, DEFAULT_BASE_URL};
use std::fs::File;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the shopper API
    #[arg(long, env = "SHOPPER_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the server is up
    Health,
    /// List or add stores
    Stores {
        #[command(subcommand)]
        command: StoreCommands,
    },
    /// List or add items
    Items {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// List or add recipes
    Recipes {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Find the cheapest store stocking every ingredient of a recipe
    Cheapest {
        /// The recipe ID
        recipe_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum StoreCommands {
    List,
    Add(AddStoreArgs),
}

#[derive(Args, Debug)]
struct AddStoreArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    location: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ItemCommands {
    List,
    Add(AddItemArgs),
}

#[derive(Args, Debug)]
struct AddItemArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    unit: String,
    /// ID of the store selling the item
    #[arg(long)]
    store_id: String,
}

#[derive(Subcommand, Debug)]
enum RecipeCommands {
    List,
    Add(AddRecipeArgs),
}

#[derive(Args, Debug)]
struct AddRecipeArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
    /// An ingredient as `NAME:QUANTITY:UNIT`; repeat for more
    #[arg(long = "ingredient", value_parser = parse_ingredient)]
    ingredients: Vec<NewIngredient>,
}

fn parse_ingredient(raw: &str) -> Result<NewIngredient> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(unit), Some(quantity), Some(item_name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(anyhow!("expected NAME:QUANTITY:UNIT, got '{raw}'"));
    };
    let quantity: f64 = quantity
        .trim()
        .parse()
        .map_err(|e| anyhow!("invalid quantity '{quantity}': {e}"))?;
    Ok(NewIngredient {
        item_name: item_name.trim().to_string(),
        quantity,
        unit: unit.trim().to_string(),
    })
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging to a file
    let log_file = File::create("shopper-cli.log")?;
    let subscriber = fmt::Subscriber::builder()
        .with_writer(log_file)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let client = ApiClient::new(cli.base_url);
    info!("Using API at {}", client.base_url());

    let output = match cli.command {
        Commands::Health => {
            let health = client.health_check().await?;
            format!("{}: {}\n", health.status, health.message)
        }
        Commands::Stores { command } => match command {
            StoreCommands::List => render::stores(&client.get_stores().await?),
            StoreCommands::Add(args) => {
                let new_store = NewStore {
                    name: args.name,
                    location: args.location,
                };
                render::store(&client.create_store(&new_store).await?)
            }
        },
        Commands::Items { command } => match command {
            ItemCommands::List => render::items(&client.get_items().await?),
            ItemCommands::Add(args) => {
                let new_item = NewItem {
                    name: args.name,
                    price: args.price,
                    unit: args.unit,
                    store_id: args.store_id,
                };
                render::item(&client.create_item(&new_item).await?)
            }
        },
        Commands::Recipes { command } => match command {
            RecipeCommands::List => render::recipes(&client.get_recipes().await?),
            RecipeCommands::Add(args) => {
                let new_recipe = NewRecipe {
                    name: args.name,
                    description: args.description,
                    ingredients: args.ingredients,
                };
                render::recipe(&client.create_recipe(&new_recipe).await?)
            }
        },
        Commands::Cheapest { recipe_id } => {
            render::cheapest_store(&client.find_cheapest_store(&recipe_id).await?)
        }
    };

    print!("{output}");
    Ok(())
}
