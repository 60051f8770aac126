use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::error;

use pantry_chef::{parse_recipe_file, server, AppConfig, RecipeFileIngestor, SqliteStore};

#[derive(Parser)]
#[command(name = "pantry-chef", version, about = "Recipe and pantry service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Parse a recipe file and store its recipes in the configured database
    Ingest {
        /// Plain-text recipe file
        path: PathBuf,
    },
    /// Parse a recipe file and print the recipes as JSON without storing them
    Parse {
        /// Plain-text recipe file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli.command.unwrap_or(Command::Serve)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} ({})", e, e.category());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> pantry_chef::Result<()> {
    match command {
        Command::Serve => server::serve(AppConfig::load()?).await,
        Command::Ingest { path } => {
            let config = AppConfig::load()?;
            let store = SqliteStore::open(&config.database.path)?;
            let report = RecipeFileIngestor::new(Arc::new(store)).ingest(&path).await?;
            println!("Successfully parsed and saved {} recipes", report.count);
            Ok(())
        }
        Command::Parse { path } => {
            let recipes = parse_recipe_file(&path).await?;
            println!("{}", serde_json::to_string_pretty(&recipes)?);
            Ok(())
        }
    }
}
