use anyhow::Context;
use clap::Parser;
use finder::{
    cli::{
        commands::{self, TagArgs},
        Cli, Commands,
    },
    DatasetStore, SearchEngine, Settings,
};
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::from_env()?,
    };
    settings.validate()?;

    let mut store = DatasetStore::from_settings(&settings)?;
    info!("Dataset source: {}", store.source());

    if let Commands::Refresh = cli.command {
        store.invalidate().context("Failed to clear cached dataset")?;
    }

    let loaded = store.load().await;
    let dataset = match loaded {
        Ok(dataset) => dataset,
        Err(e) => anyhow::bail!(
            "Failed to load recipes from {}: {}",
            store.source(),
            e.log_safe()
        ),
    };
    let mut engine = SearchEngine::new(dataset);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search {
            query,
            ingredients,
            appliances,
            utensils,
        } => {
            let tags = TagArgs {
                ingredients,
                appliances,
                utensils,
            };
            commands::search(&mut engine, query.as_deref(), &tags, &mut out)?;
        }
        Commands::Facets { facet, filter } => {
            commands::facets(&engine, facet, filter.as_deref(), &mut out)?;
        }
        Commands::Shell => {
            let stdin = io::stdin();
            commands::shell(&mut engine, stdin.lock(), &mut out)?;
        }
        Commands::Refresh => {
            use std::io::Write;
            writeln!(
                out,
                "\x1b[32m\u{2713}\x1b[0m Reloaded {} recipes",
                engine.dataset().len()
            )?;
        }
    }

    Ok(())
}
