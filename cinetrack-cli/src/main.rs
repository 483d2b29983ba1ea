//! # Cinetrack
//!
//! Console film progress tracker: register an account, track your way
//! through a fixed sci-fi catalog, rate and annotate what you watch, and
//! see how other trackers are doing per film.
//!
//! All business rules live in `cinetrack-core`; this binary only drives
//! menus and formats output.

mod menu;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinetrack_core::{TrackingService, database::PostgresDatabase};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinetrack")]
#[command(about = "Console film progress tracker backed by PostgreSQL")]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Skip running schema migrations on startup
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinetrack=info,cinetrack_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let database = PostgresDatabase::new(&cli.database_url)
        .await
        .context("failed to connect to the database")?;

    if !cli.skip_migrations {
        database
            .initialize_schema()
            .await
            .context("failed to run migrations")?;
        info!("Schema ready");
    }

    let accounts = Arc::new(database.accounts_repository().clone());
    let service = TrackingService::new(
        accounts.clone(),
        Arc::new(database.films_repository().clone()),
        Arc::new(database.progress_repository().clone()),
    );

    menu::run(menu::MenuContext { service, accounts }).await
}
