mod favorites;
mod search;

use anyhow::Context;
use bizsearch_core::{AppConfig, SortDirection, SortField, DISTANCE_DEFAULT, DISTANCE_MILES_MAX};
use bizsearch_db::SqliteFavoritesStore;
use bizsearch_graphql::{GraphqlClient, HttpCategorySource};
use bizsearch_session::{SearchSession, SessionSettings};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::favorites::FavoritesCommands;

#[derive(Debug, Parser)]
#[command(name = "bizsearch")]
#[command(about = "Search local businesses by zip code, distance and category")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search businesses around a zip code
    Search {
        /// Five-digit or ZIP+4 code to search around
        #[arg(long)]
        zip: String,
        /// Search radius in miles
        #[arg(
            long,
            default_value_t = DISTANCE_DEFAULT,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(DISTANCE_MILES_MAX))
        )]
        miles: u32,
        /// Category title; must name exactly one category
        #[arg(long, conflicts_with = "any_category")]
        category: Option<String>,
        /// Search across all categories instead of the default one
        #[arg(long)]
        any_category: bool,
        /// Sort field: distance, name, location or favorite
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort direction: asc or desc
        #[arg(long)]
        dir: Option<SortDirection>,
        /// Result page, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Suggest categories whose title starts with a prefix
    Categories {
        prefix: String,
    },
    /// Manage favorite businesses
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check database connectivity
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = bizsearch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(command) = cli.command else {
        println!("no command given; run `bizsearch --help` for usage");
        return Ok(());
    };

    match command {
        Commands::Search {
            zip,
            miles,
            category,
            any_category,
            sort,
            dir,
            page,
        } => {
            let mut session = build_session(&config).await?;
            let args = search::SearchArgs {
                zip: &zip,
                miles,
                category: category.as_deref(),
                any_category,
                sort,
                dir,
                page,
            };
            search::run_search(&mut session, &args).await
        }
        Commands::Categories { prefix } => {
            let mut session = build_session(&config).await?;
            search::run_categories(&mut session, &prefix).await
        }
        Commands::Favorites { command } => favorites::run(&config, command).await,
        Commands::Db { command } => run_db(&config, command).await,
    }
}

pub(crate) type CliSession = SearchSession<GraphqlClient, HttpCategorySource, SqliteFavoritesStore>;

/// Opens the favorites database, applying migrations.
pub(crate) async fn open_pool(config: &AppConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool_config = bizsearch_db::PoolConfig::from_app_config(config);
    let pool = bizsearch_db::connect_pool(&config.database_url, pool_config)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    bizsearch_db::run_migrations(&pool).await?;
    Ok(pool)
}

/// Network commands cannot run without credentials for the directory.
pub(crate) fn require_api_key(config: &AppConfig) -> anyhow::Result<&str> {
    config
        .api_key
        .as_deref()
        .context("BIZSEARCH_API_KEY must be set for commands that query the directory")
}

/// Wires the directory client, category source and favorites store into a
/// session. Nothing is fetched yet.
pub(crate) async fn build_session(config: &AppConfig) -> anyhow::Result<CliSession> {
    let api_key = require_api_key(config)?;
    let client = GraphqlClient::new(
        &config.graphql_url,
        Some(api_key),
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let categories = HttpCategorySource::new(
        &config.categories_url,
        Some(api_key),
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let store = SqliteFavoritesStore::new(open_pool(config).await?);
    Ok(SearchSession::new(
        client,
        categories,
        store,
        SessionSettings::from_app_config(config),
    ))
}

async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool_config = bizsearch_db::PoolConfig::from_app_config(config);
    let pool = bizsearch_db::connect_pool(&config.database_url, pool_config).await?;
    match command {
        DbCommands::Migrate => {
            let applied = bizsearch_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            bizsearch_db::ping(&pool).await?;
            println!("database reachable at {}", config.database_url);
        }
    }
    Ok(())
}
