//! `favorites` command handlers.
//!
//! `list`, `add` and `remove` only touch the local database. `toggle` goes
//! through the session so the favorites set is resynced afterwards, and
//! `show` fetches the favorited businesses from the directory.

use bizsearch_core::{AppConfig, SortDirection, SortField};
use clap::Subcommand;

use crate::{build_session, open_pool, search};

/// Sub-commands available under `favorites`.
#[derive(Debug, Subcommand)]
pub enum FavoritesCommands {
    /// List favorited business ids
    List,
    /// Mark a business as a favorite
    Add { business_id: String },
    /// Remove a business from favorites
    Remove { business_id: String },
    /// Flip the favorite flag of a business
    Toggle { business_id: String },
    /// Fetch and display every favorited business
    Show {
        /// Sort field: distance, name, location or favorite
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort direction: asc or desc
        #[arg(long)]
        dir: Option<SortDirection>,
    },
}

pub(crate) async fn run(config: &AppConfig, command: FavoritesCommands) -> anyhow::Result<()> {
    match command {
        FavoritesCommands::List => {
            let pool = open_pool(config).await?;
            let rows = bizsearch_db::list_favorites(&pool).await?;
            if rows.is_empty() {
                println!("no favorites saved");
                return Ok(());
            }
            println!("{:<26}BUSINESS ID", "ADDED");
            for row in &rows {
                println!(
                    "{:<26}{}",
                    row.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    row.business_id
                );
            }
        }
        FavoritesCommands::Add { business_id } => {
            let pool = open_pool(config).await?;
            if bizsearch_db::put_favorite(&pool, &business_id).await? {
                println!("added {business_id} to favorites");
            } else {
                println!("{business_id} is already a favorite");
            }
        }
        FavoritesCommands::Remove { business_id } => {
            let pool = open_pool(config).await?;
            if bizsearch_db::delete_favorite(&pool, &business_id).await? {
                println!("removed {business_id} from favorites");
            } else {
                println!("{business_id} was not a favorite");
            }
        }
        FavoritesCommands::Toggle { business_id } => {
            let mut session = build_session(config).await?;
            session.reload_favorites().await?;
            if session.toggle_favorite(&business_id).await? {
                println!("{business_id} is now a favorite");
            } else {
                println!("{business_id} is no longer a favorite");
            }
        }
        FavoritesCommands::Show { sort, dir } => {
            let mut session = build_session(config).await?;
            search::run_show_favorites(&mut session, sort, dir).await?;
        }
    }
    Ok(())
}
