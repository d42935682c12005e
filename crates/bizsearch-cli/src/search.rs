//! `search` and `categories` command handlers.

use bizsearch_core::{meters_to_miles, BusinessRecord, FetchMode, SortDirection, SortField};
use bizsearch_session::{FetchOutcome, ResultsView};

use crate::CliSession;

/// Parsed `search` arguments.
#[derive(Debug)]
pub(crate) struct SearchArgs<'a> {
    pub zip: &'a str,
    pub miles: u32,
    pub category: Option<&'a str>,
    pub any_category: bool,
    pub sort: Option<SortField>,
    pub dir: Option<SortDirection>,
    pub page: u32,
}

/// Run a filtered search and print one page of results.
///
/// # Errors
///
/// Returns an error if the zip code is incomplete, the category text does
/// not name exactly one category, or any of the loads or the search fail.
pub(crate) async fn run_search(session: &mut CliSession, args: &SearchArgs<'_>) -> anyhow::Result<()> {
    if !session.edit_zip(args.zip) || !session.can_submit() {
        anyhow::bail!("'{}' is not a complete zip code (expected 12345 or 12345-6789)", args.zip);
    }
    session.set_distance_miles(args.miles);

    session.load_data().await?;

    if args.any_category {
        session.type_category("")?;
    } else if let Some(text) = args.category {
        let Some(category) = session.find_single_category(text)? else {
            let suggestions = session.search_categories(text)?;
            if suggestions.is_empty() {
                anyhow::bail!("no category matches '{text}'");
            }
            let titles: Vec<&str> = suggestions.iter().map(|c| c.title.as_str()).collect();
            anyhow::bail!(
                "'{text}' does not name a single category; did you mean: {}",
                titles.join(", ")
            );
        };
        session.select_category(category);
    }

    let field = args.sort.unwrap_or(session.filters().sort_field);
    let direction = args.dir.unwrap_or(session.filters().sort_direction);
    session.set_sort(field, direction);

    let page_size = session.settings().page_size;
    let offset = (args.page - 1).saturating_mul(page_size);
    tracing::debug!(zip = args.zip, miles = args.miles, offset, "running search");
    session.fetch_results(FetchMode::Search, offset).await?;

    print_results(session)
}

/// Print autocomplete suggestions for `prefix`.
///
/// # Errors
///
/// Returns an error if the category list cannot be loaded.
pub(crate) async fn run_categories(session: &mut CliSession, prefix: &str) -> anyhow::Result<()> {
    session.load_data().await?;
    let suggestions = session.suggest_categories(prefix)?;
    if suggestions.is_empty() {
        println!("no categories start with '{prefix}'");
        return Ok(());
    }
    println!("{:<32}ALIAS", "TITLE");
    for category in suggestions {
        println!("{:<32}{}", category.title, category.alias);
    }
    Ok(())
}

/// Fetch and print every favorite in one batch.
///
/// # Errors
///
/// Returns an error if the loads or the batch fetch fail.
pub(crate) async fn run_show_favorites(
    session: &mut CliSession,
    sort: Option<SortField>,
    dir: Option<SortDirection>,
) -> anyhow::Result<()> {
    session.load_data().await?;
    let field = sort.unwrap_or(session.filters().sort_field);
    let direction = dir.unwrap_or(session.filters().sort_direction);
    session.set_sort(field, direction);
    if session.show_favorites().await? == FetchOutcome::Stale {
        tracing::warn!("favorites fetch superseded");
    }
    print_results(session)
}

fn print_results(session: &CliSession) -> anyhow::Result<()> {
    match session.results_view() {
        ResultsView::Loading | ResultsView::Waiting => {
            println!("no results loaded");
            return Ok(());
        }
        ResultsView::Empty(label) => {
            println!("no {label} found");
            return Ok(());
        }
        ResultsView::Ready => {}
    }

    let records = session.page().records.as_deref().unwrap_or_default();
    println!("{:<4}{:<36}{:<10}{:<28}ID", "FAV", "NAME", "MILES", "LOCATION");
    for record in records {
        print_row(record, session.is_favorite(&record.id));
    }
    println!();
    println!("{}", session.pager_summary()?);

    let links = session.page_links();
    if links.previous || links.next {
        let mut hints = Vec::new();
        if links.previous {
            hints.push("--page N-1 for previous");
        }
        if links.next {
            hints.push("--page N+1 for next");
        }
        println!("more results available ({})", hints.join(", "));
    }
    Ok(())
}

fn print_row(record: &BusinessRecord, favorite: bool) {
    let star = if favorite { "*" } else { "" };
    let miles = record
        .distance
        .map_or_else(|| "\u{2014}".to_string(), |m| format!("{:.1}", meters_to_miles(m)));
    println!(
        "{:<4}{:<36}{:<10}{:<28}{}",
        star,
        truncate(&record.name, 34),
        miles,
        truncate(&record.location.display(), 26),
        record.id
    );
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max - 3).collect::<String>())
    } else {
        value.to_string()
    }
}
