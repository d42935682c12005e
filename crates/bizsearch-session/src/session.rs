//! The search session: filter inputs, fetch lifecycle, favorites, sorting
//! and paging over one set of displayed results.
//!
//! A fetch runs in three steps so overlapping fetches can be expressed
//! without holding the session borrowed across the network call:
//!
//! 1. [`SearchSession::begin_fetch`] flips the status to loading, issues a
//!    fresh token and resolves the request.
//! 2. [`SearchOrchestrator::execute`] performs the call.
//! 3. [`SearchSession::complete_fetch`] applies the result, unless a newer
//!    fetch has been started in the meantime.
//!
//! [`SearchSession::fetch_results`] chains all three.

use bizsearch_core::{
    can_page_backward, can_page_forward, next_offset, sort_records, AppConfig, BusinessRecord,
    Category, CategoryIndex, CoreError, FavoriteSet, FavoritesStore, FetchMode, FilterState,
    PagerSummary, ResultPage, SearchPage, SortDirection, SortField,
};
use bizsearch_graphql::{CategorySource, GraphqlError, RpcClient};

use crate::error::SessionError;
use crate::orchestrator::{FetchRequest, SearchOrchestrator};
use crate::state::{FetchOutcome, FetchTicket, PageLinks, ResultsStatus, ResultsView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub search_limit: u32,
    pub page_size: u32,
    pub cat_search_limit: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            search_limit: 20,
            page_size: 20,
            cat_search_limit: 8,
        }
    }
}

impl SessionSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            search_limit: config.search_limit,
            page_size: config.page_size,
            cat_search_limit: config.cat_search_limit,
        }
    }
}

pub struct SearchSession<R, C, F> {
    orchestrator: SearchOrchestrator<R>,
    category_source: C,
    store: F,
    settings: SessionSettings,
    filters: FilterState,
    status: ResultsStatus,
    page: ResultPage,
    favorites: Option<FavoriteSet>,
    index: Option<CategoryIndex>,
    suggestions: Vec<Category>,
    latest_token: u64,
}

impl<R, C, F> SearchSession<R, C, F>
where
    R: RpcClient,
    C: CategorySource,
    F: FavoritesStore,
{
    pub fn new(client: R, category_source: C, store: F, settings: SessionSettings) -> Self {
        Self {
            orchestrator: SearchOrchestrator::new(client),
            category_source,
            store,
            settings,
            filters: FilterState::default(),
            status: ResultsStatus::Ready,
            page: ResultPage::default(),
            favorites: None,
            index: None,
            suggestions: Vec::new(),
            latest_token: 0,
        }
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator<R> {
        &self.orchestrator
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn status(&self) -> ResultsStatus {
        self.status
    }

    pub fn page(&self) -> &ResultPage {
        &self.page
    }

    pub fn favorites(&self) -> Option<&FavoriteSet> {
        self.favorites.as_ref()
    }

    pub fn suggestions(&self) -> &[Category] {
        &self.suggestions
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Both the category index and the favorites set have been loaded.
    pub fn is_ready(&self) -> bool {
        self.index.is_some() && self.favorites.is_some()
    }

    // -----------------------------------------------------------------------
    // Startup
    // -----------------------------------------------------------------------

    /// Loads categories and favorites concurrently, then runs the initial
    /// search with the default filters.
    ///
    /// # Errors
    ///
    /// Returns the first failure among the two loads, or the initial search
    /// failure.
    pub async fn load_initial(&mut self) -> Result<FetchOutcome, SessionError> {
        self.load_data().await?;
        self.fetch_results(FetchMode::Search, 0).await
    }

    /// Loads categories and favorites concurrently without fetching results.
    ///
    /// # Errors
    ///
    /// Returns the first failure among the two loads.
    pub async fn load_data(&mut self) -> Result<(), SessionError> {
        let source = &self.category_source;
        let store = &self.store;
        let (raw, ids) = tokio::try_join!(
            async { source.fetch_categories().await.map_err(SessionError::from) },
            async { store.list().await.map_err(SessionError::store) },
        )?;

        let index = CategoryIndex::build(raw, self.settings.cat_search_limit);
        tracing::info!(
            categories = index.len(),
            favorites = ids.len(),
            "session data loaded"
        );
        self.index = Some(index);
        self.favorites = Some(ids.into_iter().collect());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    fn index(&self) -> Result<&CategoryIndex, SessionError> {
        self.index
            .as_ref()
            .ok_or(SessionError::Core(CoreError::IndexNotBuilt))
    }

    /// Autocomplete matches for `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexNotBuilt`] before categories are loaded.
    pub fn search_categories(&self, value: &str) -> Result<Vec<Category>, SessionError> {
        Ok(self.index()?.lookup(value).into_iter().cloned().collect())
    }

    /// The category exactly named by `value`, if it is unambiguous.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexNotBuilt`] before categories are loaded.
    pub fn find_single_category(&self, value: &str) -> Result<Option<Category>, SessionError> {
        Ok(self.index()?.find_single(value).cloned())
    }

    /// Stores the suggestions for `value` and returns them.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexNotBuilt`] before categories are loaded.
    pub fn suggest_categories(&mut self, value: &str) -> Result<&[Category], SessionError> {
        self.suggestions = self.search_categories(value)?;
        Ok(&self.suggestions)
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    /// Records free text typed into the category box. The selected category
    /// follows the text only while it names exactly one category.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexNotBuilt`] before categories are loaded.
    pub fn type_category(&mut self, value: &str) -> Result<(), SessionError> {
        let selected = self.find_single_category(value)?;
        self.filters.typed_category = (!value.is_empty()).then(|| value.to_string());
        self.filters.selected_category = selected;
        Ok(())
    }

    pub fn select_category(&mut self, category: Category) {
        self.filters.typed_category = Some(category.title.clone());
        self.filters.selected_category = Some(category);
    }

    // -----------------------------------------------------------------------
    // Filter inputs
    // -----------------------------------------------------------------------

    /// Returns `false` if the edit was rejected.
    pub fn edit_zip(&mut self, input: &str) -> bool {
        self.filters.edit_zip(input)
    }

    pub fn set_distance_miles(&mut self, miles: u32) {
        self.filters.set_distance_miles(miles);
    }

    pub fn can_submit(&self) -> bool {
        self.filters.can_submit()
    }

    // -----------------------------------------------------------------------
    // Fetching
    // -----------------------------------------------------------------------

    /// Starts a fetch: resolves the request, issues a new token and marks the
    /// results as loading.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingState`] if the filters cannot produce a
    /// request for `mode`; the status is left unchanged in that case.
    pub fn begin_fetch(&mut self, mode: FetchMode, offset: u32) -> Result<FetchTicket, SessionError> {
        let request = FetchRequest::from_filters(
            mode,
            &self.filters,
            self.favorites.as_ref(),
            self.settings.search_limit,
            offset,
        )?;
        self.latest_token += 1;
        self.status = ResultsStatus::Loading;
        tracing::debug!(token = self.latest_token, %mode, offset, "fetch started");
        Ok(FetchTicket {
            token: self.latest_token,
            mode,
            offset,
            request,
        })
    }

    /// Applies the result of a fetch started with [`begin_fetch`].
    ///
    /// A ticket that is no longer the newest is discarded, whatever its
    /// result. On failure the status returns to ready and the previous page
    /// stays on display.
    ///
    /// # Errors
    ///
    /// Returns the fetch error for the newest ticket.
    ///
    /// [`begin_fetch`]: SearchSession::begin_fetch
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<SearchPage, GraphqlError>,
    ) -> Result<FetchOutcome, SessionError> {
        if ticket.token != self.latest_token {
            tracing::debug!(
                token = ticket.token,
                latest = self.latest_token,
                "discarding stale fetch result"
            );
            return Ok(FetchOutcome::Stale);
        }

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(e) => {
                self.status = ResultsStatus::Ready;
                tracing::warn!(token = ticket.token, error = %e, "fetch failed");
                return Err(e.into());
            }
        };

        if ticket.mode == FetchMode::Favorite {
            self.filters.reset_for_favorites();
        }
        self.filters.fetch_mode = Some(ticket.mode);
        self.filters.offset = ticket.offset;
        let records = self.sorted(&fetched.records);
        tracing::info!(
            token = ticket.token,
            mode = %ticket.mode,
            total = fetched.total,
            shown = records.len(),
            "fetch applied"
        );
        self.page = ResultPage {
            total: Some(fetched.total),
            records: Some(records),
        };
        self.status = ResultsStatus::Ready;
        Ok(FetchOutcome::Applied)
    }

    /// Runs a complete fetch for `mode` at `offset`.
    ///
    /// # Errors
    ///
    /// See [`begin_fetch`](SearchSession::begin_fetch) and
    /// [`complete_fetch`](SearchSession::complete_fetch).
    pub async fn fetch_results(
        &mut self,
        mode: FetchMode,
        offset: u32,
    ) -> Result<FetchOutcome, SessionError> {
        let ticket = self.begin_fetch(mode, offset)?;
        let result = self.orchestrator.execute(&ticket.request).await;
        self.complete_fetch(ticket, result)
    }

    /// Re-runs whichever mode produced the current results.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingState`] if nothing has been fetched yet.
    pub async fn fetch_current_mode(&mut self, offset: u32) -> Result<FetchOutcome, SessionError> {
        let mode = self
            .filters
            .fetch_mode
            .ok_or(CoreError::MissingState("fetch_mode"))?;
        self.fetch_results(mode, offset).await
    }

    /// Submits the search form. Returns `None` without fetching while the
    /// zip code is incomplete.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures.
    pub async fn submit_search(&mut self) -> Result<Option<FetchOutcome>, SessionError> {
        if !self.can_submit() {
            return Ok(None);
        }
        self.fetch_results(FetchMode::Search, 0).await.map(Some)
    }

    /// Switches to the favorites view.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures.
    pub async fn show_favorites(&mut self) -> Result<FetchOutcome, SessionError> {
        self.fetch_results(FetchMode::Favorite, 0).await
    }

    // -----------------------------------------------------------------------
    // Paging
    // -----------------------------------------------------------------------

    /// Paging links; only search results are paged.
    pub fn page_links(&self) -> PageLinks {
        if self.filters.fetch_mode != Some(FetchMode::Search) {
            return PageLinks::default();
        }
        PageLinks {
            previous: can_page_backward(self.filters.offset, self.page.total),
            next: can_page_forward(self.filters.offset, self.page.total, self.settings.page_size),
        }
    }

    /// Moves `delta` pages and refetches the current mode.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingState`] if nothing has been fetched yet,
    /// or propagates fetch failures.
    pub async fn page_by(&mut self, delta: i32) -> Result<FetchOutcome, SessionError> {
        let offset = next_offset(
            self.filters.offset,
            self.page.total,
            delta,
            self.settings.page_size,
        );
        self.fetch_current_mode(offset).await
    }

    /// # Errors
    ///
    /// Returns [`CoreError::MissingState`] if no results are on display.
    pub fn pager_summary(&self) -> Result<PagerSummary, SessionError> {
        let mode = self
            .filters
            .fetch_mode
            .ok_or(CoreError::MissingState("fetch_mode"))?;
        let records = self
            .page
            .records
            .as_ref()
            .ok_or(CoreError::MissingState("business_recs"))?;
        Ok(PagerSummary::new(
            self.filters.offset,
            records.len(),
            self.page.total,
            mode.label(),
        ))
    }

    pub fn results_view(&self) -> ResultsView {
        if self.status == ResultsStatus::Loading {
            return ResultsView::Loading;
        }
        match &self.page.records {
            None => ResultsView::Waiting,
            Some(records) if records.is_empty() => ResultsView::Empty(
                self.filters
                    .fetch_mode
                    .map_or(FetchMode::Search.label(), FetchMode::label),
            ),
            Some(_) => ResultsView::Ready,
        }
    }

    // -----------------------------------------------------------------------
    // Sorting
    // -----------------------------------------------------------------------

    fn sorted(&self, records: &[BusinessRecord]) -> Vec<BusinessRecord> {
        let empty = FavoriteSet::default();
        sort_records(
            records,
            self.filters.sort_field,
            self.filters.sort_direction,
            self.favorites.as_ref().unwrap_or(&empty),
        )
    }

    /// Sets the sort outright and re-sorts any displayed records.
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.filters.sort_field = field;
        self.filters.sort_direction = direction;
        if let Some(records) = self.page.records.take() {
            self.page.records = Some(self.sorted(&records));
        }
    }

    /// Sort-header click: the current field flips direction, another field
    /// is selected keeping the direction. Displayed records are re-sorted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingState`] if no results are on display.
    pub fn toggle_sort(&mut self, field: SortField) -> Result<(), SessionError> {
        let records = self
            .page
            .records
            .take()
            .ok_or(CoreError::MissingState("business_recs"))?;
        if self.filters.sort_field == field {
            self.filters.sort_direction = self.filters.sort_direction.toggled();
        } else {
            self.filters.sort_field = field;
        }
        self.page.records = Some(self.sorted(&records));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------------

    /// Membership check that tolerates favorites not being loaded yet.
    pub fn is_favorite(&self, business_id: &str) -> bool {
        self.favorites
            .as_ref()
            .is_some_and(|favs| favs.contains(business_id))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::MissingState`] before favorites are loaded.
    pub fn has_favorite(&self, business_id: &str) -> Result<bool, SessionError> {
        let favs = self
            .favorites
            .as_ref()
            .ok_or(CoreError::MissingState("favorites"))?;
        Ok(favs.contains(business_id))
    }

    /// Re-reads the full favorites set from the store.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store cannot be read.
    pub async fn reload_favorites(&mut self) -> Result<&FavoriteSet, SessionError> {
        let ids = self.store.list().await.map_err(SessionError::store)?;
        Ok(self.favorites.insert(ids.into_iter().collect()))
    }

    /// Adds or removes `business_id` and resyncs the favorites set.
    ///
    /// Returns whether the business is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store write or reload fails.
    pub async fn toggle_favorite(&mut self, business_id: &str) -> Result<bool, SessionError> {
        if self.is_favorite(business_id) {
            self.store
                .remove(business_id)
                .await
                .map_err(SessionError::store)?;
        } else {
            self.store
                .add(business_id)
                .await
                .map_err(SessionError::store)?;
        }
        let favorites = self.reload_favorites().await?;
        Ok(favorites.contains(business_id))
    }
}
