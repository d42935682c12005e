//! Turns filter state into directory requests and runs them.

use bizsearch_core::{CoreError, FavoriteSet, FetchMode, FilterState, SearchPage};
use bizsearch_graphql::{
    build_batch_query, build_search_query, decode_batch_page, decode_search_page, GraphqlError,
    RpcClient, SearchParams,
};

/// A fully resolved request, ready to be executed without touching session
/// state.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Search(SearchParams),
    /// Fetch these ids in a single batch. May be empty.
    Favorites(Vec<String>),
}

impl FetchRequest {
    /// Resolves the request for `mode` from the current filters.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingState`] if search mode is requested
    /// without a complete zip code, or favorites mode before favorites have
    /// been loaded.
    pub fn from_filters(
        mode: FetchMode,
        filters: &FilterState,
        favorites: Option<&FavoriteSet>,
        limit: u32,
        offset: u32,
    ) -> Result<Self, CoreError> {
        match mode {
            FetchMode::Search => {
                let zip_code = filters
                    .zip_final
                    .clone()
                    .ok_or(CoreError::MissingState("zip"))?;
                Ok(FetchRequest::Search(SearchParams {
                    limit,
                    offset,
                    zip_code,
                    radius_meters: filters.distance_meters,
                    category: filters.selected_category.as_ref().map(|c| c.alias.clone()),
                }))
            }
            FetchMode::Favorite => {
                let favorites = favorites.ok_or(CoreError::MissingState("favorites"))?;
                Ok(FetchRequest::Favorites(favorites.to_vec()))
            }
        }
    }
}

/// Submits requests through an injected [`RpcClient`].
pub struct SearchOrchestrator<R> {
    client: R,
}

impl<R: RpcClient> SearchOrchestrator<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &R {
        &self.client
    }

    /// # Errors
    ///
    /// Propagates transport and decoding failures from the client.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchPage, GraphqlError> {
        let data = self.client.send(&build_search_query(params)).await?;
        decode_search_page(data)
    }

    /// Fetches the given ids with one batch query. An empty id list yields an
    /// empty page without contacting the client.
    ///
    /// # Errors
    ///
    /// Propagates transport and decoding failures from the client.
    pub async fn fetch_by_ids(&self, business_ids: &[String]) -> Result<SearchPage, GraphqlError> {
        if business_ids.is_empty() {
            return Ok(SearchPage::default());
        }
        let data = self.client.send(&build_batch_query(business_ids)).await?;
        decode_batch_page(&data, business_ids.len())
    }

    /// # Errors
    ///
    /// Propagates transport and decoding failures from the client.
    pub async fn execute(&self, request: &FetchRequest) -> Result<SearchPage, GraphqlError> {
        match request {
            FetchRequest::Search(params) => self.search(params).await,
            FetchRequest::Favorites(ids) => self.fetch_by_ids(ids).await,
        }
    }
}
