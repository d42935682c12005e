//! Category list source.
//!
//! The list is fetched once at startup with a plain GET. Both a bare array of
//! `{title, alias}` objects and the directory's `{"categories": [...]}`
//! envelope are accepted.

use std::future::Future;

use bizsearch_core::RawCategory;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::client::{build_http_client, parse_url};
use crate::error::GraphqlError;

pub trait CategorySource {
    fn fetch_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<RawCategory>, GraphqlError>> + Send;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoriesPayload {
    List(Vec<RawCategory>),
    Wrapped { categories: Vec<RawCategory> },
}

impl CategoriesPayload {
    fn into_vec(self) -> Vec<RawCategory> {
        match self {
            CategoriesPayload::List(list) | CategoriesPayload::Wrapped { categories: list } => list,
        }
    }
}

pub struct HttpCategorySource {
    client: Client,
    url: Url,
    api_key: Option<String>,
}

impl HttpCategorySource {
    /// # Errors
    ///
    /// Returns [`GraphqlError::InvalidUrl`] if `url` does not parse, or
    /// [`GraphqlError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn new(
        url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GraphqlError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            url: parse_url(url)?,
            api_key: api_key.map(str::to_owned),
        })
    }
}

impl CategorySource for HttpCategorySource {
    async fn fetch_categories(&self) -> Result<Vec<RawCategory>, GraphqlError> {
        let mut request = self.client.get(self.url.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let payload: CategoriesPayload =
            serde_json::from_str(&body).map_err(|e| GraphqlError::Deserialize {
                context: self.url.to_string(),
                source: e,
            })?;
        let categories = payload.into_vec();
        tracing::info!(count = categories.len(), "loaded categories");
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_array() {
        let payload: CategoriesPayload =
            serde_json::from_str(r#"[{"title": "Bars", "alias": "bars"}]"#).unwrap();
        assert_eq!(payload.into_vec()[0].alias, "bars");
    }

    #[test]
    fn accepts_wrapped_list_with_extra_fields() {
        let payload: CategoriesPayload = serde_json::from_str(
            r#"{"categories": [{"title": "Bars", "alias": "bars", "parent_aliases": ["nightlife"]}]}"#,
        )
        .unwrap();
        assert_eq!(payload.into_vec()[0].title, "Bars");
    }
}
