//! Decoding of GraphQL `data` payloads into [`SearchPage`]s.

use bizsearch_core::{BusinessRecord, SearchPage};
use serde::Deserialize;
use serde_json::Value;

use crate::error::GraphqlError;
use crate::query::batch_alias;

#[derive(Debug, Deserialize)]
struct SearchData {
    search: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    total: u32,
    #[serde(default)]
    business: Option<Vec<BusinessRecord>>,
}

/// Decodes the `data` of a filtered search.
///
/// # Errors
///
/// Returns [`GraphqlError::Deserialize`] if `data` is not a `search` result.
pub fn decode_search_page(data: Value) -> Result<SearchPage, GraphqlError> {
    let decoded: SearchData =
        serde_json::from_value(data).map_err(|e| GraphqlError::Deserialize {
            context: "search".to_string(),
            source: e,
        })?;
    Ok(SearchPage {
        total: decoded.search.total,
        records: decoded.search.business.unwrap_or_default(),
    })
}

/// Flattens the keyed `data` of a batch query back into an ordered page.
///
/// Records come back in alias order. The upstream has no total for this
/// shape, so the batch size stands in for it. Aliases that resolved to
/// `null` (unknown or delisted ids) are skipped.
///
/// # Errors
///
/// Returns [`GraphqlError::Deserialize`] if a present entry is not a business.
pub fn decode_batch_page(data: &Value, batch_size: usize) -> Result<SearchPage, GraphqlError> {
    let mut records = Vec::with_capacity(batch_size);
    for idx in 0..batch_size {
        let alias = batch_alias(idx);
        match data.get(&alias) {
            None | Some(Value::Null) => {
                tracing::warn!(alias = %alias, "batch response: business not returned, skipping");
            }
            Some(entry) => {
                let record = BusinessRecord::deserialize(entry).map_err(|e| {
                    GraphqlError::Deserialize {
                        context: format!("batch entry {alias}"),
                        source: e,
                    }
                })?;
                records.push(record);
            }
        }
    }
    Ok(SearchPage {
        total: u32::try_from(batch_size).unwrap_or(u32::MAX),
        records,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn business(id: &str) -> Value {
        json!({
            "id": id,
            "name": format!("Business {id}"),
            "url": format!("https://example.com/biz/{id}"),
            "distance": null,
            "photos": ["https://example.com/p.jpg"],
            "location": { "city": "Santa Monica", "zip_code": "90401" },
            "categories": [{ "title": "Pizza", "alias": "pizza" }]
        })
    }

    #[test]
    fn search_page_carries_total_and_records() {
        let data = json!({ "search": { "total": 57, "business": [business("a"), business("b")] } });
        let page = decode_search_page(data).unwrap();
        assert_eq!(page.total, 57);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[1].id, "b");
        assert_eq!(page.records[0].categories[0].alias, "pizza");
    }

    #[test]
    fn search_page_with_null_business_list_is_empty() {
        let data = json!({ "search": { "total": 0, "business": null } });
        let page = decode_search_page(data).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn malformed_search_is_a_deserialize_error() {
        let err = decode_search_page(json!({ "nope": true })).unwrap_err();
        assert!(matches!(err, GraphqlError::Deserialize { ref context, .. } if context == "search"));
    }

    #[test]
    fn batch_page_is_flattened_in_alias_order() {
        let data = json!({ "b1": business("second"), "b0": business("first") });
        let page = decode_batch_page(&data, 2).unwrap();
        assert_eq!(page.total, 2);
        let ids: Vec<&str> = page.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn batch_page_skips_null_entries_but_keeps_batch_total() {
        let data = json!({ "b0": business("kept"), "b1": null });
        let page = decode_batch_page(&data, 2).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.records.len(), 1);
    }
}
