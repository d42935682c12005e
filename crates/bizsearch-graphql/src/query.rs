//! GraphQL documents sent to the business directory.
//!
//! Two shapes exist: a parameterized `search` and a generated batch query
//! with one aliased `business(id:)` selection per requested id, since the
//! upstream has no "fetch these ids" operation.

use serde::Serialize;
use serde_json::{Map, Value};

/// Fields requested for every business, shared by both query shapes.
pub const BUSINESS_FRAGMENT: &str = "
fragment bizResponse on Business {
  id
  name
  url
  distance
  photos
  location {
    city
    zip_code
  }
  categories {
    title
    alias
  }
}
";

/// A GraphQL document plus its variables, serialized as the POST body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlQuery {
    pub query: String,
    pub variables: Map<String, Value>,
}

/// Inputs for a filtered search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub limit: u32,
    pub offset: u32,
    pub zip_code: String,
    pub radius_meters: f64,
    /// Category alias, if the search is restricted to one.
    pub category: Option<String>,
}

#[must_use]
pub fn build_search_query(params: &SearchParams) -> GraphqlQuery {
    let query = format!(
        "{BUSINESS_FRAGMENT}
query appQuery(
  $limit: Int!,
  $offset: Int!,
  $zip_code: String!,
  $radius: Float!,
  $categories: String
) {{
  search(
    limit: $limit,
    offset: $offset,
    location: $zip_code,
    radius: $radius,
    categories: $categories
  ) {{
    total
    business {{
      ...bizResponse
    }}
  }}
}}
"
    );

    let mut variables = Map::new();
    variables.insert("limit".to_string(), Value::from(params.limit));
    variables.insert("offset".to_string(), Value::from(params.offset));
    variables.insert("zip_code".to_string(), Value::from(params.zip_code.clone()));
    variables.insert("radius".to_string(), Value::from(params.radius_meters));
    variables.insert(
        "categories".to_string(),
        params.category.clone().map_or(Value::Null, Value::from),
    );

    GraphqlQuery { query, variables }
}

/// Response key under which the `idx`-th business of a batch is returned.
#[must_use]
pub fn batch_alias(idx: usize) -> String {
    format!("b{idx}")
}

/// Builds one query fetching every id in `business_ids`.
///
/// Callers must not pass an empty slice; a GraphQL operation without
/// selections is invalid.
#[must_use]
pub fn build_batch_query(business_ids: &[String]) -> GraphqlQuery {
    let args = (0..business_ids.len())
        .map(|idx| format!("$id{idx}: String!"))
        .collect::<Vec<_>>()
        .join(", ");

    let selections: String = (0..business_ids.len())
        .map(|idx| {
            format!(
                "  {}: business(id: $id{idx}) {{\n    ...bizResponse\n  }}\n",
                batch_alias(idx)
            )
        })
        .collect();

    let query = format!("{BUSINESS_FRAGMENT}\nquery appQuery({args}) {{\n{selections}}}\n");

    let variables = business_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (format!("id{idx}"), Value::from(id.clone())))
        .collect();

    GraphqlQuery { query, variables }
}
