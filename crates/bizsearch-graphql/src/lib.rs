pub mod categories;
pub mod client;
pub mod error;
pub mod query;
pub mod response;

pub use categories::{CategorySource, HttpCategorySource};
pub use client::{GraphqlClient, RpcClient};
pub use error::GraphqlError;
pub use query::{
    batch_alias, build_batch_query, build_search_query, GraphqlQuery, SearchParams,
    BUSINESS_FRAGMENT,
};
pub use response::{decode_batch_page, decode_search_page};
