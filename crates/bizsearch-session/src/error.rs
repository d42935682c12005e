use bizsearch_core::CoreError;
use bizsearch_graphql::GraphqlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Rpc(#[from] GraphqlError),

    #[error("favorites store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SessionError {
    pub(crate) fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SessionError::Store(Box::new(err))
    }
}
