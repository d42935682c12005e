//! Favorite business ids and the persistence seam they are loaded through.

use std::collections::BTreeSet;
use std::future::Future;

/// Persistent set of favorited business ids.
///
/// Implementations must give `add` put semantics (adding an existing id is
/// a no-op) and `remove` must delete at most one entry.
pub trait FavoritesStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;

    fn add(&self, business_id: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn remove(&self, business_id: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// In-memory snapshot of the favorites store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<String>,
}

impl FavoriteSet {
    #[must_use]
    pub fn contains(&self, business_id: &str) -> bool {
        self.ids.contains(business_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in a stable order, suitable for building a batch query.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
