//! Result ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::business::BusinessRecord;
use crate::error::CoreError;
use crate::favorites::FavoriteSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Distance,
    Name,
    Location,
    Favorite,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Distance,
        SortField::Name,
        SortField::Location,
        SortField::Favorite,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Distance => "distance",
            SortField::Name => "name",
            SortField::Location => "location",
            SortField::Favorite => "favorite",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Maps an ascending ordering onto this direction.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// Compares two records by `field` in `direction`.
///
/// Records without a distance always come after records with one, whichever
/// way the distance sort runs.
#[must_use]
pub fn compare_records(
    a: &BusinessRecord,
    b: &BusinessRecord,
    field: SortField,
    direction: SortDirection,
    favorites: &FavoriteSet,
) -> Ordering {
    match field {
        SortField::Distance => match (a.distance, b.distance) {
            (Some(x), Some(y)) => direction.apply(x.total_cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::Name => direction.apply(a.name.cmp(&b.name)),
        SortField::Location => direction.apply(location_key(a).cmp(&location_key(b))),
        // Favorites rank lower so they lead an ascending sort.
        SortField::Favorite => direction.apply(
            (!favorites.contains(&a.id)).cmp(&!favorites.contains(&b.id)),
        ),
    }
}

fn location_key(rec: &BusinessRecord) -> (&str, &str) {
    (
        rec.location.city.as_deref().unwrap_or(""),
        rec.location.zip_code.as_deref().unwrap_or(""),
    )
}

/// Returns a stably sorted copy of `records`.
#[must_use]
pub fn sort_records(
    records: &[BusinessRecord],
    field: SortField,
    direction: SortDirection,
    favorites: &FavoriteSet,
) -> Vec<BusinessRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_records(a, b, field, direction, favorites));
    sorted
}
