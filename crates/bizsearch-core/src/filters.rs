//! Search filter state and the rules for editing it.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::category::Category;
use crate::error::CoreError;
use crate::sort::{SortDirection, SortField};

pub const DISTANCE_METERS_PER_MILE: f64 = 1609.344;
pub const DISTANCE_MILES_MAX: u32 = 25;
/// Largest radius the directory API accepts.
pub const DISTANCE_METERS_MAX: f64 = 40_000.0;
pub const DISTANCE_DEFAULT: u32 = 10;
pub const ZIP_DEFAULT: &str = "90401";

/// Anything a user could still be in the middle of typing.
static ZIP_PARTIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}(-[0-9]{0,4})?$").expect("valid partial zip regex"));

static ZIP_FINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid final zip regex"));

#[must_use]
pub fn miles_to_meters(miles: u32) -> f64 {
    if miles >= DISTANCE_MILES_MAX {
        return DISTANCE_METERS_MAX;
    }
    f64::from(miles) * DISTANCE_METERS_PER_MILE
}

/// Meters to miles rounded to one decimal place, capped at the maximum.
#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    if meters >= DISTANCE_METERS_MAX {
        return f64::from(DISTANCE_MILES_MAX);
    }
    (meters / DISTANCE_METERS_PER_MILE * 10.0).round() / 10.0
}

/// Which query produced the results on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Search,
    Favorite,
}

impl FetchMode {
    /// Label used when describing results of this mode.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FetchMode::Search => "search results",
            FetchMode::Favorite => "favorites",
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Search => f.write_str("search"),
            FetchMode::Favorite => f.write_str("favorite"),
        }
    }
}

impl FromStr for FetchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(FetchMode::Search),
            "favorite" => Ok(FetchMode::Favorite),
            other => Err(CoreError::UnknownFetchMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Raw zip input; `None` when the field is empty.
    pub zip: Option<String>,
    /// Set only while `zip` is a complete 5 or 5+4 digit code.
    pub zip_final: Option<String>,
    pub distance_miles: u32,
    pub distance_meters: f64,
    pub selected_category: Option<Category>,
    pub typed_category: Option<String>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub offset: u32,
    pub fetch_mode: Option<FetchMode>,
}

impl Default for FilterState {
    fn default() -> Self {
        let restaurants = Category::restaurants();
        Self {
            zip: Some(ZIP_DEFAULT.to_string()),
            zip_final: Some(ZIP_DEFAULT.to_string()),
            distance_miles: DISTANCE_DEFAULT,
            distance_meters: miles_to_meters(DISTANCE_DEFAULT),
            typed_category: Some(restaurants.title.clone()),
            selected_category: Some(restaurants),
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            offset: 0,
            fetch_mode: None,
        }
    }
}

impl FilterState {
    /// Applies a zip input edit.
    ///
    /// Returns `false` and leaves the state untouched when `input` could not
    /// be the beginning of a valid zip code.
    pub fn edit_zip(&mut self, input: &str) -> bool {
        if input.is_empty() {
            self.zip = None;
            self.zip_final = None;
            return true;
        }
        if !ZIP_PARTIAL.is_match(input) {
            return false;
        }
        self.zip = Some(input.to_string());
        self.zip_final = ZIP_FINAL.is_match(input).then(|| input.to_string());
        true
    }

    pub fn set_distance_miles(&mut self, miles: u32) {
        self.distance_miles = miles;
        self.distance_meters = miles_to_meters(miles);
    }

    /// Search submission is only possible with a complete zip code.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.zip_final.is_some()
    }

    /// Resets everything but the sort settings for the favorites view.
    pub fn reset_for_favorites(&mut self) {
        self.fetch_mode = Some(FetchMode::Favorite);
        self.selected_category = None;
        self.typed_category = None;
        self.zip = None;
        self.zip_final = None;
        self.set_distance_miles(DISTANCE_DEFAULT);
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_zip_disables_submission() {
        let mut state = FilterState::default();
        assert!(state.edit_zip("9040"));
        assert_eq!(state.zip.as_deref(), Some("9040"));
        assert!(state.zip_final.is_none());
        assert!(!state.can_submit());
    }

    #[test]
    fn complete_zip_enables_submission() {
        let mut state = FilterState::default();
        assert!(state.edit_zip("90402"));
        assert_eq!(state.zip_final.as_deref(), Some("90402"));
        assert!(state.can_submit());
    }

    #[test]
    fn zip_plus_four_is_accepted() {
        let mut state = FilterState::default();
        assert!(state.edit_zip("90402-"));
        assert!(state.zip_final.is_none());
        assert!(state.edit_zip("90402-1234"));
        assert_eq!(state.zip_final.as_deref(), Some("90402-1234"));
    }

    #[test]
    fn invalid_keystroke_is_rejected() {
        let mut state = FilterState::default();
        assert!(!state.edit_zip("9040a"));
        assert!(!state.edit_zip("904021"));
        assert_eq!(state.zip.as_deref(), Some(ZIP_DEFAULT));
        assert_eq!(state.zip_final.as_deref(), Some(ZIP_DEFAULT));
    }

    #[test]
    fn clearing_zip_disables_submission() {
        let mut state = FilterState::default();
        assert!(state.edit_zip(""));
        assert!(state.zip.is_none());
        assert!(!state.can_submit());
    }

    #[test]
    fn mile_conversions_cap_at_maximum() {
        assert!((miles_to_meters(1) - 1609.344).abs() < f64::EPSILON);
        assert!((miles_to_meters(DISTANCE_MILES_MAX) - DISTANCE_METERS_MAX).abs() < f64::EPSILON);
        assert!((meters_to_miles(50_000.0) - 25.0).abs() < f64::EPSILON);
        assert!((meters_to_miles(1609.344) - 1.0).abs() < f64::EPSILON);
        assert!((meters_to_miles(2500.0) - 1.6).abs() < 1e-9);
    }

    #[test]
    fn favorites_reset_keeps_sort() {
        let mut state = FilterState {
            sort_field: SortField::Name,
            sort_direction: SortDirection::Desc,
            offset: 40,
            ..FilterState::default()
        };
        state.set_distance_miles(3);
        state.reset_for_favorites();
        assert_eq!(state.fetch_mode, Some(FetchMode::Favorite));
        assert!(state.zip.is_none());
        assert!(state.selected_category.is_none());
        assert_eq!(state.distance_miles, DISTANCE_DEFAULT);
        assert_eq!(state.offset, 0);
        assert_eq!(state.sort_field, SortField::Name);
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn fetch_mode_parses() {
        assert_eq!("search".parse::<FetchMode>().unwrap(), FetchMode::Search);
        assert!("browse".parse::<FetchMode>().is_err());
    }
}
