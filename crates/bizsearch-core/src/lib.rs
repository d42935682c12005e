pub mod app_config;
pub mod business;
pub mod category;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod pager;
pub mod sort;

pub use app_config::{AppConfig, Environment};
pub use business::{BusinessCategory, BusinessLocation, BusinessRecord, ResultPage, SearchPage};
pub use category::{clean_title, Category, CategoryIndex, RawCategory};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use favorites::{FavoriteSet, FavoritesStore};
pub use filters::{
    meters_to_miles, miles_to_meters, FetchMode, FilterState, DISTANCE_DEFAULT,
    DISTANCE_METERS_MAX, DISTANCE_METERS_PER_MILE, DISTANCE_MILES_MAX, ZIP_DEFAULT,
};
pub use pager::{can_page_backward, can_page_forward, next_offset, PagerSummary};
pub use sort::{compare_records, sort_records, SortDirection, SortField};
