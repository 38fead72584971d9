//! Core library for the `weather-finder` client.
//!
//! This crate defines:
//! - Configuration handling
//! - The backend API seam and its HTTP implementation
//! - A headless model of the weather page
//! - The page interactions: navigation toggle, weather lookup and
//!   debounced city autocomplete
//!
//! It is used by `weather-finder-cli`, but can also be reused by other front ends.

pub mod api;
pub mod autocomplete;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod navigation;
pub mod page;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::{HttpWeatherApi, WeatherApi};
pub use autocomplete::{Autocomplete, AutocompleteSettings, SuggestionList};
pub use config::Config;
pub use error::ApiError;
pub use lookup::LookupOutcome;
pub use model::{City, CityId, CityQuery, CitySuggestion, WeatherRequest, WeatherResult};
pub use navigation::{MenuItem, Navigation, Transition};
pub use page::{Element, Page};
pub use session::Session;
