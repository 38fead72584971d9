use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::ApiError,
    model::{City, CityQuery, WeatherRequest, WeatherResult},
};

pub mod http;

pub use http::HttpWeatherApi;

/// The two backend endpoints the page talks to.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// `GET /api/v1/weather/{cityId}/`
    async fn weather(&self, request: &WeatherRequest) -> Result<WeatherResult, ApiError>;

    /// `GET /api/v1/cities/?query=...`
    async fn cities(&self, query: &CityQuery) -> Result<Vec<City>, ApiError>;
}
