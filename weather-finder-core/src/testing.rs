//! In-memory `WeatherApi` used by unit tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::{
    collections::HashMap,
    sync::Mutex,
    time::Duration,
};

use crate::{
    api::WeatherApi,
    error::ApiError,
    model::{City, CityId, CityQuery, Reading, Temperature, WeatherRequest, WeatherResult, Wind, WindDirection},
};

#[derive(Debug, Clone)]
enum Canned<T> {
    Ok(T),
    Err(StatusCode, String),
}

impl<T: Clone> Canned<T> {
    fn get(&self) -> Result<T, ApiError> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Err(status, message) => {
                Err(ApiError::Rejected { status: *status, message: message.clone() })
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeApi {
    weather: HashMap<CityId, Canned<WeatherResult>>,
    cities: HashMap<String, (Duration, Canned<Vec<City>>)>,
    weather_requests: Mutex<Vec<WeatherRequest>>,
    city_queries: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_weather(mut self, id: CityId, weather: WeatherResult) -> Self {
        self.weather.insert(id, Canned::Ok(weather));
        self
    }

    pub fn with_weather_error(mut self, id: CityId, status: StatusCode, message: &str) -> Self {
        self.weather.insert(id, Canned::Err(status, message.to_string()));
        self
    }

    pub fn with_cities(self, query: &str, cities: Vec<City>) -> Self {
        self.with_slow_cities(query, Duration::ZERO, cities)
    }

    /// City search for `query` that resolves only after `latency`.
    pub fn with_slow_cities(mut self, query: &str, latency: Duration, cities: Vec<City>) -> Self {
        self.cities.insert(query.to_string(), (latency, Canned::Ok(cities)));
        self
    }

    pub fn with_cities_error(mut self, query: &str) -> Self {
        self.cities.insert(
            query.to_string(),
            (Duration::ZERO, Canned::Err(StatusCode::INTERNAL_SERVER_ERROR, "boom".into())),
        );
        self
    }

    pub fn weather_requests(&self) -> Vec<WeatherRequest> {
        self.weather_requests.lock().unwrap().clone()
    }

    pub fn city_queries(&self) -> Vec<String> {
        self.city_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherApi for FakeApi {
    async fn weather(&self, request: &WeatherRequest) -> Result<WeatherResult, ApiError> {
        self.weather_requests.lock().unwrap().push(request.clone());

        match self.weather.get(&request.city_id) {
            Some(canned) => canned.get(),
            None => Err(ApiError::Rejected {
                status: StatusCode::NOT_FOUND,
                message: "Not Found".into(),
            }),
        }
    }

    async fn cities(&self, query: &CityQuery) -> Result<Vec<City>, ApiError> {
        self.city_queries.lock().unwrap().push(query.as_str().to_string());

        let Some((latency, canned)) = self.cities.get(query.as_str()) else {
            return Ok(Vec::new());
        };

        if !latency.is_zero() {
            tokio::time::sleep(*latency).await;
        }
        canned.get()
    }
}

pub fn springfield() -> City {
    City { id: CityId(42), name: "Springfield".into() }
}

pub fn springfield_weather() -> WeatherResult {
    WeatherResult {
        city: "Springfield".into(),
        temperature: Temperature {
            average: Reading::from(20_i64),
            min: Reading::from(15_i64),
            max: Reading::from(25_i64),
        },
        description: "Clear".into(),
        humidity: Reading::from(40_i64),
        wind: Wind { speed: Reading::from(5_i64), direction: WindDirection("N".into()) },
        pressure: Reading::from(1012_i64),
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}
