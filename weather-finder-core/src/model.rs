use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// Identifier of a city as known to the weather backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub u64);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(CityId)
    }
}

/// A record returned by the city-search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
}

/// Partial city name typed by the user, sent as the `query` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what the minimum-length rule counts.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label/value pair offered while typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySuggestion {
    pub label: String,
    pub value: CityId,
}

impl From<City> for CitySuggestion {
    fn from(city: City) -> Self {
        Self { label: city.name, value: city.id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city_id: CityId,
    pub language: Option<String>,
}

impl WeatherRequest {
    pub fn new(city_id: CityId) -> Self {
        Self { city_id, language: None }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }
}

/// A single measured value as sent by the backend.
///
/// Plain JSON numbers keep their literal text (`20`, `1012`, `5.5`); some
/// deployments pre-format values with units (`"20°C"`, `"40%"`), which are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(n) => write!(f, "{n}"),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Reading {
    fn from(value: i64) -> Self {
        Reading::Number(value.into())
    }
}

impl From<&str> for Reading {
    fn from(value: &str) -> Self {
        Reading::Text(value.to_string())
    }
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a bearing in degrees onto one of the 16 compass points.
pub fn compass_point(degrees: f64) -> &'static str {
    let index = (degrees / 22.5 + 0.5).trunc() as i64;
    COMPASS_POINTS[index.rem_euclid(16) as usize]
}

/// Wind direction as a compass point, e.g. `"SE"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDirection")]
pub struct WindDirection(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDirection {
    Point(String),
    Degrees(f64),
}

impl From<RawDirection> for WindDirection {
    fn from(raw: RawDirection) -> Self {
        match raw {
            RawDirection::Point(p) => WindDirection(p),
            RawDirection::Degrees(deg) => WindDirection(compass_point(deg).to_string()),
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub average: Reading,
    pub min: Reading,
    pub max: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: Reading,
    pub direction: WindDirection,
}

/// Successful body of `GET /api/v1/weather/{cityId}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    pub temperature: Temperature,
    pub description: String,
    pub humidity: Reading,
    pub wind: Wind,
    pub pressure: Reading,
}

/// Error body of a failed lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
