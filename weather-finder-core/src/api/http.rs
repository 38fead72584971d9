use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    model::{City, CityQuery, WeatherRequest, WeatherResult},
};

use super::WeatherApi;

/// `WeatherApi` over HTTP against a weather-finder backend.
#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    base_url: String,
    http: Client,
}

impl HttpWeatherApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn weather_url(&self, request: &WeatherRequest) -> String {
        format!("{}/api/v1/weather/{}/", self.base_url, request.city_id)
    }

    fn cities_url(&self) -> String {
        format!("{}/api/v1/cities/", self.base_url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: String, req: RequestBuilder) -> Result<T, ApiError> {
        tracing::debug!(%url, "sending request");

        let res = req
            .send()
            .await
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            tracing::debug!(%url, %status, "request rejected");
            return Err(ApiError::rejected(status, &body));
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Malformed { url, source })
    }
}

#[async_trait]
impl WeatherApi for HttpWeatherApi {
    async fn weather(&self, request: &WeatherRequest) -> Result<WeatherResult, ApiError> {
        let url = self.weather_url(request);

        let mut req = self.http.get(&url);
        if let Some(language) = request.language.as_deref().filter(|l| !l.is_empty()) {
            req = req.query(&[("language", language)]);
        }

        self.fetch(url, req).await
    }

    async fn cities(&self, query: &CityQuery) -> Result<Vec<City>, ApiError> {
        let url = self.cities_url();
        let req = self.http.get(&url).query(&[("query", query.as_str())]);

        self.fetch(url, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CityId;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn springfield() -> serde_json::Value {
        json!({
            "city": "Springfield",
            "temperature": {"average": 20, "min": 15, "max": 25},
            "description": "Clear",
            "humidity": 40,
            "wind": {"speed": 5, "direction": "N"},
            "pressure": 1012
        })
    }

    #[tokio::test]
    async fn weather_hits_city_path_with_language() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/weather/42/"))
            .and(query_param("language", "de"))
            .respond_with(ResponseTemplate::new(200).set_body_json(springfield()))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpWeatherApi::new(format!("{}/", server.uri()));
        let request = WeatherRequest::new(CityId(42)).with_language(Some("de".into()));
        let result = api.weather(&request).await.unwrap();

        assert_eq!(result.city, "Springfield");
        assert_eq!(result.pressure.to_string(), "1012");
    }

    #[tokio::test]
    async fn weather_omits_language_when_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/weather/42/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(springfield()))
            .mount(&server)
            .await;

        let api = HttpWeatherApi::new(server.uri());
        api.weather(&WeatherRequest::new(CityId(42))).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.query(), None);
    }

    #[tokio::test]
    async fn weather_error_body_becomes_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/weather/7/"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Service Unavailable"})),
            )
            .mount(&server)
            .await;

        let api = HttpWeatherApi::new(server.uri());
        let err = api.weather(&WeatherRequest::new(CityId(7))).await.unwrap_err();

        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn weather_with_incomplete_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/weather/42/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Springfield"})))
            .mount(&server)
            .await;

        let api = HttpWeatherApi::new(server.uri());
        let err = api.weather(&WeatherRequest::new(CityId(42))).await.unwrap_err();

        assert!(matches!(err, ApiError::Malformed { .. }));
    }

    #[tokio::test]
    async fn cities_sends_query_parameter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/cities/"))
            .and(query_param("query", "Spr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 42, "name": "Springfield"},
                {"id": 43, "name": "Springdale", "country": "US"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpWeatherApi::new(server.uri());
        let cities = api.cities(&CityQuery::new("Spr")).await.unwrap();

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Springfield");
        assert_eq!(cities[1].id, CityId(43));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpWeatherApi::new(format!("http://{addr}"));
        let err = api.cities(&CityQuery::new("Spr")).await.unwrap_err();

        assert!(matches!(err, ApiError::Transport { .. }));
        assert_eq!(err.user_message(), "Service Unavailable");
    }
}
