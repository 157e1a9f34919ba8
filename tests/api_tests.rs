//! Integration tests for the provider client using wiremock.
//!
//! These tests verify request shape and response handling against
//! a mock HTTP server.

use pretty_assertions::assert_eq;
use weatherpanel::api::{self, FetchError, LocateError, ProviderConfig};
use weatherpanel::state::WeatherQuery;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing at the mock server
fn provider_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        endpoint: format!("{}/data/2.5/weather", server.uri()),
        api_key: "test-key".into(),
        locate_endpoint: format!("{}/json", server.uri()),
    }
}

/// A representative current-weather payload
fn current_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "dt": 1_700_000_000,
        "sys": {"country": "FR"},
        "main": {"temp": 18.6, "feels_like": 17.4, "humidity": 65},
        "weather": [{"main": "Clouds", "description": "scattered clouds"}],
        "wind": {"speed": 3.6},
        "visibility": 10000
    })
}

#[tokio::test]
async fn test_fetch_by_city() {
    let mock_server = MockServer::start().await;

    // The city goes out as `q`, along with the key and metric units
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&mock_server)
        .await;

    let config = provider_config(&mock_server);
    let report = api::fetch_current(&config, &WeatherQuery::City("Paris".into()))
        .await
        .unwrap();

    assert_eq!(report.location_name, "Paris");
    assert_eq!(report.country_code, "FR");
    assert_eq!(report.condition_main, "Clouds");
    assert_eq!(report.condition_description, "scattered clouds");
    assert_eq!(report.temperature_c, 18.6);
    assert_eq!(report.feels_like_c, 17.4);
    assert_eq!(report.humidity_pct, 65);
    assert_eq!(report.wind_speed_mps, 3.6);
    assert_eq!(report.visibility_m, 10000);
    assert_eq!(report.observed_at, 1_700_000_000);
}

#[tokio::test]
async fn test_fetch_by_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "48.86"))
        .and(query_param("lon", "2.35"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&mock_server)
        .await;

    let config = provider_config(&mock_server);
    let query = WeatherQuery::Coords {
        lat: 48.86,
        lon: 2.35,
    };
    let report = api::fetch_current(&config, &query).await.unwrap();

    assert_eq!(report.location_name, "Paris");
}

#[tokio::test]
async fn test_provider_error_message_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let config = provider_config(&mock_server);
    let result = api::fetch_current(&config, &WeatherQuery::City("Nowhere".into())).await;

    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::Provider(_)));
    assert_eq!(err.to_string(), "city not found");
}

#[tokio::test]
async fn test_provider_error_without_message_falls_back() {
    let mock_server = MockServer::start().await;

    // Empty body, nothing to quote
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = provider_config(&mock_server);
    let result = api::fetch_current(&config, &WeatherQuery::City("Paris".into())).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Failed to fetch weather data"
    );
}

#[tokio::test]
async fn test_transport_failure_is_surfaced() {
    // Bind a port, then drop the listener so nothing answers on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ProviderConfig {
        endpoint: format!("http://127.0.0.1:{port}/data/2.5/weather"),
        api_key: "test-key".into(),
        locate_endpoint: format!("http://127.0.0.1:{port}/json"),
    };
    let result = api::fetch_current(&config, &WeatherQuery::City("Paris".into())).await;

    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_fetch_defaults_for_missing_fields() {
    let mock_server = MockServer::start().await;

    // Minimal payload: no sys, weather list, or visibility
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Atlantis",
            "dt": 0,
            "main": {"temp": 10.0, "feels_like": 9.0, "humidity": 80},
            "wind": {"speed": 5.0}
        })))
        .mount(&mock_server)
        .await;

    let config = provider_config(&mock_server);
    let report = api::fetch_current(&config, &WeatherQuery::City("Atlantis".into()))
        .await
        .unwrap();

    assert_eq!(report.country_code, "");
    assert_eq!(report.condition_main, "Unknown");
    assert_eq!(report.visibility_m, 0);
}

#[tokio::test]
async fn test_locate_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 48.86,
            "lon": 2.35
        })))
        .mount(&mock_server)
        .await;

    let config = provider_config(&mock_server);
    let pos = api::locate_position(&config.locate_endpoint).await.unwrap();

    assert_eq!(pos.lat, 48.86);
    assert_eq!(pos.lon, 2.35);
}

#[tokio::test]
async fn test_locate_refused() {
    let mock_server = MockServer::start().await;

    // ip-api reports failures with a 200 and a status field
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&mock_server)
        .await;

    let config = provider_config(&mock_server);
    let result = api::locate_position(&config.locate_endpoint).await;

    let err = result.unwrap_err();
    assert!(matches!(err, LocateError::Refused(_)));
    assert!(err.to_string().contains("private range"));
}
