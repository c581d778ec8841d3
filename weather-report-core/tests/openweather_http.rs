use std::time::Duration;

use serde_json::json;
use weather_report_core::{
    LookupResult, OpenWeatherProvider, ToolStatus, WeatherLookup, WeatherTools,
    tool::GET_WEATHER_REPORT,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const API_KEY: &str = "SECRET";

fn lookup_for(server: &MockServer) -> WeatherLookup {
    let provider = OpenWeatherProvider::builder(API_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_millis(500))
        .build()
        .expect("provider should build");

    WeatherLookup::new(Box::new(provider))
}

/// Body in OpenWeather's own field order: `coord` first, `cod` last.
fn weather_body(city: &str, description: &str, temp: f64) -> String {
    format!(
        r#"{{"coord":{{"lon":120.16,"lat":30.29}},"weather":[{{"id":800,"main":"Clear","description":"{description}","icon":"01d"}}],"main":{{"temp":{temp},"feels_like":{temp},"humidity":40}},"dt":1700000000,"name":"{city}","cod":200}}"#
    )
}

fn weather_response(city: &str, description: &str, temp: f64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(weather_body(city, description, temp), "application/json")
}

#[test]
fn mock_weather_body_keeps_provider_field_order() {
    let body = weather_body("Hangzhou", "clear sky", 20.0);

    assert!(body.starts_with(r#"{"coord""#));
    serde_json::from_str::<serde_json::Value>(&body).expect("mock body must be valid JSON");
}

#[tokio::test]
async fn successful_lookup_sends_key_city_and_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", API_KEY))
        .and(query_param("q", "Hangzhou"))
        .and(query_param("units", "metric"))
        .respond_with(weather_response("Hangzhou", "clear sky", 18.26))
        .expect(1)
        .mount(&server)
        .await;

    let report = lookup_for(&server).report("Hangzhou").await;

    assert_eq!(report.status, ToolStatus::Success);
    assert_eq!(
        report.report,
        "The weather in Hangzhou is clear sky with a temperature of 18.3 degrees Celsius."
    );
}

#[tokio::test]
async fn city_with_spaces_and_symbols_arrives_intact() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Rio de Janeiro&units=imperial"))
        .and(query_param("units", "metric"))
        .respond_with(weather_response("Rio de Janeiro", "few clouds", 29.0))
        .expect(1)
        .mount(&server)
        .await;

    let result = lookup_for(&server).fetch("Rio de Janeiro&units=imperial").await;

    match result {
        LookupResult::Success(snapshot) => assert_eq!(snapshot.city, "Rio de Janeiro"),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_city_returns_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"{"cod":"404","message":"city not found"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let report = lookup_for(&server).report("Atlantis").await;

    assert_eq!(report.status, ToolStatus::Error);
    assert_eq!(report.report, "weather provider returned error 404: city not found");
}

#[tokio::test]
async fn error_marker_with_ok_status_is_still_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"cod":"429","message":"rate limited","name":"Hangzhou","weather":[],"main":{"temp":1}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let result = lookup_for(&server).fetch("Hangzhou").await;

    assert_eq!(
        result,
        LookupResult::Failure("weather provider returned error 429: rate limited".into())
    );
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = lookup_for(&server).fetch("Hangzhou").await;

    match result {
        LookupResult::Failure(reason) => {
            assert!(reason.starts_with("failed to parse weather provider response"))
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_conditions_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"weather":[],"main":{"temp":4.0},"name":"Oslo","cod":200}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let report = lookup_for(&server).report("Oslo").await;

    assert_eq!(report.status, ToolStatus::Error);
    assert!(report.report.contains("no weather conditions"));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            weather_response("Hangzhou", "clear sky", 20.0)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = lookup_for(&server).fetch("Hangzhou").await;

    match result {
        LookupResult::Failure(reason) => {
            assert!(reason.starts_with("request to weather provider failed"));
            assert!(!reason.contains(API_KEY));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure_without_api_key() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let uri = format!("http://{}", listener.local_addr().expect("local addr"));
    drop(listener);

    let provider = OpenWeatherProvider::builder(API_KEY)
        .base_url(uri)
        .timeout(Duration::from_millis(500))
        .build()
        .expect("provider should build");

    let result = WeatherLookup::new(Box::new(provider)).fetch("Hangzhou").await;

    match result {
        LookupResult::Failure(reason) => {
            assert!(reason.starts_with("request to weather provider failed"));
            assert!(!reason.contains(API_KEY));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn tool_call_round_trip_through_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "Hangzhou"))
        .respond_with(weather_response("Hangzhou", "clear sky", 22.0))
        .mount(&server)
        .await;

    let tools = WeatherTools::new(lookup_for(&server));
    let out = tools
        .call(GET_WEATHER_REPORT, json!({ "city": "Hangzhou" }))
        .await
        .expect("tool call should dispatch");

    assert_eq!(
        out,
        json!({
            "status": "success",
            "report": "The weather in Hangzhou is clear sky with a temperature of 22.0 degrees Celsius."
        })
    );
}
