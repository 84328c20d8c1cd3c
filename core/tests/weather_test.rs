/// Tests for the weather agent: synthetic fallback shape, the permanent
/// switch to synthetic data on an unauthorized key, and the pure
/// packing-recommendation derivation, including the threshold
/// boundaries.
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use itinera_core::agents::weather::{ForecastDay, WeatherAgent, WeatherConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn day(avg: f64, rain: u32) -> ForecastDay {
    ForecastDay {
        date: date("2025-12-15"),
        min_temp: avg - 5.0,
        avg_temp: avg,
        max_temp: avg + 5.0,
        description: "partly cloudy".to_string(),
        humidity: 60,
        rain_chance: rain,
    }
}

fn offline_agent() -> WeatherAgent {
    WeatherAgent::with_config(WeatherConfig {
        base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        api_key: None,
        timeout_ms: 1_000,
    })
}

#[tokio::test]
async fn missing_key_serves_synthetic_forecast() {
    let agent = offline_agent();
    assert!(!agent.api_active());

    let forecast = agent.forecast("Barcelona", date("2025-12-15"), 5).await;
    assert_eq!(forecast.len(), 5);
    // Fixed formula: day i temperature = base + i
    for (i, day) in forecast.iter().enumerate() {
        assert_eq!(day.avg_temp, 20.0 + i as f64);
        assert_eq!(day.min_temp, 15.0 + i as f64);
        assert_eq!(day.max_temp, 25.0 + i as f64);
        assert_eq!(day.description, "partly cloudy");
        assert_eq!(day.rain_chance, if i % 2 == 0 { 20 } else { 10 });
    }
}

#[tokio::test]
async fn unauthorized_key_switches_to_synthetic_permanently() {
    // One-route upstream that rejects every forecast request with 401
    // and counts how often it is hit.
    let hits = Arc::new(AtomicUsize::new(0));
    let route_hits = Arc::clone(&hits);
    let app = Router::new().route(
        "/forecast",
        get(move || {
            let hits = Arc::clone(&route_hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::UNAUTHORIZED
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let agent = WeatherAgent::with_config(WeatherConfig {
        base_url: format!("http://{addr}"),
        api_key: Some("revoked-key".to_string()),
        timeout_ms: 5_000,
    });
    assert!(agent.api_active());

    // First call hits the upstream, gets 401, and falls back.
    let forecast = agent.forecast("Barcelona", date("2025-12-15"), 3).await;
    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast[0].avg_temp, 20.0);
    assert!(!agent.api_active());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // The switch is permanent for this instance: later calls go
    // straight to synthetic data without touching the network.
    let again = agent.forecast("Barcelona", date("2025-12-15"), 2).await;
    assert_eq!(again.len(), 2);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn synthetic_current_weather_has_live_shape() {
    let agent = offline_agent();
    let current = agent.current_weather("Barcelona").await;
    assert_eq!(current.temperature, 20.0);
    assert_eq!(current.description, "partly cloudy");
    assert_eq!(current.humidity, 65);
}

#[test]
fn warm_list_above_25() {
    let recs = WeatherAgent::derive_recommendations(&[day(26.0, 10), day(30.0, 10)]);
    assert!(recs.packing_list.iter().any(|i| i.contains("breathable")));
    assert!(!recs.packing_list.iter().any(|i| i == "Umbrella"));
}

#[test]
fn boundary_25_selects_moderate_list() {
    // Average of exactly 25.0 must NOT take the warm branch
    let recs = WeatherAgent::derive_recommendations(&[day(25.0, 10)]);
    assert!(recs
        .packing_list
        .iter()
        .any(|i| i == "Light jacket or sweater"));
    assert!(!recs.packing_list.iter().any(|i| i.contains("breathable")));
}

#[test]
fn boundary_15_selects_cold_list() {
    // Average of exactly 15.0 must NOT take the moderate branch
    let recs = WeatherAgent::derive_recommendations(&[day(15.0, 10)]);
    assert!(recs.packing_list.iter().any(|i| i == "Warm jacket"));
    assert!(!recs
        .packing_list
        .iter()
        .any(|i| i == "Light jacket or sweater"));
}

#[test]
fn rain_above_50_appends_umbrella() {
    let recs = WeatherAgent::derive_recommendations(&[day(20.0, 51), day(20.0, 10)]);
    assert!(recs.packing_list.iter().any(|i| i == "Umbrella"));
    assert!(recs.packing_list.iter().any(|i| i == "Rain jacket"));
}

#[test]
fn rain_at_exactly_50_does_not_append_umbrella() {
    let recs = WeatherAgent::derive_recommendations(&[day(20.0, 50)]);
    assert!(!recs.packing_list.iter().any(|i| i == "Umbrella"));
}

#[test]
fn extreme_temperatures_produce_warnings() {
    let hot = WeatherAgent::derive_recommendations(&[day(36.0, 0)]);
    assert_eq!(hot.warnings.len(), 1);
    assert!(hot.warnings[0].contains("heat"));

    let cold = WeatherAgent::derive_recommendations(&[day(-1.0, 0)]);
    assert_eq!(cold.warnings.len(), 1);
    assert!(cold.warnings[0].contains("Freezing"));

    let mild = WeatherAgent::derive_recommendations(&[day(20.0, 0)]);
    assert!(mild.warnings.is_empty());
}

#[test]
fn empty_forecast_yields_empty_recommendations() {
    let recs = WeatherAgent::derive_recommendations(&[]);
    assert!(recs.packing_list.is_empty());
    assert!(recs.warnings.is_empty());
}

#[test]
fn summary_flags_rain_above_30_and_caps_at_five_days() {
    let forecast: Vec<ForecastDay> = (0..7).map(|i| day(20.0 + i as f64, 35)).collect();
    let recs = WeatherAgent::derive_recommendations(&forecast);
    let summary = WeatherAgent::format_summary("Barcelona", &forecast, &recs);

    assert!(summary.contains("Weather for Barcelona"));
    assert!(summary.contains("(Rain: 35%)"));
    // Only the first five days are rendered
    assert_eq!(summary.matches("partly cloudy").count(), 5);
}
