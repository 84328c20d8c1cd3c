//! Weather Agent
//!
//! Fetches forecasts from OpenWeatherMap. While the API credential is
//! missing or not yet authorized (401), the agent serves a synthetic
//! forecast with the same shape as the live data, so downstream
//! consumers never special-case the fallback.

use super::{Agent, AgentError, AgentResult};
use crate::trip::TripRequest;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the weather agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API endpoint base (default: OpenWeatherMap 2.5)
    pub base_url: String,
    /// API credential; when absent the agent stays on synthetic data
    pub api_key: Option<String>,
    /// Timeout for API requests in milliseconds
    pub timeout_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            timeout_ms: 10_000,
        }
    }
}

/// One day of forecast data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub description: String,
    pub humidity: u32,
    /// Rain probability, 0-100
    pub rain_chance: u32,
}

/// Current conditions for a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

/// Packing list, activity tips, and warnings derived from a forecast
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackingRecommendation {
    pub packing_list: Vec<String>,
    pub activity_tips: Vec<String>,
    pub warnings: Vec<String>,
}

/// OpenWeatherMap /forecast response (3-hourly entries)
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: EntryMain,
    weather: Vec<EntryWeather>,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct EntryMain {
    temp: f64,
    humidity: u32,
    #[serde(default)]
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct EntryWeather {
    description: String,
}

/// OpenWeatherMap /weather response
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: EntryMain,
    weather: Vec<EntryWeather>,
    wind: CurrentWind,
}

#[derive(Debug, Deserialize)]
struct CurrentWind {
    speed: f64,
}

/// Weather agent
pub struct WeatherAgent {
    config: WeatherConfig,
    http_client: reqwest::Client,
    /// Set to false permanently once the upstream reports 401
    api_active: AtomicBool,
}

impl WeatherAgent {
    /// Create a new weather agent with default configuration
    pub fn new() -> Self {
        Self::with_config(WeatherConfig::default())
    }

    /// Create a new weather agent with custom configuration
    pub fn with_config(config: WeatherConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let api_active = AtomicBool::new(config.api_key.is_some());
        Self {
            config,
            http_client,
            api_active,
        }
    }

    /// Whether the live upstream is still in use for this instance
    pub fn api_active(&self) -> bool {
        self.api_active.load(Ordering::Relaxed)
    }

    fn deactivate_api(&self) {
        warn!(target: "weather", "Weather API key not authorized; switching to synthetic data for this instance");
        self.api_active.store(false, Ordering::Relaxed);
    }

    /// Deterministic synthetic forecast used while the live API is
    /// unavailable. Day i: avg 20+i, min 15+i, max 25+i, rain chance
    /// alternating 20/10.
    pub fn synthetic_forecast(start_date: NaiveDate, days: u32) -> Vec<ForecastDay> {
        (0..days)
            .map(|i| ForecastDay {
                date: start_date + ChronoDuration::days(i as i64),
                min_temp: 15.0 + i as f64,
                avg_temp: 20.0 + i as f64,
                max_temp: 25.0 + i as f64,
                description: "partly cloudy".to_string(),
                humidity: 60,
                rain_chance: if i % 2 == 0 { 20 } else { 10 },
            })
            .collect()
    }

    fn synthetic_current() -> CurrentWeather {
        CurrentWeather {
            temperature: 20.0,
            feels_like: 18.0,
            description: "partly cloudy".to_string(),
            humidity: 65,
            wind_speed: 3.5,
        }
    }

    /// Get current conditions for a city, falling back to synthetic data
    pub async fn current_weather(&self, city: &str) -> CurrentWeather {
        if !self.api_active() {
            debug!(target: "weather", city = %city, "Using synthetic current weather");
            return Self::synthetic_current();
        }
        match self.fetch_current(city).await {
            Ok(current) => current,
            Err(AgentError::Unauthorized) => {
                self.deactivate_api();
                Self::synthetic_current()
            }
            Err(e) => {
                warn!(target: "weather", city = %city, error = %e, "Current weather fetch failed; using synthetic data");
                Self::synthetic_current()
            }
        }
    }

    /// Get a day-indexed forecast, falling back to synthetic data when
    /// the upstream is unreachable or unauthorized.
    pub async fn forecast(&self, city: &str, start_date: NaiveDate, days: u32) -> Vec<ForecastDay> {
        if !self.api_active() {
            debug!(target: "weather", city = %city, days, "Using synthetic forecast");
            return Self::synthetic_forecast(start_date, days);
        }
        match self.fetch_forecast(city, days).await {
            Ok(forecast) if !forecast.is_empty() => forecast,
            Ok(_) => {
                warn!(target: "weather", city = %city, "Empty forecast from API; using synthetic data");
                Self::synthetic_forecast(start_date, days)
            }
            Err(AgentError::Unauthorized) => {
                self.deactivate_api();
                Self::synthetic_forecast(start_date, days)
            }
            Err(e) => {
                warn!(target: "weather", city = %city, error = %e, "Forecast fetch failed; using synthetic data");
                Self::synthetic_forecast(start_date, days)
            }
        }
    }

    async fn fetch_current(&self, city: &str) -> AgentResult<CurrentWeather> {
        debug!(target: "weather", city = %city, "Fetching current weather");
        let url = format!("{}/weather", self.config.base_url);
        let resp = self
            .http_client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_deref().unwrap_or("")),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| AgentError::Upstream(format!("Weather API request failed: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AgentError::Unauthorized);
        }
        if !status.is_success() {
            return Err(AgentError::Upstream(format!(
                "Weather API returned status: {status}"
            )));
        }

        let data: CurrentResponse = resp
            .json()
            .await
            .map_err(|e| AgentError::Malformed(format!("Failed to parse weather response: {e}")))?;

        let description = data
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(CurrentWeather {
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            description,
            humidity: data.main.humidity,
            wind_speed: data.wind.speed,
        })
    }

    async fn fetch_forecast(&self, city: &str, days: u32) -> AgentResult<Vec<ForecastDay>> {
        debug!(target: "weather", city = %city, days, "Fetching forecast");
        let url = format!("{}/forecast", self.config.base_url);
        let cnt = (days * 8).to_string();
        let resp = self
            .http_client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_deref().unwrap_or("")),
                ("units", "metric"),
                ("cnt", cnt.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AgentError::Upstream(format!("Weather API request failed: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AgentError::Unauthorized);
        }
        if !status.is_success() {
            return Err(AgentError::Upstream(format!(
                "Weather API returned status: {status}"
            )));
        }

        let data: ForecastResponse = resp
            .json()
            .await
            .map_err(|e| AgentError::Malformed(format!("Failed to parse forecast response: {e}")))?;

        Ok(bucket_daily(&data.list))
    }

    /// Pure derivation of packing recommendations from a forecast.
    /// Thresholds are strict: avg > 25 warm, avg > 15 moderate, else cold.
    pub fn derive_recommendations(forecast: &[ForecastDay]) -> PackingRecommendation {
        let mut recs = PackingRecommendation::default();
        if forecast.is_empty() {
            return recs;
        }

        let temps: Vec<f64> = forecast.iter().map(|d| d.avg_temp).collect();
        let avg_temp = temps.iter().sum::<f64>() / temps.len() as f64;
        let max_temp = temps.iter().cloned().fold(f64::MIN, f64::max);
        let min_temp = temps.iter().cloned().fold(f64::MAX, f64::min);

        if avg_temp > 25.0 {
            recs.packing_list.extend([
                "Light, breathable clothing".to_string(),
                "Sunscreen (SPF 30+)".to_string(),
                "Sunglasses".to_string(),
                "Hat for sun protection".to_string(),
                "Water bottle".to_string(),
            ]);
            recs.activity_tips
                .push("Plan outdoor activities for mornings before peak heat".to_string());
        } else if avg_temp > 15.0 {
            recs.packing_list.extend([
                "Light jacket or sweater".to_string(),
                "Comfortable walking shoes".to_string(),
                "Light layers".to_string(),
            ]);
        } else {
            recs.packing_list.extend([
                "Warm jacket".to_string(),
                "Scarf and gloves".to_string(),
                "Warm layers".to_string(),
                "Waterproof boots".to_string(),
            ]);
            recs.activity_tips
                .push("Keep indoor options handy for the coldest hours".to_string());
        }

        let rain_days = forecast.iter().filter(|d| d.rain_chance > 50).count();
        if rain_days > 0 {
            recs.packing_list.extend([
                "Umbrella".to_string(),
                "Rain jacket".to_string(),
                "Waterproof shoes".to_string(),
            ]);
        }

        if max_temp > 35.0 {
            recs.warnings
                .push("Extreme heat expected - stay hydrated!".to_string());
        } else if min_temp < 0.0 {
            recs.warnings
                .push("Freezing temperatures expected - dress warmly!".to_string());
        }

        recs
    }

    /// Render the forecast and recommendations as the weather section text
    pub fn format_summary(
        city: &str,
        forecast: &[ForecastDay],
        recs: &PackingRecommendation,
    ) -> String {
        let mut summary = format!("## Weather for {city}\n\nForecast:\n");
        for day in forecast.iter().take(5) {
            summary.push_str(&format!(
                "- {}: {:.0}C - {:.0}C, {}",
                day.date, day.min_temp, day.max_temp, day.description
            ));
            if day.rain_chance > 30 {
                summary.push_str(&format!(" (Rain: {}%)", day.rain_chance));
            }
            summary.push('\n');
        }

        summary.push_str("\nPack:\n");
        for item in recs.packing_list.iter().take(5) {
            summary.push_str(&format!("- {item}\n"));
        }

        if !recs.warnings.is_empty() {
            summary.push_str("\nWarnings:\n");
            for warning in &recs.warnings {
                summary.push_str(&format!("- {warning}\n"));
            }
        }

        summary
    }
}

impl Default for WeatherAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for WeatherAgent {
    fn name(&self) -> String {
        "weather".to_string()
    }

    fn description(&self) -> String {
        "Forecast and packing recommendations".to_string()
    }

    async fn execute(&self, request: &TripRequest) -> AgentResult<String> {
        let days = request.days();
        if days <= 0 {
            return Err(AgentError::InvalidInput(
                "Trip length must be positive".to_string(),
            ));
        }
        let forecast = self
            .forecast(&request.destination, request.departure_date, days as u32)
            .await;
        let recs = Self::derive_recommendations(&forecast);
        Ok(Self::format_summary(&request.destination, &forecast, &recs))
    }
}

/// Collapse 3-hourly forecast entries into per-day aggregates:
/// avg/min/max temperature, most frequent description, mean humidity,
/// max precipitation probability as rain chance.
fn bucket_daily(entries: &[ForecastEntry]) -> Vec<ForecastDay> {
    struct DayBucket {
        temps: Vec<f64>,
        descriptions: Vec<String>,
        humidity: Vec<u32>,
        rain_chance: f64,
    }

    let mut order: Vec<NaiveDate> = Vec::new();
    let mut buckets: HashMap<NaiveDate, DayBucket> = HashMap::new();

    for entry in entries {
        let Some(dt) = chrono::DateTime::<Utc>::from_timestamp(entry.dt, 0) else {
            continue;
        };
        let date = dt.date_naive();
        let bucket = buckets.entry(date).or_insert_with(|| {
            order.push(date);
            DayBucket {
                temps: Vec::new(),
                descriptions: Vec::new(),
                humidity: Vec::new(),
                rain_chance: 0.0,
            }
        });
        bucket.temps.push(entry.main.temp);
        if let Some(w) = entry.weather.first() {
            bucket.descriptions.push(w.description.clone());
        }
        bucket.humidity.push(entry.main.humidity);
        bucket.rain_chance = bucket.rain_chance.max(entry.pop * 100.0);
    }

    order
        .into_iter()
        .filter_map(|date| {
            let bucket = buckets.remove(&date)?;
            if bucket.temps.is_empty() {
                return None;
            }
            let avg = bucket.temps.iter().sum::<f64>() / bucket.temps.len() as f64;
            let min = bucket.temps.iter().cloned().fold(f64::MAX, f64::min);
            let max = bucket.temps.iter().cloned().fold(f64::MIN, f64::max);
            let description = most_frequent(&bucket.descriptions)
                .unwrap_or_else(|| "unknown".to_string());
            let humidity = if bucket.humidity.is_empty() {
                0
            } else {
                (bucket.humidity.iter().sum::<u32>() as f64 / bucket.humidity.len() as f64).round()
                    as u32
            };
            Some(ForecastDay {
                date,
                min_temp: (min * 10.0).round() / 10.0,
                avg_temp: (avg * 10.0).round() / 10.0,
                max_temp: (max * 10.0).round() / 10.0,
                description,
                humidity,
                rain_chance: bucket.rain_chance.round() as u32,
            })
        })
        .collect()
}

/// Most common value; on count ties the first occurrence in the input wins.
fn most_frequent(values: &[String]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, v) in values.iter().enumerate() {
        counts.entry(v.as_str()).or_insert((0, i)).0 += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(_, (count, first_seen))| (count, std::cmp::Reverse(first_seen)))
        .map(|(v, _)| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_forecast_follows_formula() {
        let start: NaiveDate = "2025-12-15".parse().unwrap();
        let forecast = WeatherAgent::synthetic_forecast(start, 4);
        assert_eq!(forecast.len(), 4);
        assert_eq!(forecast[0].avg_temp, 20.0);
        assert_eq!(forecast[3].avg_temp, 23.0);
        assert_eq!(forecast[3].min_temp, 18.0);
        assert_eq!(forecast[3].max_temp, 28.0);
        assert_eq!(forecast[0].rain_chance, 20);
        assert_eq!(forecast[1].rain_chance, 10);
        assert_eq!(forecast[2].rain_chance, 20);
        assert_eq!(forecast[3].date, "2025-12-18".parse().unwrap());
    }

    #[test]
    fn most_frequent_prefers_first_on_tie() {
        let values = vec![
            "rain".to_string(),
            "clear".to_string(),
            "clear".to_string(),
            "rain".to_string(),
        ];
        assert_eq!(most_frequent(&values).as_deref(), Some("rain"));
    }

    #[test]
    fn most_frequent_picks_majority() {
        let values = vec![
            "clear".to_string(),
            "rain".to_string(),
            "rain".to_string(),
        ];
        assert_eq!(most_frequent(&values).as_deref(), Some("rain"));
        assert_eq!(most_frequent(&[]), None);
    }
}
