use itinera_core::OrchestratorConfig;
use std::fs;
use std::path::Path;

/// High-level configuration for the API server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub stages: OrchestratorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(5000),
            stages: OrchestratorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file (path via ITINERA_CONFIG or
    /// ./itinera.toml), overlaying values onto env-driven defaults.
    pub fn load() -> Self {
        let default = Self::default();
        let path = std::env::var("ITINERA_CONFIG").unwrap_or_else(|_| "itinera.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target: "server", path = %path, "No TOML config found; using defaults/env");
            return default;
        }
        match fs::read_to_string(p) {
            Ok(s) => match toml::from_str::<ServerToml>(&s) {
                Ok(t) => t.overlay(default),
                Err(e) => {
                    tracing::warn!(target: "server", error = %e, "Failed to parse TOML; using defaults");
                    default
                }
            },
            Err(e) => {
                tracing::warn!(target: "server", error = %e, "Failed to read TOML; using defaults");
                default
            }
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct ServerToml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub stages: Option<StagesToml>,
}

impl ServerToml {
    fn overlay(self, mut base: ServerConfig) -> ServerConfig {
        if let Some(h) = self.host {
            base.host = h;
        }
        if let Some(p) = self.port {
            base.port = p;
        }
        if let Some(s) = self.stages {
            s.apply(&mut base.stages);
        }
        base
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct StagesToml {
    pub show_booking_links: Option<bool>,
    pub show_weather: Option<bool>,
    pub show_flights: Option<bool>,
}

impl StagesToml {
    fn apply(self, s: &mut OrchestratorConfig) {
        if let Some(v) = self.show_booking_links {
            s.show_booking_links = v;
        }
        if let Some(v) = self.show_weather {
            s.show_weather = v;
        }
        if let Some(v) = self.show_flights {
            s.show_flights = v;
        }
    }
}
