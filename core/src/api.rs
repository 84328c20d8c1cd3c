//! HTTP API server
//!
//! Two endpoints: `POST /api/plan-trip` runs the orchestrator once and
//! returns the combined report plus the structured summary;
//! `GET /api/health` reports static status.

use crate::orchestrator::Orchestrator;
use crate::trip::{TripRequest, TripSummary};
use crate::PlannerError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// API server state
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Wire shape of a plan-trip request. Dates are YYYY-MM-DD strings;
/// passengers, budget, and interests carry the classic defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripBody {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default = "default_budget")]
    pub budget: u32,
    #[serde(default = "default_interests")]
    pub interests: String,
}

fn default_passengers() -> u32 {
    2
}

fn default_budget() -> u32 {
    2000
}

fn default_interests() -> String {
    "architecture, food, beaches, culture".to_string()
}

impl PlanTripBody {
    fn into_trip_request(self) -> Result<TripRequest, PlannerError> {
        let departure_date: NaiveDate = self
            .departure_date
            .parse()
            .map_err(|_| PlannerError::Validation("Invalid departure date".to_string()))?;
        let return_date: NaiveDate = self
            .return_date
            .parse()
            .map_err(|_| PlannerError::Validation("Invalid return date".to_string()))?;
        let request = TripRequest {
            origin: self.origin,
            destination: self.destination,
            departure_date,
            return_date,
            passengers: self.passengers,
            budget: self.budget,
            interests: self.interests,
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TripSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build the API router with CORS enabled
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/plan-trip", post(plan_trip_handler))
        .route("/api/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the API on the given address until the process exits
pub async fn serve(
    state: ApiState,
    addr: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        target: "api",
        url = %format!("http://{}", addr),
        "Travel planner API ready"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn plan_trip_handler(
    State(state): State<ApiState>,
    Json(body): Json<PlanTripBody>,
) -> impl IntoResponse {
    let request = match body.into_trip_request() {
        Ok(request) => request,
        Err(e) => {
            warn!(target: "api", error = %e, "Rejected plan-trip request");
            return (
                StatusCode::BAD_REQUEST,
                Json(PlanTripResponse {
                    success: false,
                    plan: None,
                    summary: None,
                    error: Some(e.to_string()),
                }),
            );
        }
    };

    match state.orchestrator.plan_trip(&request).await {
        Ok(report) => (
            StatusCode::OK,
            Json(PlanTripResponse {
                success: true,
                plan: Some(report.text),
                summary: Some(report.summary),
                error: None,
            }),
        ),
        Err(e) => {
            warn!(target: "api", error = %e, "Trip planning failed");
            let status = match e {
                PlannerError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(PlanTripResponse {
                    success: false,
                    plan: None,
                    summary: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Travel Planner API is running",
    })
}
