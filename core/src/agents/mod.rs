//! Provider agents. Each wraps one external capability (an LLM
//! completion, a weather HTTP fetch, or pure URL templating) behind a
//! uniform text-in/text-out contract.

pub mod error;
pub mod flight;
pub mod itinerary;
pub mod links;
pub mod weather;

pub use error::{AgentError, AgentResult};
pub use flight::FlightAgent;
pub use itinerary::{ItineraryAgent, ItineraryGenerator};
pub use links::LinksAgent;
pub use weather::{ForecastDay, PackingRecommendation, WeatherAgent, WeatherConfig};

use crate::trip::TripRequest;
use async_trait::async_trait;

/// The core trait for all planner agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// The unique name of the agent (e.g., "links", "weather")
    fn name(&self) -> String;

    /// A human-readable description of what the agent contributes
    fn description(&self) -> String;

    /// Produce this agent's text block for one trip request
    async fn execute(&self, request: &TripRequest) -> AgentResult<String>;
}
