//! Flight Agent
//!
//! Issues one LLM completion with a structured prompt asking for
//! ranked flight options, price bands, booking-timing advice, baggage
//! policy, and tips. The response is treated as opaque prose.

use super::{Agent, AgentResult};
use crate::llm::CompletionBackend;
use crate::trip::TripRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PROMPT: &str =
    "You are an expert flight search assistant providing detailed flight recommendations.";

pub struct FlightAgent {
    backend: Arc<dyn CompletionBackend>,
}

impl FlightAgent {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    fn build_prompt(request: &TripRequest) -> String {
        let preferences = if request.interests.trim().is_empty() {
            "Best value"
        } else {
            request.interests.as_str()
        };
        format!(
            "Find and recommend flights for this trip:\n\n\
             FROM: {origin}\n\
             TO: {destination}\n\
             DEPARTURE: {departure}\n\
             RETURN: {ret}\n\
             PASSENGERS: {passengers}\n\
             PREFERENCES: {preferences}\n\n\
             Provide:\n\n\
             1. RECOMMENDED FLIGHTS (3-5 options)\n\
                For each option include:\n\
                - Airline name\n\
                - Flight numbers\n\
                - Departure/arrival times\n\
                - Duration and layovers\n\
                - Price estimate per person\n\
                - Pros and cons\n\n\
             2. PRICE COMPARISON\n\
                - Economy class range\n\
                - Premium economy (if available)\n\n\
             3. BEST TIME TO BOOK\n\
                - Current price trend\n\n\
             4. BAGGAGE INFO\n\
                - Carry-on and checked bag allowances\n\n\
             5. INSIDER TIPS\n\
                - Best days to fly\n\
                - How to save money\n\n\
             Make it scannable. Include real airline names and realistic prices.",
            origin = request.origin,
            destination = request.destination,
            departure = request.departure_date,
            ret = request.return_date,
            passengers = request.passengers,
        )
    }

    /// Search flights and return the model's recommendations verbatim
    pub async fn search_flights(&self, request: &TripRequest) -> AgentResult<String> {
        debug!(
            target: "flight",
            origin = %request.origin,
            destination = %request.destination,
            "Requesting flight recommendations"
        );
        let prompt = Self::build_prompt(request);
        self.backend.complete(SYSTEM_PROMPT, &prompt).await
    }
}

#[async_trait]
impl Agent for FlightAgent {
    fn name(&self) -> String {
        "flights".to_string()
    }

    fn description(&self) -> String {
        "Flight recommendations and booking advice".to_string()
    }

    async fn execute(&self, request: &TripRequest) -> AgentResult<String> {
        self.search_flights(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_route_and_defaults_preferences() {
        let request = TripRequest {
            origin: "San Francisco".to_string(),
            destination: "Barcelona".to_string(),
            departure_date: "2025-12-15".parse().unwrap(),
            return_date: "2025-12-22".parse().unwrap(),
            passengers: 2,
            budget: 2000,
            interests: String::new(),
        };
        let prompt = FlightAgent::build_prompt(&request);
        assert!(prompt.contains("FROM: San Francisco"));
        assert!(prompt.contains("TO: Barcelona"));
        assert!(prompt.contains("DEPARTURE: 2025-12-15"));
        assert!(prompt.contains("PASSENGERS: 2"));
        assert!(prompt.contains("PREFERENCES: Best value"));
    }
}
