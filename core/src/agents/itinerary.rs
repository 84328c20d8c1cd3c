//! Itinerary Agent
//!
//! Issues one LLM completion asking for a day-by-day plan that reacts
//! to the supplied weather text. The response is returned verbatim.
//! Also backs the chat engine's generation through the
//! [`ItineraryGenerator`] seam.

use super::{Agent, AgentResult};
use crate::llm::CompletionBackend;
use crate::trip::TripRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are an expert travel planner who creates detailed, \
     weather-aware, budget-conscious itineraries.";

const CHAT_SYSTEM_PROMPT: &str = "You are an expert travel planner who creates detailed, \
     engaging itineraries with specific recommendations, prices, and insider tips. \
     You write in a friendly, enthusiastic style.";

/// Generation seam used by the chat engine; implemented by
/// [`ItineraryAgent`] in production and by stubs in tests.
#[async_trait]
pub trait ItineraryGenerator: Send + Sync {
    /// Build a day-by-day itinerary for a destination. `context` holds
    /// the most recent conversation lines, oldest first.
    async fn generate(
        &self,
        destination: &str,
        days: u32,
        context: &[String],
    ) -> AgentResult<String>;
}

pub struct ItineraryAgent {
    backend: Arc<dyn CompletionBackend>,
}

impl ItineraryAgent {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    fn build_prompt(request: &TripRequest, weather_summary: &str) -> String {
        format!(
            "Create a {days}-day travel itinerary for {destination}.\n\
             Budget: ${budget} per person\n\
             Interests: {interests}\n\
             Start Date: {start}\n\n\
             WEATHER FORECAST:\n{weather}\n\n\
             Please provide a day-by-day itinerary that:\n\
             1. Takes weather conditions into account\n\
             2. Suggests indoor activities on rainy days\n\
             3. Optimizes outdoor activities for best weather\n\
             4. Includes estimated costs for each activity\n\
             5. Provides restaurant recommendations with price ranges\n\n\
             Format each day clearly with morning, afternoon, and evening activities.",
            days = request.days(),
            destination = request.destination,
            budget = request.budget,
            interests = request.interests,
            start = request.departure_date,
            weather = weather_summary,
        )
    }

    /// Generate an itinerary that reacts to the supplied weather text
    pub async fn create_with_weather(
        &self,
        request: &TripRequest,
        weather_summary: &str,
    ) -> AgentResult<String> {
        debug!(
            target: "itinerary",
            destination = %request.destination,
            days = request.days(),
            "Requesting weather-aware itinerary"
        );
        let prompt = Self::build_prompt(request, weather_summary);
        self.backend.complete(SYSTEM_PROMPT, &prompt).await
    }
}

#[async_trait]
impl Agent for ItineraryAgent {
    fn name(&self) -> String {
        "itinerary".to_string()
    }

    fn description(&self) -> String {
        "Day-by-day itinerary planning".to_string()
    }

    async fn execute(&self, request: &TripRequest) -> AgentResult<String> {
        self.create_with_weather(request, "(no forecast available)")
            .await
    }
}

#[async_trait]
impl ItineraryGenerator for ItineraryAgent {
    async fn generate(
        &self,
        destination: &str,
        days: u32,
        context: &[String],
    ) -> AgentResult<String> {
        debug!(
            target: "itinerary",
            destination = %destination,
            days,
            "Generating chat itinerary"
        );
        let conversation_context = context.join("\n");
        let prompt = format!(
            "Create a detailed, engaging {days}-day travel itinerary for {destination}.\n\n\
             Include:\n\
             1. A short introduction to the destination\n\
             2. Accommodation recommendations with price ranges\n\
             3. A budget overview broken down by category\n\
             4. For each day: morning, afternoon, and evening activities,\n\
                restaurant picks with price ranges, and one insider tip\n\
             5. Closing sections: transportation tips, what to pack, best times to visit\n\n\
             Include real place names whenever possible.\n\n\
             Previous conversation context:\n{conversation_context}"
        );
        self.backend.complete(CHAT_SYSTEM_PROMPT, &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_threads_weather_text_through() {
        let request = TripRequest {
            origin: "San Francisco".to_string(),
            destination: "Barcelona".to_string(),
            departure_date: "2025-12-15".parse().unwrap(),
            return_date: "2025-12-22".parse().unwrap(),
            passengers: 2,
            budget: 2000,
            interests: "architecture, food".to_string(),
        };
        let prompt = ItineraryAgent::build_prompt(&request, "rain on day 2");
        assert!(prompt.contains("7-day travel itinerary for Barcelona"));
        assert!(prompt.contains("WEATHER FORECAST:\nrain on day 2"));
        assert!(prompt.contains("Budget: $2000 per person"));
    }
}
