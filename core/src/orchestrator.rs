//! Pipeline orchestrator: runs the agents in a fixed order and
//! concatenates their sections into one combined report.
//!
//! Stages run sequentially: Links -> Flights -> Weather -> Itinerary.
//! The itinerary stage consumes the weather stage's text. A failed
//! stage becomes an inline note in its section; later stages still run.

use crate::agents::{Agent, FlightAgent, ItineraryAgent, LinksAgent};
use crate::llm::CompletionBackend;
use crate::trip::{CombinedReport, TripRequest};
use crate::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Stage toggles. Links, weather, and flights can be switched off;
/// the itinerary stage always runs.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub show_booking_links: bool,
    pub show_weather: bool,
    pub show_flights: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            show_booking_links: true,
            show_weather: true,
            show_flights: true,
        }
    }
}

pub struct Orchestrator {
    config: OrchestratorConfig,
    links_agent: LinksAgent,
    flight_agent: FlightAgent,
    weather_agent: Arc<dyn Agent>,
    itinerary_agent: ItineraryAgent,
}

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Placeholder handed to the itinerary prompt when no forecast text exists
const NO_FORECAST_NOTE: &str = "(no forecast available)";

impl Orchestrator {
    pub fn new(backend: Arc<dyn CompletionBackend>, weather_agent: Arc<dyn Agent>) -> Self {
        Self::with_config(OrchestratorConfig::default(), backend, weather_agent)
    }

    pub fn with_config(
        config: OrchestratorConfig,
        backend: Arc<dyn CompletionBackend>,
        weather_agent: Arc<dyn Agent>,
    ) -> Self {
        Self {
            config,
            links_agent: LinksAgent::new(),
            flight_agent: FlightAgent::new(Arc::clone(&backend)),
            weather_agent,
            itinerary_agent: ItineraryAgent::new(backend),
        }
    }

    /// Plan a complete trip. Validates the request, runs the enabled
    /// stages, and concatenates their sections in order.
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<CombinedReport> {
        request.validate()?;

        info!(
            target: "orchestrator",
            origin = %request.origin,
            destination = %request.destination,
            days = request.days(),
            passengers = request.passengers,
            "Planning trip"
        );

        let mut sections: Vec<String> = Vec::new();

        if self.config.show_booking_links {
            sections.push(self.run_stage(&self.links_agent, request).await);
        }

        if self.config.show_flights {
            sections.push(self.run_stage(&self.flight_agent, request).await);
        }

        // The itinerary stage consumes the weather stage's text. A failed
        // weather stage still gets its apology section, but the itinerary
        // prompt receives the placeholder rather than the apology.
        let weather_summary = if self.config.show_weather {
            match self.weather_agent.execute(request).await {
                Ok(text) => {
                    sections.push(text.clone());
                    text
                }
                Err(e) => {
                    warn!(target: "orchestrator", agent = "weather", error = %e, "Stage failed");
                    sections.push(stage_failure_note(&self.weather_agent.name()));
                    NO_FORECAST_NOTE.to_string()
                }
            }
        } else {
            NO_FORECAST_NOTE.to_string()
        };

        let itinerary = match self
            .itinerary_agent
            .create_with_weather(request, &weather_summary)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(target: "orchestrator", agent = "itinerary", error = %e, "Stage failed");
                stage_failure_note(&self.itinerary_agent.name())
            }
        };
        sections.push(format!("## Your Complete Travel Plan\n\n{itinerary}"));

        let summary = request.summary();
        let header = format!(
            "# Trip Plan: {} to {}\n{} days, {} traveler(s), ${} per person (${} total)",
            summary.origin,
            summary.destination,
            summary.days,
            summary.passengers,
            summary.budget,
            summary.total_budget,
        );
        let footer = "Plan created by the multi-agent system:\n\
             - links: booking links\n\
             - flights: flight recommendations\n\
             - weather: forecast and packing recommendations\n\
             - itinerary: day-by-day planning";

        let mut text = header;
        for section in &sections {
            text.push_str(SECTION_SEPARATOR);
            text.push_str(section);
        }
        text.push_str(SECTION_SEPARATOR);
        text.push_str(footer);

        info!(target: "orchestrator", destination = %request.destination, "Trip planning complete");

        Ok(CombinedReport { text, summary })
    }

    async fn run_stage(&self, agent: &dyn Agent, request: &TripRequest) -> String {
        info!(target: "orchestrator", agent = %agent.name(), "Running stage");
        match agent.execute(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(target: "orchestrator", agent = %agent.name(), error = %e, "Stage failed");
                stage_failure_note(&agent.name())
            }
        }
    }
}

fn stage_failure_note(agent_name: &str) -> String {
    format!(
        "## {agent_name}\n\nSorry - the {agent_name} service was unavailable for this request. \
         The rest of your plan is unaffected; please retry later for this section."
    )
}
