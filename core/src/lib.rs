// Itinera Core Library
// Multi-agent travel planning: agents, orchestrator, chat engine, HTTP API

pub mod agents;
pub mod api;
pub mod chat;
pub mod gazetteer;
pub mod llm;
pub mod orchestrator;
pub mod trip;

// Export core types
pub use agents::{Agent, AgentError, AgentResult};
pub use llm::{CompletionBackend, LlmClient, LlmClientConfig};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use trip::{CombinedReport, TripRequest, TripSummary};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Agent error: {0}")]
    Agent(#[from] agents::AgentError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
