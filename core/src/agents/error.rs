use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Upstream call failed: {0}")]
    Upstream(String),

    #[error("Upstream credential not authorized")]
    Unauthorized,

    #[error("Upstream call timed out")]
    Timeout,

    #[error("Malformed upstream response: {0}")]
    Malformed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
