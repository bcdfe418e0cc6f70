pub mod analyzer;
pub mod client;
pub mod enrich;
pub mod normalize;
pub mod parser;
pub mod prompt;
pub mod rules;

pub use analyzer::*;
pub use client::*;
pub use enrich::*;
pub use normalize::*;
pub use parser::*;
pub use prompt::*;
pub use rules::*;

use thiserror::Error;

/// Engine failure taxonomy. Every variant except `InvalidInput` is absorbed
/// inside the engine by degrading to the rule-based fallback; none of them
/// reach the calling workflow.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no API credential configured for the reasoning service")]
    MissingApiKey,

    #[error("cannot reach the reasoning service at {0}")]
    Connection(String),

    #[error("reasoning service call timed out after {0}s")]
    Timeout(u64),

    #[error("reasoning service returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("invalid analysis input: {0}")]
    InvalidInput(String),
}
