use thiserror::Error;

/// A network-level failure: no usable response was received at all.
/// These are the only failures the client retries.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("overall deadline of {after:?} exceeded before a response arrived")]
    Deadline { after: std::time::Duration },
}

/// Engine-level error type.
/// Every generation call surfaces exactly one of these to its caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller-fixable: a required input was missing or empty. No network
    /// call is made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Deployment error: GEMINI_API_KEY is absent. No network call is made.
    #[error("GEMINI_API_KEY is not configured")]
    NotConfigured,

    /// A task-kind name that does not resolve to any registered task.
    #[error("Unknown task kind: {0}")]
    UnknownTaskKind(String),

    /// All retry attempts failed at the transport level. Carries the last
    /// underlying error.
    #[error("Upstream unavailable after {attempts} attempts: {source}")]
    UpstreamUnavailable {
        attempts: u32,
        #[source]
        source: TransportError,
    },

    /// The endpoint answered, but the payload could not be decoded or did
    /// not conform to the requested schema. Never retried.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl EngineError {
    /// The HTTP status an embedding layer should map this error to.
    pub fn status_hint(&self) -> u16 {
        match self {
            EngineError::InvalidInput(_) | EngineError::UnknownTaskKind(_) => 400,
            EngineError::NotConfigured
            | EngineError::UpstreamUnavailable { .. }
            | EngineError::MalformedResponse(_) => 500,
        }
    }
}
