pub mod extract;
pub mod gemini;
pub mod progress;
pub mod prompt;
pub mod reconcile;
pub mod schema;

pub use extract::*;
pub use gemini::*;
pub use progress::*;
pub use prompt::*;
pub use reconcile::*;
pub use schema::*;

use thiserror::Error;

/// Pipeline failure taxonomy. Every variant is terminal for the current
/// request; nothing is retried automatically; the caller offers a manual
/// resubmission. The distinction between kinds exists for logging and
/// diagnostics, not for differentiated user messaging.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis query must not be empty")]
    InvalidQuery,

    /// The response contained no `{` at all, or no closing structure could
    /// be located even via the last-brace fallback.
    #[error("model response contained no extractable JSON object")]
    NoJsonFound,

    /// A candidate substring was extracted but failed to parse. Carries a
    /// truncated copy of the offending text for diagnostics.
    #[error("extracted JSON failed to parse: {message}")]
    MalformedJson { message: String, snippet: String },

    /// The model call itself failed (network/auth/quota). Propagated as-is.
    #[error("model request failed: {0}")]
    Upstream(#[from] gemini::ModelError),

    /// The session guard rejected a duplicate submission.
    #[error("an analysis for \"{0}\" is already in flight")]
    AlreadyInFlight(String),
}
