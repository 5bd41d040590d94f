// Error taxonomy for refinement runs

use thiserror::Error;

/// Errors surfaced by quill's core operations.
///
/// All three variants carry a human-readable description and propagate
/// unmodified up to the run boundary. The core never retries and never
/// substitutes placeholder artifacts; a failed call halts the run with
/// prior state intact.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid credentials, or a malformed configuration file.
    /// Surfaced before any completion call is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The completion service call failed: network, auth, quota, or a
    /// malformed response. Carries the upstream description.
    #[error("completion request failed: {0}")]
    Completion(String),

    /// Caller-supplied input rejected before any request was built.
    #[error("invalid input: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors raised by the completion service call itself.
    pub fn is_completion(&self) -> bool {
        matches!(self, Error::Completion(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description() {
        let err = Error::Completion("status 429: rate limited".to_string());
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("completion request failed"));
    }

    #[test]
    fn test_is_completion() {
        assert!(Error::Completion("x".into()).is_completion());
        assert!(!Error::Validation("x".into()).is_completion());
        assert!(!Error::Configuration("x".into()).is_completion());
    }
}
