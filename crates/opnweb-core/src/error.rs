// ── Core error types ──
//
// The record services return the most specific kind they can determine
// and never swallow a lower-layer error. Transport failures pass through
// unchanged; nothing is retried internally -- retry policy belongs to
// the caller.

use thiserror::Error;

use crate::mutation::MutationStep;

/// Unified error type for the record services.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Login or token capture failed. Fatal, no retry.
    #[error("authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Guard-rail: an operation ran before a session was established.
    /// The caller must re-authenticate.
    #[error("no authenticated session -- authenticate first")]
    Unauthenticated,

    /// The natural key is absent from the appliance. Expected during
    /// drift detection; not a fault.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Create collision: the natural key is already configured.
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: &'static str, key: String },

    /// The appliance rejected a mutation. Opaque by design: validation
    /// failures are reported in-page and are not parsed. `step` is the
    /// phase that failed -- a rejected apply after a successful submit
    /// means the change is staged on the appliance but not committed.
    #[error("mutation rejected during {step}: {message}")]
    MutationRejected { step: MutationStep, message: String },

    /// A caller-supplied composite identifier did not parse.
    #[error("invalid resource id {given:?}: expected {expected}")]
    InvalidResourceId { given: String, expected: &'static str },

    /// A page did not contain the structure scraping relies on.
    #[error("scrape failed: {message}")]
    Scrape { message: String },

    /// Network-level failure, propagated verbatim.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(url::ParseError),
}

impl From<opnweb_api::Error> for CoreError {
    fn from(err: opnweb_api::Error) -> Self {
        match err {
            opnweb_api::Error::Authentication { message } => Self::AuthenticationFailed { message },
            opnweb_api::Error::Unauthenticated => Self::Unauthenticated,
            opnweb_api::Error::Transport(e) => Self::Transport(e),
            opnweb_api::Error::InvalidUrl(e) => Self::InvalidUrl(e),
            opnweb_api::Error::Scrape { message } => Self::Scrape { message },
        }
    }
}
