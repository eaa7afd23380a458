use thiserror::Error;

/// Errors surfaced by the transport and scraping layer.
///
/// Transport failures pass through unchanged; nothing is retried here.
#[derive(Debug, Error)]
pub enum Error {
    /// Login failed or the anti-forgery token could not be captured from
    /// the root page. Fatal: the caller gets no session to work with.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// An operation was attempted before a CSRF token was captured.
    /// Guard-rail error -- the caller must authenticate first instead of
    /// letting a request silently scrape the login page.
    #[error("no authenticated session -- call login() first")]
    Unauthenticated,

    /// Network-level failure from the HTTP client, propagated verbatim.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(url::ParseError),

    /// The page did not contain the structure this layer relies on
    /// (signature table, header row, or hidden form input).
    #[error("scrape failed: {message}")]
    Scrape { message: String },
}
