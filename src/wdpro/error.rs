//! Error kinds surfaced by the client.

/// Errors from token acquisition and resource requests.
///
/// Token errors propagate unchanged through every resource call that needed
/// the token. Nothing is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token or resource endpoint could not be reached (connect failure,
    /// timeout, broken body stream).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The token endpoint answered 200 but the body lacked a usable
    /// `access_token` / `expires_in` pair.
    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// The token endpoint answered with something other than 200.
    #[error("unexpected status code from token endpoint: {0}")]
    UnexpectedStatus(u16),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// Status code carried by [`Error::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus(code) => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
