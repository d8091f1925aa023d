use thiserror::Error;

/// Errors raised while loading map data.
///
/// Kept `Clone` so it can sit inside a Dioxus resource and be re-thrown
/// into an error boundary on every render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("browser window is not available")]
    NoWindow,
}

impl MapError {
    pub fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        MapError::Decode {
            what,
            reason: err.to_string(),
        }
    }
}
