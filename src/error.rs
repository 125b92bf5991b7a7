use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Data integrity error in match {match_id}: {reason}")]
    DataIntegrity { match_id: String, reason: String },

    #[error("No ranked entry found for player {0}")]
    UnrankedPlayer(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl AppError {
    /// Numeric code handed to whatever renders the failure for a user.
    pub fn code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::PlayerNotFound(_) | AppError::UnrankedPlayer(_) => 404,
            AppError::RateLimited => 429,
            AppError::UpstreamUnavailable(_) | AppError::DataIntegrity { .. } => 502,
            AppError::ConfigError(_) | AppError::JsonError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::JsonError(e.to_string())
        } else {
            AppError::UpstreamUnavailable(e.to_string())
        }
    }
}

/// A single match that could not be resolved; the rest of the batch is unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("match {match_id}: {error}")]
pub struct MatchFailure {
    pub match_id: String,
    pub error: AppError,
}

impl MatchFailure {
    pub fn new(match_id: impl Into<String>, error: AppError) -> Self {
        MatchFailure {
            match_id: match_id.into(),
            error,
        }
    }
}
