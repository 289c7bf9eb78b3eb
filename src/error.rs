use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("AWS_BEARER_TOKEN_BEDROCK not found in environment variables")]
    MissingBearerToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed model response: {detail}")]
    MalformedResponse { detail: String },

    #[error("{detail}")]
    Transport { detail: String },
}

impl TurnError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Transport { .. } => "transport",
        }
    }
}
