use thiserror::Error;

/// Failure of a single dashboard action's remote operation.
///
/// Both kinds are terminal for the invocation that produced them; the
/// workflow turns them into [`crate::Settled::Failed`] and never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The request did not complete, or the body could not be parsed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered but reported failure or omitted the expected field.
    #[error("backend reported failure: {}", message.as_deref().unwrap_or("(no message)"))]
    Application { message: Option<String> },
}

impl ActionError {
    pub fn application(message: impl Into<String>) -> Self {
        ActionError::Application {
            message: Some(message.into()),
        }
    }
}

impl From<reqwest::Error> for ActionError {
    fn from(e: reqwest::Error) -> Self {
        ActionError::Transport(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SkypassError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SkypassError>;
