use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Run cancelled")]
    Cancelled,
}

impl ResolveError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }

    /// Whether the failure came from the remote side (network or status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ResolveError::Transport(_) | ResolveError::Status { .. }
        )
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => ResolveError::Status {
                status: status.as_u16(),
                url: error.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None if error.is_decode() => ResolveError::Decode(error.to_string()),
            None => ResolveError::Transport(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(error: serde_json::Error) -> Self {
        ResolveError::Decode(error.to_string())
    }
}

impl Serialize for ResolveError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
