use shared::error::{DisplayError, ErrorCode};
use thiserror::Error;

pub const BLANK_CITY_MESSAGE: &str = "Please enter a city name.";
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred during generation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteEmptyKind {
    NoCandidate,
    NoImagePart,
    UndecodableImage,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("Please enter a city name.")]
    Validation,
    #[error("No response from AI.")]
    NoCandidate { block_reason: Option<String> },
    #[error("AI failed to return an image.")]
    NoImagePart,
    #[error("AI returned an unreadable image: {0}")]
    UndecodableImage(String),
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
    #[error("a map is already being generated")]
    Busy,
}

impl MapError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MapError::Validation => ErrorCode::Validation,
            MapError::NoCandidate { .. }
            | MapError::NoImagePart
            | MapError::UndecodableImage(_) => ErrorCode::RemoteEmpty,
            MapError::Transport { .. } => ErrorCode::Transport,
            MapError::Busy => ErrorCode::Busy,
        }
    }

    /// Which flavor of "nothing usable came back", if any.
    pub fn remote_empty_kind(&self) -> Option<RemoteEmptyKind> {
        match self {
            MapError::NoCandidate { .. } => Some(RemoteEmptyKind::NoCandidate),
            MapError::NoImagePart => Some(RemoteEmptyKind::NoImagePart),
            MapError::UndecodableImage(_) => Some(RemoteEmptyKind::UndecodableImage),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    pub fn to_display(&self) -> DisplayError {
        DisplayError::new(self.code(), self.user_message())
    }
}

impl From<reqwest::Error> for MapError {
    fn from(value: reqwest::Error) -> Self {
        MapError::Transport {
            status: value.status().map(|status| status.as_u16()),
            message: value.to_string(),
        }
    }
}
