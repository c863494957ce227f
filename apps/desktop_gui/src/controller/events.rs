//! UI/backend events and error modeling for the desktop controller.
//!
//! Every backend event carries the attempt token it was produced for; the app
//! drops events whose token no longer matches the current attempt, so a
//! superseded or reset-out interaction never corrupts the current view.

use assessment_client::ClientError;
use shared::{domain::AttemptId, protocol::AssessmentResponse};

use crate::ui::app::PreviewImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    PreviewLoaded {
        attempt: AttemptId,
        image: PreviewImage,
    },
    PreviewFailed {
        attempt: AttemptId,
        reason: String,
    },
    AssessmentCompleted {
        attempt: AttemptId,
        outcome: Result<AssessmentResponse, UiError>,
    },
    ResultImageLoaded {
        attempt: AttemptId,
        image: PreviewImage,
    },
    ResultImageFailed {
        attempt: AttemptId,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Server,
    Transport,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn new(category: UiErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Client-side rejection: shown verbatim, never reaches the network.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(UiErrorCategory::Validation, message)
    }

    /// Non-2xx answer from the service: the body text is the message, shown
    /// verbatim with no prefix.
    pub fn server_rejection(message: impl Into<String>) -> Self {
        Self::new(UiErrorCategory::Server, message)
    }

    /// The request never completed. These carry the `Error: ` prefix the
    /// error view has always shown for exception-path failures.
    pub fn request_failure(message: impl Into<String>) -> Self {
        Self::new(
            UiErrorCategory::Transport,
            format!("Error: {}", message.into()),
        )
    }

    pub fn from_client_error(err: &ClientError) -> Self {
        match err {
            ClientError::Rejected { message, .. } => Self::server_rejection(message.clone()),
            ClientError::Transport(source) => Self::request_failure(source.to_string()),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
