use std::path::PathBuf;

use thiserror::Error;

/// Coarse failure classification surfaced to the user.
///
/// Validation failures are caught before any network call; network and
/// shape failures come back from the remote services. Nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Shape,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Shape => write!(f, "shape"),
        }
    }
}

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("no input provided")]
    NoInput,

    #[error("could not extract a video ID from: {input}")]
    UnrecognizedLink { input: String },

    #[error("input is {tokens} tokens, over the {limit}-token budget")]
    BudgetExceeded { tokens: usize, limit: usize },

    #[error("unsupported video file: {}", path.display())]
    UnsupportedVideo { path: PathBuf },

    #[error("video file {} is {size} bytes, over the {limit}-byte upload limit", path.display())]
    VideoTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: &'static str },

    #[error("no captions available for video {video_id}")]
    NoCaptions { video_id: String },

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{service} response missing {what}")]
    MissingField {
        service: &'static str,
        what: &'static str,
    },

    #[error("error parsing caption XML: {reason}")]
    CaptionXml { reason: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NotesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotesError::NoInput
            | NotesError::UnrecognizedLink { .. }
            | NotesError::BudgetExceeded { .. }
            | NotesError::UnsupportedVideo { .. }
            | NotesError::VideoTooLarge { .. }
            | NotesError::MissingApiKey { .. }
            | NotesError::Io(_) => ErrorKind::Validation,

            NotesError::NoCaptions { .. } | NotesError::Status { .. } | NotesError::Http(_) => ErrorKind::Network,

            NotesError::MissingField { .. } | NotesError::CaptionXml { .. } | NotesError::Json(_) => ErrorKind::Shape,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_kinds() {
        assert_eq!(NotesError::NoInput.kind(), ErrorKind::Validation);
        assert_eq!(
            NotesError::UnrecognizedLink {
                input: "not-a-link".to_string()
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            NotesError::BudgetExceeded { tokens: 1001, limit: 1000 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            NotesError::MissingApiKey { env_var: "GEMINI_API_KEY" }.kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_network_kinds() {
        assert_eq!(
            NotesError::NoCaptions {
                video_id: "dQw4w9WgXcQ".to_string()
            }
            .kind(),
            ErrorKind::Network
        );
        assert_eq!(
            NotesError::Status {
                service: "Gemini API",
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }
            .kind(),
            ErrorKind::Network
        );
    }

    #[test]
    fn test_shape_kinds() {
        assert_eq!(
            NotesError::MissingField {
                service: "transcript API",
                what: "body field"
            }
            .kind(),
            ErrorKind::Shape
        );
        assert_eq!(
            NotesError::CaptionXml {
                reason: "unexpected EOF".to_string()
            }
            .kind(),
            ErrorKind::Shape
        );
    }

    #[test]
    fn test_display_messages() {
        let e = NotesError::BudgetExceeded { tokens: 1200, limit: 1000 };
        assert_eq!(e.to_string(), "input is 1200 tokens, over the 1000-token budget");

        let e = NotesError::MissingApiKey { env_var: "GEMINI_API_KEY" };
        assert!(e.to_string().contains("GEMINI_API_KEY"));
    }
}
