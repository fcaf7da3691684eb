use std::time::Duration;
use thiserror::Error;

/// Message shown when nothing more specific is known about a failure.
pub const FALLBACK_MESSAGE: &str = "Upload failed";

/// Input rejected before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a Document Type.")]
    MissingDocumentType,
    #[error("Please select at least one file.")]
    NoFiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Application,
    Transport,
}

/// Everything that can end a dispatched submission in `Failed`.
///
/// Input problems never get this far; they surface as [`SubmitRejected::Invalid`].
///
/// `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The endpoint answered with a structured `error` string.
    #[error("{0}")]
    Application(String),
    #[error("{0}")]
    Transport(String),
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),
    #[error("Failed to read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{}", FALLBACK_MESSAGE)]
    Unknown,
}

impl UploadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::Application(_) => ErrorKind::Application,
            UploadError::Transport(_)
            | UploadError::Timeout(_)
            | UploadError::ReadFile { .. }
            | UploadError::Unknown => ErrorKind::Transport,
        }
    }

    /// Wraps a transport description, falling back when it is blank.
    pub fn transport(description: impl Into<String>) -> Self {
        let description = description.into();
        if description.trim().is_empty() {
            UploadError::Unknown
        } else {
            UploadError::Transport(description)
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::transport(err.to_string())
    }
}

/// Why `begin_submit` refused to start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_form_copy() {
        assert_eq!(
            ValidationError::MissingDocumentType.to_string(),
            "Please enter a Document Type."
        );
        assert_eq!(
            ValidationError::NoFiles.to_string(),
            "Please select at least one file."
        );
    }

    #[test]
    fn blank_transport_description_falls_back() {
        let err = UploadError::transport("   ");
        assert!(matches!(err, UploadError::Unknown));
        assert_eq!(err.user_message(), "Upload failed");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn timeout_reads_like_a_transport_description() {
        let err = UploadError::Timeout(Duration::from_secs(180));
        assert_eq!(err.to_string(), "timeout of 180000ms exceeded");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn application_error_is_verbatim() {
        let err = UploadError::Application("OCR engine unavailable".into());
        assert_eq!(err.to_string(), "OCR engine unavailable");
        assert_eq!(err.kind(), ErrorKind::Application);
    }
}
