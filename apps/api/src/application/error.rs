use thiserror::Error;

/// Checks that run before anything is read or sent. Always recoverable:
/// the form goes back to editing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please attach your resume before submitting")]
    MissingAttachment,

    #[error("Attachment is {size} bytes; the limit is {limit} bytes")]
    AttachmentTooLarge { size: usize, limit: usize },

    #[error("Please answer all {expected} questions ({answered} answered)")]
    IncompleteAnswers { expected: usize, answered: usize },
}

/// The attachment could not be turned into its transport encoding.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Attachment '{filename}' could not be read: {source}")]
    Unreadable {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// The relay did not accept the notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Could not reach the mail service: {0}")]
    NetworkFailure(String),

    #[error("Mail service rejected the submission (status {status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("Mail service did not respond in time")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl ApplicationError {
    /// Short machine-readable reason, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            ApplicationError::Validation(ValidationError::MissingAttachment) => {
                "MISSING_ATTACHMENT"
            }
            ApplicationError::Validation(ValidationError::AttachmentTooLarge { .. }) => {
                "ATTACHMENT_TOO_LARGE"
            }
            ApplicationError::Validation(ValidationError::IncompleteAnswers { .. }) => {
                "INCOMPLETE_ANSWERS"
            }
            ApplicationError::Encoding(_) => "ENCODING_FAILED",
            ApplicationError::Submission(SubmissionError::Timeout) => "SUBMISSION_TIMEOUT",
            ApplicationError::Submission(_) => "SUBMISSION_FAILED",
        }
    }

    /// Submission errors invite a retry; validation and encoding errors need the
    /// user to change the form first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::Submission(_))
    }
}
