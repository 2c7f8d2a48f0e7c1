//! Error types for the Intervue toolkit.

use thiserror::Error;

/// A shared error type for the remote-resource side of Intervue.
///
/// The chat relay and the media session never surface this type to their
/// callers; they absorb failures into placeholder output instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervueError {
    /// Remote API answered with a non-success status.
    ///
    /// `body` holds the decoded JSON error body, or `{}` when the body was
    /// not valid JSON.
    #[error("{provider} API error: {status} {status_text}. {body}")]
    Api {
        provider: &'static str,
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote answered successfully but carried no usable entity.
    #[error("{0}")]
    NotFound(String),

    /// A provider credential is not configured.
    #[error("{provider} API key is not configured. Set it in secret.json or via {env_var}")]
    MissingCredential {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl IntervueError {
    /// Creates an Api error from a response status and its decoded body.
    pub fn api(
        provider: &'static str,
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::Api {
            provider,
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns the HTTP status when this error came from a remote response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for IntervueError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for IntervueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON - {err}"))
    }
}

impl From<toml::de::Error> for IntervueError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML - {err}"))
    }
}

/// A type alias for `Result<T, IntervueError>`.
pub type Result<T> = std::result::Result<T, IntervueError>;
