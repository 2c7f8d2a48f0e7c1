//! Secret management service trait.
//!
//! Defines the interface for loading provider credentials.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for loading provider credentials.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secret files have appropriate permissions (e.g., 600 on Unix)
/// - Secrets are never logged or exposed in error messages
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    ///
    /// A missing secret file is not an error; implementations return an empty
    /// [`SecretConfig`] so absent credentials degrade the affected client.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
