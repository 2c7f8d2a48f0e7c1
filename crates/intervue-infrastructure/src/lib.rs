//! Filesystem-backed configuration for Intervue.
//!
//! - [`IntervuePaths`]: where `config.toml` and `secret.json` live
//! - [`SecretServiceImpl`]: `secret.json` with environment fallbacks
//! - [`ConfigStorage`]: `config.toml` settings
//! - [`ClientConfigs`]: both merged into per-client configuration

pub mod client_configs;
pub mod config_storage;
pub mod paths;
pub mod secret_service;

pub use client_configs::ClientConfigs;
pub use config_storage::ConfigStorage;
pub use paths::IntervuePaths;
pub use secret_service::SecretServiceImpl;
