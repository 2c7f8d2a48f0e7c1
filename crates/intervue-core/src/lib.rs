//! Domain model and service seams for Intervue.
//!
//! Nothing in this crate talks to the network or the filesystem; adapters in
//! `intervue-interaction` and `intervue-infrastructure` implement the traits
//! defined here.

pub mod chat;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod message;
pub mod remote;
pub mod secret;
pub mod transcript;

// Re-export common error type
pub use error::{IntervueError, Result};
