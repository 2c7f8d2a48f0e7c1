//! Application layer for Intervue.
//!
//! Coordinates the device, relay and remote-resource adapters into the
//! flows a front end drives: acquiring media for a session, running a text
//! interview, and browsing past conversations.

pub mod conversation_browser;
pub mod interview_usecase;
pub mod media_session;

pub use conversation_browser::{BrowserSnapshot, ConversationBrowser, SelectionOutcome};
pub use interview_usecase::InterviewUseCase;
pub use media_session::{AcquireOutcome, MediaSession};
