//! External service adapters for Intervue.
//!
//! - [`GeminiApiAgent`]: chat completions over the Gemini REST API
//! - [`InterviewService`]: the interview chat relay built on a chat agent
//! - [`TavusClient`]: replicas, personas and conversations
//! - [`ConversationDetailClient`]: transcript and analysis aggregator
//! - [`ReqwestTransport`]: the production HTTP transport

pub mod conversation_detail;
pub mod gemini_api_agent;
pub mod interview_service;
pub mod prompts;
mod response;
pub mod reqwest_transport;
pub mod tavus_client;

#[cfg(test)]
mod test_support;

pub use conversation_detail::{ConversationDetailClient, ConversationDetailSource};
pub use gemini_api_agent::GeminiApiAgent;
pub use interview_service::InterviewService;
pub use reqwest_transport::ReqwestTransport;
pub use tavus_client::{ConversationCatalog, ConversationOptions, TavusClient};
