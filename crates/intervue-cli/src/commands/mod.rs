pub mod chat;
pub mod init;
pub mod remote;

use anyhow::{Context, Result};
use intervue_core::http::HttpTransport;
use intervue_infrastructure::ClientConfigs;
use intervue_interaction::{
    ConversationDetailClient, InterviewService, ReqwestTransport, TavusClient,
};
use std::path::Path;
use std::sync::Arc;

/// Clients wired from the resolved configuration.
pub struct App {
    configs: ClientConfigs,
    transport: Arc<dyn HttpTransport>,
}

impl App {
    pub async fn load(config_dir: Option<&Path>) -> Result<Self> {
        let configs = ClientConfigs::load(config_dir)
            .await
            .context("Failed to load Intervue configuration")?;
        Ok(Self {
            configs,
            transport: Arc::new(ReqwestTransport::new()),
        })
    }

    pub fn tavus(&self) -> TavusClient {
        TavusClient::new(self.transport.clone(), self.configs.tavus.clone())
            .with_default_replica_id(self.configs.default_replica_id.clone())
    }

    pub fn conversation_details(&self) -> ConversationDetailClient {
        ConversationDetailClient::new(
            self.transport.clone(),
            self.configs.conversation_detail_url.clone(),
        )
    }

    pub fn interview_service(&self) -> InterviewService {
        InterviewService::from_config(
            self.transport.clone(),
            &self.configs.gemini,
            self.configs.gemini_model.clone(),
        )
    }
}
