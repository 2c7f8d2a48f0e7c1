//! Past-conversation browser: listing, search and detail selection.
//!
//! Detail fetches are keyed by the selection that triggered them. Selecting
//! another conversation cancels the pending fetch, and any response that
//! still arrives for a superseded selection is discarded instead of
//! overwriting the newer one.

use intervue_core::remote::{Conversation, ConversationDetail};
use intervue_core::Result;
use intervue_interaction::{ConversationCatalog, ConversationDetailSource};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// What happened to one `select` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Loaded(ConversationDetail),
    Failed(String),
    /// A newer selection took over before this one finished.
    Superseded,
}

/// Point-in-time copy of the browser state for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserSnapshot {
    pub conversations: Vec<Conversation>,
    pub selected_id: Option<String>,
    pub detail: Option<ConversationDetail>,
    pub loading_detail: bool,
    pub error: Option<String>,
}

struct Selection {
    conversation_id: String,
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Default)]
struct BrowserState {
    conversations: Vec<Conversation>,
    selection: Option<Selection>,
    detail: Option<ConversationDetail>,
    loading_detail: bool,
    error: Option<String>,
    generation: u64,
}

pub struct ConversationBrowser {
    catalog: Arc<dyn ConversationCatalog>,
    details: Arc<dyn ConversationDetailSource>,
    state: RwLock<BrowserState>,
}

impl ConversationBrowser {
    pub fn new(
        catalog: Arc<dyn ConversationCatalog>,
        details: Arc<dyn ConversationDetailSource>,
    ) -> Self {
        Self {
            catalog,
            details,
            state: RwLock::new(BrowserState::default()),
        }
    }

    /// Reloads the conversation list. On failure the previous list is kept
    /// and the error is recorded for display.
    pub async fn refresh(&self) -> Result<usize> {
        match self.catalog.list_conversations().await {
            Ok(conversations) => {
                let count = conversations.len();
                let mut state = self.state.write().await;
                state.conversations = conversations;
                state.error = None;
                tracing::info!(count, "Conversations loaded");
                Ok(count)
            }
            Err(err) => {
                tracing::error!("Error loading conversations: {}", err);
                self.state.write().await.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Conversations whose name or id contains `term`, case-insensitively.
    pub async fn search(&self, term: &str) -> Vec<Conversation> {
        self.state
            .read()
            .await
            .conversations
            .iter()
            .filter(|conversation| conversation.matches_search(term))
            .cloned()
            .collect()
    }

    /// Selects a conversation and loads its detail.
    ///
    /// Clears the previous detail and error immediately. The result is only
    /// applied if this is still the current selection when it arrives.
    pub async fn select(&self, conversation_id: &str) -> SelectionOutcome {
        let (generation, cancel) = {
            let mut state = self.state.write().await;
            if let Some(previous) = state.selection.take() {
                previous.cancel.cancel();
            }
            state.generation += 1;
            let cancel = CancellationToken::new();
            state.selection = Some(Selection {
                conversation_id: conversation_id.to_string(),
                generation: state.generation,
                cancel: cancel.clone(),
            });
            state.detail = None;
            state.error = None;
            state.loading_detail = true;
            (state.generation, cancel)
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(conversation_id, "Detail fetch cancelled by newer selection");
                return SelectionOutcome::Superseded;
            }
            result = self.details.fetch_conversation_detail(conversation_id) => result,
        };

        let mut state = self.state.write().await;
        let current = state
            .selection
            .as_ref()
            .is_some_and(|selection| selection.generation == generation);
        if !current {
            tracing::warn!(conversation_id, "Discarding stale conversation detail response");
            return SelectionOutcome::Superseded;
        }

        state.loading_detail = false;
        match result {
            Ok(detail) => {
                state.detail = Some(detail.clone());
                SelectionOutcome::Loaded(detail)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!("Error loading conversation details: {}", message);
                state.error = Some(message.clone());
                SelectionOutcome::Failed(message)
            }
        }
    }

    pub async fn snapshot(&self) -> BrowserSnapshot {
        let state = self.state.read().await;
        BrowserSnapshot {
            conversations: state.conversations.clone(),
            selected_id: state
                .selection
                .as_ref()
                .map(|selection| selection.conversation_id.clone()),
            detail: state.detail.clone(),
            loading_detail: state.loading_detail,
            error: state.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use intervue_core::IntervueError;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::{Notify, oneshot};

    struct StaticCatalog {
        result: Result<Vec<Conversation>>,
    }

    #[async_trait]
    impl ConversationCatalog for StaticCatalog {
        async fn list_conversations(&self) -> Result<Vec<Conversation>> {
            self.result.clone()
        }
    }

    /// Holds each fetch until the test releases it.
    #[derive(Default)]
    struct GatedDetails {
        gates: Mutex<HashMap<String, oneshot::Receiver<Result<ConversationDetail>>>>,
        started: Notify,
    }

    impl GatedDetails {
        fn gate(&self, id: &str) -> oneshot::Sender<Result<ConversationDetail>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(id.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl ConversationDetailSource for GatedDetails {
        async fn fetch_conversation_detail(&self, conversation_id: &str) -> Result<ConversationDetail> {
            let gate = self.gates.lock().unwrap().remove(conversation_id);
            self.started.notify_one();
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(IntervueError::transport("gate dropped"))),
                None => Err(IntervueError::not_found("No conversation details found")),
            }
        }
    }

    fn conversation(id: &str, name: &str) -> Conversation {
        serde_json::from_value(json!({"conversation_id": id, "conversation_name": name})).unwrap()
    }

    fn detail(id: &str) -> ConversationDetail {
        serde_json::from_value(json!({"conversation_id": id})).unwrap()
    }

    fn catalog(conversations: Vec<Conversation>) -> Arc<StaticCatalog> {
        Arc::new(StaticCatalog {
            result: Ok(conversations),
        })
    }

    #[tokio::test]
    async fn test_refresh_and_search() {
        let browser = ConversationBrowser::new(
            catalog(vec![
                conversation("c-1", "Sales Engineer Round 1"),
                conversation("c-2", "Frontend Screen"),
            ]),
            Arc::new(GatedDetails::default()),
        );

        assert_eq!(browser.refresh().await.unwrap(), 2);
        let hits = browser.search("SALES").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].conversation_id, "c-1");
        assert_eq!(browser.search("").await.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_recorded() {
        let browser = ConversationBrowser::new(
            Arc::new(StaticCatalog {
                result: Err(IntervueError::api("Tavus", 401, "Unauthorized", "{}")),
            }),
            Arc::new(GatedDetails::default()),
        );

        assert!(browser.refresh().await.is_err());
        let snapshot = browser.snapshot().await;
        assert!(snapshot.error.unwrap().contains("401 Unauthorized"));
        assert!(snapshot.conversations.is_empty());
    }

    #[tokio::test]
    async fn test_select_loads_detail() {
        let details = Arc::new(GatedDetails::default());
        let release = details.gate("c-1");
        let browser = ConversationBrowser::new(catalog(vec![]), details.clone());

        release.send(Ok(detail("c-1"))).unwrap();
        let outcome = browser.select("c-1").await;

        assert_eq!(outcome, SelectionOutcome::Loaded(detail("c-1")));
        let snapshot = browser.snapshot().await;
        assert_eq!(snapshot.selected_id.as_deref(), Some("c-1"));
        assert_eq!(snapshot.detail, Some(detail("c-1")));
        assert!(!snapshot.loading_detail);
    }

    #[tokio::test]
    async fn test_select_failure_sets_error() {
        let browser = ConversationBrowser::new(catalog(vec![]), Arc::new(GatedDetails::default()));

        let outcome = browser.select("missing").await;

        assert_eq!(
            outcome,
            SelectionOutcome::Failed("No conversation details found".to_string())
        );
        let snapshot = browser.snapshot().await;
        assert!(snapshot.detail.is_none());
        assert_eq!(snapshot.error.as_deref(), Some("No conversation details found"));
    }

    #[tokio::test]
    async fn test_superseded_selection_never_overwrites_newer() {
        let details = Arc::new(GatedDetails::default());
        let release_a = details.gate("a");
        let release_b = details.gate("b");
        let browser = Arc::new(ConversationBrowser::new(catalog(vec![]), details.clone()));

        let first = tokio::spawn({
            let browser = browser.clone();
            async move { browser.select("a").await }
        });
        details.started.notified().await;

        let second = tokio::spawn({
            let browser = browser.clone();
            async move { browser.select("b").await }
        });
        details.started.notified().await;

        // "a" answers late, after "b" became the selection.
        let _ = release_a.send(Ok(detail("a")));
        release_b.send(Ok(detail("b"))).unwrap();

        assert_eq!(first.await.unwrap(), SelectionOutcome::Superseded);
        assert_eq!(second.await.unwrap(), SelectionOutcome::Loaded(detail("b")));

        let snapshot = browser.snapshot().await;
        assert_eq!(snapshot.selected_id.as_deref(), Some("b"));
        assert_eq!(snapshot.detail, Some(detail("b")));
    }
}
