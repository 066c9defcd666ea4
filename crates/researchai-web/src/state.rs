//! Shared application state for the web server.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;

use researchai_assistant::{Assistant, Conversation, ConversationEvent, DiscardReason, SimulatedAssistant};
use researchai_common::{fixtures, ChatMessage, Effect, NoticeLevel};
use researchai_library::ReferenceLibrary;

use crate::config::Config;
use crate::pages::paper::PaperPage;
use crate::pages::references::ReferencesPage;
use crate::pages::search::SearchPage;
use crate::views::Views;

/// Which chat an event belongs to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatChannel {
    Dashboard,
    Paper,
}

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// An assistant reply landed in a transcript
    ChatReply { channel: ChatChannel, message: ChatMessage },
    /// A pending reply was dropped (superseded or cancelled)
    ReplyDiscarded { channel: ChatChannel, prompt: String, reason: DiscardReason },
    /// The simulated search delay elapsed
    SearchFinished { query: String },
    /// Toast for an action that did not re-render the page
    Notification { level: NoticeLevel, message: String },
}

impl AppEvent {
    pub fn from_conversation(channel: ChatChannel, event: ConversationEvent) -> Self {
        match event {
            ConversationEvent::Reply { message } => Self::ChatReply { channel, message },
            ConversationEvent::ReplyDiscarded { prompt, reason } => {
                Self::ReplyDiscarded { channel, prompt, reason }
            }
        }
    }

    pub fn acknowledge(effect: &Effect) -> Self {
        Self::Notification { level: NoticeLevel::Success, message: effect.acknowledgment() }
    }
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub views: Views,
    /// Root of every background task; cancelled on shutdown.
    pub shutdown: CancellationToken,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
    pub dashboard_chat: Conversation,
    pub paper_chat: Conversation,
    pub search: Mutex<SearchPage>,
    pub paper: Mutex<PaperPage>,
    pub references: Mutex<ReferencesPage>,
}

impl AppState {
    /// State backed by the simulated assistants.
    pub fn new(config: Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let delay = config.assistant.reply_delay();
        let title = fixtures::featured_paper().title;
        Self::with_assistants(
            config,
            shutdown,
            Arc::new(SimulatedAssistant::research_desk(delay)),
            Arc::new(SimulatedAssistant::paper_reader(title, delay)),
        )
    }

    pub fn with_assistants(
        config: Config,
        shutdown: CancellationToken,
        desk: Arc<dyn Assistant>,
        reader: Arc<dyn Assistant>,
    ) -> anyhow::Result<Self> {
        let views = Views::new()?;
        let policy = config.assistant.reply_policy;
        let (event_tx, _) = broadcast::channel(256);
        Ok(Self {
            dashboard_chat: Conversation::new(desk, policy, &shutdown),
            paper_chat: Conversation::new(reader, policy, &shutdown),
            search: Mutex::new(SearchPage::new()),
            paper: Mutex::new(PaperPage::default()),
            references: Mutex::new(ReferencesPage::new(ReferenceLibrary::seeded())),
            config,
            views,
            shutdown,
            event_tx,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// Fire-and-forget; no subscribers is not an error.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }
}

pub type SharedState = Arc<AppState>;
