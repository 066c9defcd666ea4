//! Chat conversation shared by the dashboard and the paper viewer.
//!
//! A conversation owns the transcript, forwards prompts to an `Assistant`
//! on a spawned task, and applies a `ReplyPolicy` to replies that are still
//! in flight when the next prompt arrives. Every pending reply is tied to a
//! `CancellationToken` derived from the conversation's lifetime, so closing
//! the conversation (or shutting the server down) drops them all.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, oneshot, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use researchai_common::ChatMessage;

use crate::backend::Assistant;

const FALLBACK_REPLY: &str = "Sorry, the assistant is unavailable right now. Please try again shortly.";

/// What happens to a reply still pending when the user sends another prompt.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplyPolicy {
    /// Cancel every pending reply; only the newest prompt is answered.
    #[default]
    LatestWins,
    /// Answer every prompt, delivering replies in submission order.
    Ordered,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// A newer prompt replaced it (`LatestWins`).
    Superseded,
    /// Explicit cancel, reset, close or shutdown.
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    Reply { message: ChatMessage },
    ReplyDiscarded { prompt: String, reason: DiscardReason },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("conversation is closed")]
    Closed,
}

struct PendingReply {
    request: u64,
    token: CancellationToken,
    reason: Option<DiscardReason>,
}

impl PendingReply {
    fn discard(&mut self, reason: DiscardReason) {
        if self.reason.is_none() {
            self.reason = Some(reason);
        }
        self.token.cancel();
    }
}

#[derive(Default)]
struct Transcript {
    messages: Vec<ChatMessage>,
    pending: Vec<PendingReply>,
    next_request: u64,
    /// Completion signal of the most recent reply (`Ordered` only).
    tail: Option<oneshot::Receiver<()>>,
    discarded: u64,
}

struct Shared {
    transcript: Mutex<Transcript>,
    assistant: Arc<dyn Assistant>,
    policy: ReplyPolicy,
    lifetime: CancellationToken,
    events: broadcast::Sender<ConversationEvent>,
}

/// Cheap to clone; clones share one transcript.
#[derive(Clone)]
pub struct Conversation {
    shared: Arc<Shared>,
}

impl Conversation {
    /// Start a conversation seeded with the assistant's greeting.
    /// Cancelling `parent` tears it down like `close`.
    pub fn new(assistant: Arc<dyn Assistant>, policy: ReplyPolicy, parent: &CancellationToken) -> Self {
        let (events, _) = broadcast::channel(64);
        let transcript = Transcript {
            messages: vec![ChatMessage::assistant(assistant.greeting())],
            ..Default::default()
        };
        Self {
            shared: Arc::new(Shared {
                transcript: Mutex::new(transcript),
                assistant,
                policy,
                lifetime: parent.child_token(),
                events,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.shared.events.subscribe()
    }

    /// Append the user's message now and schedule the assistant reply.
    pub async fn submit(&self, text: &str) -> Result<ChatMessage, ConversationError> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }
        if self.shared.lifetime.is_cancelled() {
            return Err(ConversationError::Closed);
        }

        let user = ChatMessage::user(prompt);
        let mut t = self.shared.transcript.lock().await;
        t.messages.push(user.clone());
        t.next_request += 1;
        let request = t.next_request;

        if self.shared.policy == ReplyPolicy::LatestWins {
            for pending in t.pending.iter_mut() {
                pending.discard(DiscardReason::Superseded);
            }
        }

        let token = self.shared.lifetime.child_token();
        t.pending.push(PendingReply { request, token: token.clone(), reason: None });

        let gate = match self.shared.policy {
            ReplyPolicy::Ordered => {
                let (done, next_tail) = oneshot::channel();
                let previous = t.tail.replace(next_tail);
                Some(OrderGate { previous, done })
            }
            ReplyPolicy::LatestWins => None,
        };
        drop(t);

        debug!(assistant = self.shared.assistant.name(), request, "Scheduled assistant reply");
        tokio::spawn(deliver(self.shared.clone(), request, prompt.to_string(), token, gate));
        Ok(user)
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.shared.transcript.lock().await.messages.clone()
    }

    pub async fn pending_replies(&self) -> usize {
        self.shared.transcript.lock().await.pending.len()
    }

    /// Replies dropped on purpose since the conversation started.
    pub async fn discarded_replies(&self) -> u64 {
        self.shared.transcript.lock().await.discarded
    }

    /// Drop every reply still in flight; the transcript is kept.
    pub async fn cancel_pending(&self) -> usize {
        let mut t = self.shared.transcript.lock().await;
        let mut cancelled = 0;
        for pending in t.pending.iter_mut().filter(|p| p.reason.is_none()) {
            pending.discard(DiscardReason::Cancelled);
            cancelled += 1;
        }
        t.tail = None;
        cancelled
    }

    /// Cancel pending replies and start over from the greeting.
    pub async fn reset(&self) {
        self.cancel_pending().await;
        let mut t = self.shared.transcript.lock().await;
        t.messages = vec![ChatMessage::assistant(self.shared.assistant.greeting())];
    }

    pub fn close(&self) {
        self.shared.lifetime.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lifetime.is_cancelled()
    }
}

struct OrderGate {
    previous: Option<oneshot::Receiver<()>>,
    done: oneshot::Sender<()>,
}

async fn deliver(
    shared: Arc<Shared>,
    request: u64,
    prompt: String,
    token: CancellationToken,
    gate: Option<OrderGate>,
) {
    let outcome = tokio::select! {
        _ = token.cancelled() => None,
        reply = shared.assistant.reply(&prompt) => Some(reply),
    };

    let done = match gate {
        Some(OrderGate { previous, done }) => {
            if let Some(previous) = previous {
                // A dropped sender also means the predecessor is finished.
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = previous => {}
                }
            }
            Some(done)
        }
        None => None,
    };

    let mut t = shared.transcript.lock().await;
    let slot = t.pending.iter().position(|p| p.request == request);
    let reason = slot.and_then(|idx| t.pending.remove(idx).reason);

    let delivered = match outcome {
        Some(_) if token.is_cancelled() => None,
        Some(Ok(text)) => Some(ChatMessage::assistant(text)),
        Some(Err(e)) => {
            warn!(assistant = shared.assistant.name(), error = %e, "Assistant reply failed");
            Some(ChatMessage::assistant(FALLBACK_REPLY))
        }
        None => None,
    };

    match delivered {
        Some(message) => {
            t.messages.push(message.clone());
            let _ = shared.events.send(ConversationEvent::Reply { message });
        }
        None => {
            let reason = reason.unwrap_or(DiscardReason::Cancelled);
            t.discarded += 1;
            debug!(request, ?reason, "Discarded pending assistant reply");
            let _ = shared.events.send(ConversationEvent::ReplyDiscarded { prompt, reason });
        }
    }
    drop(t);

    if let Some(done) = done {
        let _ = done.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AssistantError, SimulatedAssistant};
    use async_trait::async_trait;
    use researchai_common::ChatRole;
    use std::time::Duration;
    use tokio::time::sleep;

    /// Prompts containing "slow" take 2 s, everything else 100 ms.
    struct Scripted;

    #[async_trait]
    impl Assistant for Scripted {
        async fn reply(&self, prompt: &str) -> Result<String, AssistantError> {
            let ms = if prompt.contains("slow") { 2000 } else { 100 };
            sleep(Duration::from_millis(ms)).await;
            if prompt.contains("fail") {
                return Err(AssistantError::Unavailable("scripted failure".into()));
            }
            Ok(format!("re: {}", prompt))
        }
        fn greeting(&self) -> String {
            "welcome".into()
        }
        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn desk(policy: ReplyPolicy) -> (Conversation, CancellationToken) {
        let root = CancellationToken::new();
        let assistant = Arc::new(SimulatedAssistant::research_desk(Duration::from_millis(1000)));
        (Conversation::new(assistant, policy, &root), root)
    }

    fn scripted(policy: ReplyPolicy) -> Conversation {
        Conversation::new(Arc::new(Scripted), policy, &CancellationToken::new())
    }

    fn contents(messages: &[ChatMessage]) -> Vec<String> {
        messages.iter().map(|m| m.content.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_message_is_immediate_and_reply_is_delayed() {
        let (chat, _root) = desk(ReplyPolicy::LatestWins);
        assert_eq!(chat.messages().await.len(), 1);

        let user = chat.submit("  protein folding  ").await.unwrap();
        assert_eq!(user.content, "protein folding");
        let messages = chat.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, ChatRole::User);

        sleep(Duration::from_millis(999)).await;
        assert_eq!(chat.messages().await.len(), 2);
        assert_eq!(chat.pending_replies().await, 1);

        sleep(Duration::from_millis(2)).await;
        let messages = chat.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert!(messages[2].content.contains("protein folding"));
        assert_eq!(chat.pending_replies().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_message_is_rejected() {
        let (chat, _root) = desk(ReplyPolicy::LatestWins);
        assert_eq!(chat.submit("   ").await, Err(ConversationError::EmptyMessage));
        assert_eq!(chat.messages().await.len(), 1);
        assert_eq!(chat.pending_replies().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_wins_discards_earlier_pending_reply() {
        let chat = scripted(ReplyPolicy::LatestWins);
        let mut events = chat.subscribe();

        chat.submit("slow question").await.unwrap();
        chat.submit("quick question").await.unwrap();
        sleep(Duration::from_millis(2500)).await;

        assert_eq!(
            contents(&chat.messages().await),
            vec!["welcome", "slow question", "quick question", "re: quick question"]
        );
        assert_eq!(chat.discarded_replies().await, 1);

        let mut saw_discard = false;
        let mut saw_reply = false;
        while let Ok(event) = events.try_recv() {
            match event {
                ConversationEvent::ReplyDiscarded { prompt, reason } => {
                    assert_eq!(prompt, "slow question");
                    assert_eq!(reason, DiscardReason::Superseded);
                    saw_discard = true;
                }
                ConversationEvent::Reply { message } => {
                    assert_eq!(message.content, "re: quick question");
                    saw_reply = true;
                }
            }
        }
        assert!(saw_discard && saw_reply);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ordered_delivers_every_reply_in_submission_order() {
        let chat = scripted(ReplyPolicy::Ordered);

        chat.submit("slow question").await.unwrap();
        chat.submit("quick question").await.unwrap();

        // The quick reply is ready first but must wait for the slow one.
        sleep(Duration::from_millis(500)).await;
        assert_eq!(chat.messages().await.len(), 3);

        sleep(Duration::from_millis(2000)).await;
        assert_eq!(
            contents(&chat.messages().await),
            vec!["welcome", "slow question", "quick question", "re: slow question", "re: quick question"]
        );
        assert_eq!(chat.discarded_replies().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_and_rejects_new_messages() {
        let (chat, _root) = desk(ReplyPolicy::Ordered);
        chat.submit("first").await.unwrap();
        chat.close();

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(chat.messages().await.len(), 2);
        assert_eq!(chat.discarded_replies().await, 1);
        assert!(chat.is_closed());
        assert_eq!(chat.submit("second").await, Err(ConversationError::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_root_cancellation_tears_down_conversation() {
        let (chat, root) = desk(ReplyPolicy::LatestWins);
        chat.submit("first").await.unwrap();
        root.cancel();

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(chat.messages().await.len(), 2);
        assert!(chat.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_reseeds_greeting_and_drops_pending() {
        let (chat, _root) = desk(ReplyPolicy::LatestWins);
        let mut events = chat.subscribe();
        chat.submit("first").await.unwrap();
        chat.reset().await;

        sleep(Duration::from_millis(1500)).await;
        let messages = chat.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, ChatRole::Assistant);
        match events.try_recv() {
            Ok(ConversationEvent::ReplyDiscarded { reason, .. }) => assert_eq!(reason, DiscardReason::Cancelled),
            other => panic!("expected a discarded reply, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_keeps_transcript() {
        let (chat, _root) = desk(ReplyPolicy::Ordered);
        chat.submit("a").await.unwrap();
        chat.submit("b").await.unwrap();
        assert_eq!(chat.cancel_pending().await, 2);

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(chat.messages().await.len(), 3);
        assert_eq!(chat.discarded_replies().await, 2);

        chat.submit("c").await.unwrap();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(chat.messages().await.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_reply_appends_fallback_message() {
        let chat = scripted(ReplyPolicy::LatestWins);
        chat.submit("please fail").await.unwrap();
        sleep(Duration::from_millis(200)).await;

        let messages = chat.messages().await;
        assert_eq!(messages.last().map(|m| m.content.as_str()), Some(FALLBACK_REPLY));
    }
}
