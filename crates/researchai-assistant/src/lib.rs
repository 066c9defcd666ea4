//! researchai-assistant: Assistant interface and the shared chat conversation.
//!
//! The UI never talks to a model directly: pages own a `Conversation`, which
//! hands prompts to an `Assistant` and decides how late replies are delivered.

pub mod backend;
pub mod conversation;

pub use backend::{Assistant, AssistantError, Persona, SimulatedAssistant};
pub use conversation::{Conversation, ConversationError, ConversationEvent, DiscardReason, ReplyPolicy};
