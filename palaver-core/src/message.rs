//! Assistant message construction from streaming state.
//!
//! When a response starts streaming, the message store needs a complete,
//! well-typed record up front even though most fields have not arrived
//! yet. [`AiMessage::from_streaming_state`] materializes that record from
//! whatever the first chunks carried; the store owns it afterwards and
//! fills it in as the stream continues.

use crate::model::ModelSelector;
use serde::{Deserialize, Serialize};

/// Display name rendered for assistant messages.
pub const AI_DISPLAY_NAME: &str = "AI";

/// Who a chat message renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Ai => "ai",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an assistant message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Response is still streaming.
    Running,
    /// Stream finished cleanly.
    Success,
    /// Stream ended with an error.
    Error,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Running => "running",
            MessageStatus::Success => "success",
            MessageStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(MessageStatus::Running),
            "success" => Ok(MessageStatus::Success),
            "error" => Ok(MessageStatus::Error),
            _ => Err(format!("unknown message status: {}", s)),
        }
    }
}

/// Partial fields of an in-flight assistant response.
///
/// Everything is optional: chunks arrive incrementally and the first one
/// may carry nothing beyond the ids the caller already has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingState {
    pub execution_id: Option<i64>,
    pub previous_message_id: Option<String>,
    pub model: Option<ModelSelector>,
}

/// The terminal assistant-message record handed to the message store.
///
/// Created once per streamed response; the store mutates it in place as
/// further chunks arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMessage {
    pub id: String,
    pub session_id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub name: String,
    pub status: MessageStatus,
    pub content: String,
    pub execution_id: Option<i64>,
    pub previous_message_id: Option<String>,
    pub retry_of_message_id: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl AiMessage {
    /// Materialize the initial assistant message for a streamed response.
    ///
    /// Status starts at `running` with empty content regardless of what
    /// the partial state carries. The provider id and display model string
    /// are decomposed from the selector when one has arrived; workflow and
    /// custom-agent selectors contribute only their provider id.
    /// `retry_of_message_id` stays `None`, the streaming payload has no
    /// retry field and the owning store links retries itself.
    pub fn from_streaming_state(
        session_id: impl Into<String>,
        message_id: impl Into<String>,
        state: &StreamingState,
    ) -> Self {
        let provider = state.model.as_ref().map(|m| m.provider_id().to_string());
        let model = state
            .model
            .as_ref()
            .and_then(|m| m.model_name())
            .map(str::to_string);
        Self {
            id: message_id.into(),
            session_id: session_id.into(),
            kind: MessageKind::Ai,
            name: AI_DISPLAY_NAME.to_string(),
            status: MessageStatus::Running,
            content: String::new(),
            execution_id: state.execution_id,
            previous_message_id: state.previous_message_id.clone(),
            retry_of_message_id: None,
            provider,
            model,
        }
    }
}
