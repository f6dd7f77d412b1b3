//! # palaver-core
//!
//! Core library for palaver - the conversation and model-normalization
//! layer of a chat interface.
//!
//! This library provides:
//! - A three-way model identity ([`ModelSelector`]: workflows, custom
//!   agents, raw LLM provider/model pairs) with flat-record and token
//!   codecs
//! - Agent catalog matching, filtering, and navigation routes
//! - Relative-day grouping of sessions for the sidebar
//! - Assistant message construction from streaming state
//! - Configuration and logging infrastructure
//!
//! The domain functions are pure: no shared state, no I/O, and every
//! failure on malformed input is an absent value rather than an error.
//! The host supplies raw session and catalog records and consumes the
//! normalized results; fetching, persistence, and rendering live outside
//! this crate.
//!
//! ## Example
//!
//! ```rust
//! use palaver_core::ModelSelector;
//!
//! let selector = ModelSelector::Llm {
//!     provider: "openai".to_string(),
//!     model: "gpt-4".to_string(),
//! };
//! let token = selector.to_token();
//! assert_eq!(token, "openai::gpt-4");
//! assert_eq!(ModelSelector::from_token(&token), Some(selector));
//! ```

// Re-export commonly used items at the crate root
pub use catalog::{
    agent_route, filter_and_sort_agents, Agent, AgentFilter, AgentRoute, AgentSort,
    ChatModelsResponse, ProviderModels, RouteQuery, AGENT_CHAT_ROUTE,
};
pub use config::Config;
pub use error::{Error, Result};
pub use grouping::{group_sessions_by_day, relative_day, RelativeDay, Session, SessionGroup};
pub use message::{AiMessage, MessageKind, MessageStatus, StreamingState, AI_DISPLAY_NAME};
pub use model::{FlatModel, ModelSelector, CUSTOM_AGENT_PROVIDER, WORKFLOW_PROVIDER};

// Public modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod grouping;
pub mod logging;
pub mod message;
pub mod model;
