//! Agent catalog: identity matching, filtering, and navigation.
//!
//! The catalog endpoint hands over a [`ChatModelsResponse`] keyed by
//! provider id. This module selects from it: matching an entry against the
//! active [`ModelSelector`], narrowing and ordering the list for display,
//! and producing the navigation target that opens a conversation with an
//! entry.

use crate::model::{ModelSelector, CUSTOM_AGENT_PROVIDER, WORKFLOW_PROVIDER};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named view that hosts every agent conversation.
pub const AGENT_CHAT_ROUTE: &str = "agent-chat";

// ============================================
// Catalog entries
// ============================================

/// A catalog entry returned by the models endpoint.
///
/// Owned by the catalog response; never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub model: ModelSelector,
    pub updated_at: DateTime<Utc>,
    /// Display metadata the catalog owner attaches (icon, description, ...)
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Agent {
    /// Whether this agent is the one a selector points at.
    ///
    /// Identity is branch-aware: selectors of different provider branches
    /// never match, even with coincidentally equal identifiers. Within a
    /// branch, workflows compare by workflow id, custom agents by agent
    /// id, and LLM entries by provider and model together.
    pub fn matches(&self, selector: &ModelSelector) -> bool {
        self.model == *selector
    }
}

/// One provider bucket in the catalog response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderModels {
    #[serde(default)]
    pub models: Vec<Agent>,
}

/// Catalog response keyed by provider id.
///
/// Buckets iterate in a deterministic (sorted) order, so
/// [`ChatModelsResponse::first_agent`] is stable for a given response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatModelsResponse {
    #[serde(flatten)]
    pub buckets: BTreeMap<String, ProviderModels>,
}

impl ChatModelsResponse {
    /// The well-known empty response: the two reserved buckets present, no
    /// agents anywhere.
    pub fn empty() -> Self {
        Self::empty_with_providers::<&str>(&[])
    }

    /// Empty response carrying a bucket per known LLM provider alongside
    /// the two reserved buckets.
    pub fn empty_with_providers<S: AsRef<str>>(providers: &[S]) -> Self {
        let mut buckets = BTreeMap::new();
        buckets.insert(WORKFLOW_PROVIDER.to_string(), ProviderModels::default());
        buckets.insert(CUSTOM_AGENT_PROVIDER.to_string(), ProviderModels::default());
        for provider in providers {
            buckets.entry(provider.as_ref().to_string()).or_default();
        }
        Self { buckets }
    }

    /// First agent across all buckets in bucket order, or `None` when
    /// every bucket is empty.
    pub fn first_agent(&self) -> Option<&Agent> {
        self.buckets.values().flat_map(|bucket| bucket.models.iter()).next()
    }
}

// ============================================
// Filtering and sorting
// ============================================

/// Sort order for the filtered catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentSort {
    /// Newest first by `updated_at`.
    #[default]
    UpdatedAt,
}

/// Conjunction of catalog filters; empty fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentFilter {
    /// Case-insensitive substring match against the agent name.
    pub search: String,
    /// Exact provider id match. An empty string matches all providers, it
    /// is not an exact match against an empty provider.
    pub provider: String,
    pub sort: AgentSort,
}

/// Filter then sort a catalog slice, leaving the input untouched.
///
/// The sort is stable, so entries with equal timestamps keep their input
/// order.
pub fn filter_and_sort_agents(agents: &[Agent], filter: &AgentFilter) -> Vec<Agent> {
    let search = filter.search.to_lowercase();
    let mut out: Vec<Agent> = agents
        .iter()
        .filter(|agent| search.is_empty() || agent.name.to_lowercase().contains(&search))
        .filter(|agent| filter.provider.is_empty() || agent.model.provider_id() == filter.provider)
        .cloned()
        .collect();
    match filter.sort {
        AgentSort::UpdatedAt => out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
    out
}

// ============================================
// Navigation
// ============================================

/// Query parameters an agent route carries, when any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RouteQuery {
    Workflow {
        #[serde(rename = "workflowId")]
        workflow_id: String,
    },
    CustomAgent {
        #[serde(rename = "agentId")]
        agent_id: String,
    },
}

/// Navigation target for opening a conversation with a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRoute {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<RouteQuery>,
}

/// Route for a selector.
///
/// All three branches land on the same named view; workflow and
/// custom-agent selectors carry their identifier as a query parameter,
/// LLM selectors carry none.
pub fn agent_route(selector: &ModelSelector) -> AgentRoute {
    let query = match selector {
        ModelSelector::Workflow { workflow_id } => Some(RouteQuery::Workflow {
            workflow_id: workflow_id.clone(),
        }),
        ModelSelector::CustomAgent { agent_id } => Some(RouteQuery::CustomAgent {
            agent_id: agent_id.clone(),
        }),
        ModelSelector::Llm { .. } => None,
    };
    AgentRoute {
        name: AGENT_CHAT_ROUTE,
        query,
    }
}
