//! Model identity and its codecs.
//!
//! A conversation is always addressed at exactly one backing target: an
//! automation workflow, a user-defined agent, or a raw LLM provider/model
//! pair. [`ModelSelector`] keeps that three-way split as a tagged enum, so
//! "exactly one identifier is meaningful" holds by construction. Two other
//! representations exist at the host boundary:
//!
//! - [`FlatModel`]: a fixed-shape record with all four fields always
//!   present, used wherever storage or equality needs a stable shape.
//!   Selectors serialize as their flat record.
//! - The model token: a single `provider::identifier` string used in URLs
//!   and storage keys, rendered by [`ModelSelector::to_token`] and read
//!   back by [`ModelSelector::from_token`].

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Provider id reserved for workflow-backed conversations.
pub const WORKFLOW_PROVIDER: &str = "n8n";

/// Provider id reserved for custom agents.
pub const CUSTOM_AGENT_PROVIDER: &str = "custom-agent";

/// Separator between the provider and identifier segments of a token.
const TOKEN_SEPARATOR: &str = "::";

// ============================================
// Model Selector
// ============================================

/// What a conversation talks to.
///
/// The provider id alone decides which identifier is meaningful: the two
/// reserved ids map to the workflow and custom-agent branches, any other
/// id is an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FlatModel", try_from = "FlatModel")]
pub enum ModelSelector {
    /// A workflow-backed agent.
    Workflow { workflow_id: String },
    /// A user-defined agent.
    CustomAgent { agent_id: String },
    /// A raw provider/model pair.
    Llm { provider: String, model: String },
}

impl ModelSelector {
    /// The provider id for this selector's branch.
    pub fn provider_id(&self) -> &str {
        match self {
            ModelSelector::Workflow { .. } => WORKFLOW_PROVIDER,
            ModelSelector::CustomAgent { .. } => CUSTOM_AGENT_PROVIDER,
            ModelSelector::Llm { provider, .. } => provider,
        }
    }

    /// The display model string. Present only for the LLM branch; workflow
    /// and custom-agent selectors have no model string.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            ModelSelector::Llm { model, .. } => Some(model),
            _ => None,
        }
    }

    /// The identifier segment that goes into the token for this branch.
    fn identifier(&self) -> &str {
        match self {
            ModelSelector::Workflow { workflow_id } => workflow_id,
            ModelSelector::CustomAgent { agent_id } => agent_id,
            ModelSelector::Llm { model, .. } => model,
        }
    }

    /// Render the `provider::identifier` token.
    pub fn to_token(&self) -> String {
        format!("{}{}{}", self.provider_id(), TOKEN_SEPARATOR, self.identifier())
    }

    /// Parse a `provider::identifier` token.
    ///
    /// Splits on the first `::`, so identifiers may themselves contain the
    /// separator. The two reserved provider ids map to their branches; any
    /// other provider segment is accepted as an LLM provider id without an
    /// allow-list check. Tokens with no separator, or with an empty
    /// provider or identifier segment, yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let Some((provider, identifier)) = token.split_once(TOKEN_SEPARATOR) else {
            tracing::debug!(token, "model token has no separator");
            return None;
        };
        if provider.is_empty() || identifier.is_empty() {
            tracing::debug!(token, "model token has an empty segment");
            return None;
        }
        Some(match provider {
            WORKFLOW_PROVIDER => ModelSelector::Workflow {
                workflow_id: identifier.to_string(),
            },
            CUSTOM_AGENT_PROVIDER => ModelSelector::CustomAgent {
                agent_id: identifier.to_string(),
            },
            _ => ModelSelector::Llm {
                provider: provider.to_string(),
                model: identifier.to_string(),
            },
        })
    }

    /// The flat storage record for this selector.
    pub fn to_flat(&self) -> FlatModel {
        self.clone().into()
    }
}

impl std::fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl std::str::FromStr for ModelSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| Error::InvalidModelToken(s.to_string()))
    }
}

// ============================================
// Flat Model Record
// ============================================

/// Storage-normalized model record.
///
/// All four fields are always present on the wire; for a record produced
/// from a selector, exactly the identifier matching the provider's branch
/// is set and the rest are null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatModel {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub workflow_id: Option<String>,
    pub agent_id: Option<String>,
}

impl FlatModel {
    /// Rebuild the selector this record describes.
    ///
    /// Stored records can be partial or stale, so malformed input is
    /// tolerated rather than rejected with an error: a missing provider,
    /// or a missing/empty identifier for the provider's branch, yields
    /// `None`.
    pub fn to_selector(&self) -> Option<ModelSelector> {
        let provider = self.provider.as_deref()?;
        let selector = match provider {
            WORKFLOW_PROVIDER => non_empty(self.workflow_id.as_deref()).map(|id| {
                ModelSelector::Workflow {
                    workflow_id: id.to_string(),
                }
            }),
            CUSTOM_AGENT_PROVIDER => non_empty(self.agent_id.as_deref()).map(|id| {
                ModelSelector::CustomAgent {
                    agent_id: id.to_string(),
                }
            }),
            _ => non_empty(self.model.as_deref()).map(|model| ModelSelector::Llm {
                provider: provider.to_string(),
                model: model.to_string(),
            }),
        };
        if selector.is_none() {
            tracing::debug!(provider, "model record missing the identifier its provider requires");
        }
        selector
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl From<ModelSelector> for FlatModel {
    fn from(selector: ModelSelector) -> Self {
        match selector {
            ModelSelector::Workflow { workflow_id } => FlatModel {
                provider: Some(WORKFLOW_PROVIDER.to_string()),
                workflow_id: Some(workflow_id),
                ..Default::default()
            },
            ModelSelector::CustomAgent { agent_id } => FlatModel {
                provider: Some(CUSTOM_AGENT_PROVIDER.to_string()),
                agent_id: Some(agent_id),
                ..Default::default()
            },
            ModelSelector::Llm { provider, model } => FlatModel {
                provider: Some(provider),
                model: Some(model),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<FlatModel> for ModelSelector {
    type Error = Error;

    fn try_from(record: FlatModel) -> Result<Self, Self::Error> {
        record.to_selector().ok_or(Error::IncompleteModelRecord {
            provider: record.provider,
        })
    }
}
