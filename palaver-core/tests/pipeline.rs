//! Integration tests for the palaver-core normalization pipeline
//!
//! These tests drive raw host-side JSON through the public surface:
//! catalog response -> codec -> matcher/filter -> routes, session list ->
//! grouper, and streaming payload -> message builder.

use chrono::{Duration, TimeZone, Utc};
use palaver_core::{
    agent_route, filter_and_sort_agents, group_sessions_by_day, AgentFilter, AiMessage,
    ChatModelsResponse, MessageStatus, ModelSelector, Session, StreamingState,
    CUSTOM_AGENT_PROVIDER, WORKFLOW_PROVIDER,
};

fn llm(provider: &str, model: &str) -> ModelSelector {
    ModelSelector::Llm {
        provider: provider.to_string(),
        model: model.to_string(),
    }
}

// ============================================
// Codec round trips
// ============================================

#[test]
fn test_every_branch_round_trips_through_both_codecs() {
    let selectors = [
        ModelSelector::Workflow {
            workflow_id: "wf-123".to_string(),
        },
        ModelSelector::CustomAgent {
            agent_id: "ag-7".to_string(),
        },
        llm("openai", "gpt-4"),
        llm("anthropic", "claude-sonnet-4"),
    ];

    for selector in selectors {
        // Flat record round trip
        assert_eq!(selector.to_flat().to_selector(), Some(selector.clone()));

        // Token round trip
        assert_eq!(ModelSelector::from_token(&selector.to_token()), Some(selector.clone()));

        // Serde round trip through the storage shape
        let json = serde_json::to_string(&selector).unwrap();
        let back: ModelSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);
    }
}

// ============================================
// Catalog response -> filter -> route
// ============================================

#[test]
fn test_catalog_flow_from_raw_json() {
    let raw = serde_json::json!({
        "n8n": { "models": [
            { "name": "Daily digest", "model": { "provider": "n8n", "model": null, "workflowId": "wf-1", "agentId": null }, "updatedAt": "2024-03-02T09:00:00Z" }
        ]},
        "custom-agent": { "models": [] },
        "openai": { "models": [
            { "name": "GPT-4", "model": { "provider": "openai", "model": "gpt-4", "workflowId": null, "agentId": null }, "updatedAt": "2024-03-05T09:00:00Z" }
        ]},
    });
    let response: ChatModelsResponse = serde_json::from_value(raw).unwrap();

    // Matcher finds the workflow entry by identity
    let all: Vec<_> = response
        .buckets
        .values()
        .flat_map(|b| b.models.iter().cloned())
        .collect();
    let wanted = ModelSelector::Workflow {
        workflow_id: "wf-1".to_string(),
    };
    let matched: Vec<_> = all.iter().filter(|a| a.matches(&wanted)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Daily digest");

    // Filter + sort across buckets
    let out = filter_and_sort_agents(&all, &AgentFilter::default());
    let names: Vec<_> = out.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["GPT-4", "Daily digest"]);

    // Route for the matched entry carries the workflow query
    let route = agent_route(&matched[0].model);
    assert_eq!(
        serde_json::to_value(&route).unwrap(),
        serde_json::json!({ "name": "agent-chat", "query": { "workflowId": "wf-1" } })
    );
}

#[test]
fn test_empty_catalog_yields_no_first_agent() {
    let response = ChatModelsResponse::empty();
    assert!(response.buckets.contains_key(WORKFLOW_PROVIDER));
    assert!(response.buckets.contains_key(CUSTOM_AGENT_PROVIDER));
    assert!(response.first_agent().is_none());
    assert!(filter_and_sort_agents(&[], &AgentFilter::default()).is_empty());
}

// ============================================
// Session list -> sidebar groups
// ============================================

#[test]
fn test_sidebar_grouping_from_raw_json() {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let raw = serde_json::json!([
        { "id": "s1", "title": "Today", "createdAt": "2024-01-15T08:00:00Z", "updatedAt": "2024-01-15T08:00:00Z" },
        { "id": "s2", "title": "Yesterday", "createdAt": "2024-01-14T08:00:00Z", "updatedAt": "2024-01-14T08:00:00Z" },
        { "id": "s3", "title": "Six days ago", "createdAt": "2024-01-09T08:00:00Z", "updatedAt": "2024-01-09T08:00:00Z" },
        { "id": "s4", "title": "Ten days ago", "createdAt": "2024-01-05T08:00:00Z", "updatedAt": "2024-01-05T08:00:00Z" },
    ]);
    let sessions: Vec<Session> = serde_json::from_value(raw).unwrap();

    let groups = group_sessions_by_day(&now, &sessions);
    let labels: Vec<_> = groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(labels, ["Today", "Yesterday", "This week", "Older"]);

    let total: usize = groups.iter().map(|g| g.sessions.len()).sum();
    assert_eq!(total, sessions.len());

    for group in &groups {
        let mut previous = None;
        for session in &group.sessions {
            if let Some(previous) = previous {
                assert!(session.updated_at <= previous);
            }
            previous = Some(session.updated_at);
        }
    }
}

#[test]
fn test_grouping_is_deterministic_for_a_fixed_clock() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 23, 59, 0).unwrap();
    let sessions: Vec<Session> = (0..50)
        .map(|i| Session {
            id: format!("s{i}"),
            title: format!("Session {i}"),
            created_at: now - Duration::hours(i * 7),
            updated_at: now - Duration::hours(i * 7),
            metadata: serde_json::Value::Null,
        })
        .collect();

    let first = group_sessions_by_day(&now, &sessions);
    let second = group_sessions_by_day(&now, &sessions);
    let ids = |groups: &[palaver_core::SessionGroup]| -> Vec<String> {
        groups
            .iter()
            .flat_map(|g| g.sessions.iter().map(|s| s.id.clone()))
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));
}

// ============================================
// Streaming payload -> message record
// ============================================

#[test]
fn test_streaming_payload_becomes_message_record() {
    let state: StreamingState = serde_json::from_str(
        r#"{
            "executionId": 99,
            "previousMessageId": "m41",
            "model": { "provider": "anthropic", "model": "claude-sonnet-4", "workflowId": null, "agentId": null }
        }"#,
    )
    .unwrap();

    let message = AiMessage::from_streaming_state("s1", "m42", &state);
    assert_eq!(message.status, MessageStatus::Running);
    assert_eq!(message.content, "");
    assert_eq!(message.execution_id, Some(99));
    assert_eq!(message.previous_message_id.as_deref(), Some("m41"));
    assert_eq!(message.provider.as_deref(), Some("anthropic"));
    assert_eq!(message.model.as_deref(), Some("claude-sonnet-4"));

    // The record round-trips through the store's JSON shape
    let json = serde_json::to_string(&message).unwrap();
    let back: AiMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(back, message);
}

#[test]
fn test_message_from_workflow_conversation() {
    let state = StreamingState {
        model: Some(ModelSelector::Workflow {
            workflow_id: "wf-1".to_string(),
        }),
        ..Default::default()
    };
    let message = AiMessage::from_streaming_state("s1", "m1", &state);
    assert_eq!(message.provider.as_deref(), Some(WORKFLOW_PROVIDER));
    assert_eq!(message.model, None);
    assert_eq!(message.retry_of_message_id, None);
}
