// crates/omics-gate-resolvers/tests/workflow_mutation.rs
// ============================================================================
// Module: Workflow Mutation Resolver Tests
// Description: Verify run-start permission checks and credential scoping.
// Purpose: Ensure denied and failed requests never reach the workflow service.
// Dependencies: omics-gate-resolvers, omics-gate-core, tokio
// ============================================================================

//! Workflow mutation resolver tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test setup uses unwraps for clarity."
)]

mod common;

use std::collections::BTreeMap;

use common::FakeBroker;
use common::FakeRegistry;
use common::FakeRoles;
use common::FakeWorkflows;
use common::event;
use common::multi_tenant_config;
use common::single_tenant_config;
use common::tenant_event;
use omics_gate_core::TENANT_TAG_KEY;
use omics_gate_core::TagSet;
use omics_gate_core::TenantRole;
use omics_gate_resolvers::WorkflowMutationResolver;
use serde_json::Value;
use serde_json::json;

const HOST: &str = "dkr.ecr.us-east-1.amazonaws.com";

/// Role whose tenant tag matches the repository fixture.
fn acme_role() -> TenantRole {
    TenantRole {
        arn: "arn:aws:iam::123:role/acme/execution".to_string(),
        tenant_tag: "acme".to_string(),
    }
}

/// Registry with one repository named after the role tag, tagged `acme`.
fn acme_registry() -> FakeRegistry {
    let mut tags = TagSet::new();
    tags.insert(TENANT_TAG_KEY, "acme");
    FakeRegistry {
        tags_by_name: BTreeMap::from([("acme".to_string(), tags)]),
        ..FakeRegistry::default()
    }
}

fn start_run_arguments(image: &str) -> Value {
    json!({
        "input": {
            "workflowId": "wf-1",
            "name": "demo",
            "parameters": { "image": image }
        }
    })
}

#[tokio::test]
async fn unknown_field_yields_descriptive_string() {
    let resolver = WorkflowMutationResolver::new(
        single_tenant_config(),
        FakeWorkflows::default(),
        FakeRegistry::default(),
        FakeRoles::default(),
        FakeBroker::default(),
    );
    let response = resolver.handle(&event("deleteRunCommand", json!({}))).await;
    assert_eq!(response, json!("Unknown field, unable to resolve deleteRunCommand"));
}

#[tokio::test]
async fn single_tenant_start_injects_run_role_without_credentials() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let resolver = WorkflowMutationResolver::new(
        single_tenant_config(),
        workflows,
        FakeRegistry::default(),
        FakeRoles::default(),
        FakeBroker::default(),
    );
    let response = resolver
        .handle(&event("startRunCommand", start_run_arguments("public.example.com/tool")))
        .await;
    assert_eq!(response["id"], "run-new");
    let started = probe.started.lock().unwrap();
    let (input, scoped) = &started[0];
    assert_eq!(input.role_arn.as_deref(), Some("arn:aws:iam::123:role/run"));
    assert_eq!(input.tags, None);
    assert!(!scoped);
}

#[tokio::test]
async fn multi_tenant_start_uses_tenant_role_tag_and_scoped_credentials() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let broker = FakeBroker::default();
    let issued = broker.clone();
    let resolver = WorkflowMutationResolver::new(
        multi_tenant_config(),
        workflows,
        acme_registry(),
        FakeRoles {
            role: Some(acme_role()),
        },
        broker,
    );
    let response = resolver
        .handle(&tenant_event(
            "startRunCommand",
            start_run_arguments(&format!("123.{HOST}/acme/tool:latest")),
            "acme",
        ))
        .await;
    assert_eq!(response["id"], "run-new");
    let started = probe.started.lock().unwrap();
    let (input, scoped) = &started[0];
    assert_eq!(input.role_arn.as_deref(), Some("arn:aws:iam::123:role/acme/execution"));
    assert_eq!(
        input.tags.as_ref().unwrap().get(TENANT_TAG_KEY).map(String::as_str),
        Some("acme")
    );
    assert!(scoped);
    assert_eq!(*issued.issued.lock().unwrap(), vec!["acme".to_string()]);
}

#[tokio::test]
async fn repository_tag_mismatch_denies_before_any_start_call() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let mut other_tags = TagSet::new();
    other_tags.insert(TENANT_TAG_KEY, "other");
    let registry = FakeRegistry {
        tags_by_name: BTreeMap::from([("acme".to_string(), other_tags)]),
        ..FakeRegistry::default()
    };
    let resolver = WorkflowMutationResolver::new(
        multi_tenant_config(),
        workflows,
        registry,
        FakeRoles {
            role: Some(acme_role()),
        },
        FakeBroker::default(),
    );
    let response = resolver
        .handle(&tenant_event(
            "startRunCommand",
            start_run_arguments(&format!("123.{HOST}/acme/tool:latest")),
            "acme",
        ))
        .await;
    assert_eq!(response["statusCode"], 403);
    assert!(response["body"].as_str().unwrap().contains("AccessDenied"));
    assert!(probe.started.lock().unwrap().is_empty());
}

#[tokio::test]
async fn foreign_image_uri_denies_the_start() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let resolver = WorkflowMutationResolver::new(
        multi_tenant_config(),
        workflows,
        acme_registry(),
        FakeRoles {
            role: Some(acme_role()),
        },
        FakeBroker::default(),
    );
    let response = resolver
        .handle(&tenant_event(
            "startRunCommand",
            start_run_arguments(&format!("123.{HOST}/other/tool:latest")),
            "acme",
        ))
        .await;
    assert_eq!(response["statusCode"], 403);
    assert!(probe.started.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_credential_exchange_fails_closed() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let resolver = WorkflowMutationResolver::new(
        multi_tenant_config(),
        workflows,
        acme_registry(),
        FakeRoles {
            role: Some(acme_role()),
        },
        FakeBroker {
            fail: true,
            ..FakeBroker::default()
        },
    );
    let response = resolver
        .handle(&tenant_event(
            "startRunCommand",
            start_run_arguments(&format!("123.{HOST}/acme/tool:latest")),
            "acme",
        ))
        .await;
    assert_eq!(response["statusCode"], 403);
    assert!(probe.started.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_tenant_role_denies_the_start() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let resolver = WorkflowMutationResolver::new(
        multi_tenant_config(),
        workflows,
        acme_registry(),
        FakeRoles::default(),
        FakeBroker::default(),
    );
    let response = resolver
        .handle(&tenant_event(
            "startRunCommand",
            start_run_arguments(&format!("123.{HOST}/acme/tool:latest")),
            "acme",
        ))
        .await;
    assert_eq!(response["statusCode"], 403);
    let body: String = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
    assert!(body.contains("no execution role found"));
    assert!(probe.started.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_workflow_sets_request_id_and_tenant_tag() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let broker = FakeBroker::default();
    let resolver = WorkflowMutationResolver::new(
        multi_tenant_config(),
        workflows,
        acme_registry(),
        FakeRoles {
            role: Some(acme_role()),
        },
        broker,
    );
    let response = resolver
        .handle(&tenant_event(
            "createWorkflowCommand",
            json!({ "input": { "name": "variant-calling", "engine": "WDL" } }),
            "acme",
        ))
        .await;
    assert_eq!(response["id"], "wf-new");
    let created = probe.created.lock().unwrap();
    let (input, scoped) = &created[0];
    assert!(input.request_id.is_some());
    assert_eq!(
        input.tags.as_ref().unwrap().get(TENANT_TAG_KEY).map(String::as_str),
        Some("acme")
    );
    assert!(scoped);
}

#[tokio::test]
async fn create_workflow_without_tenant_skips_tagging_and_scoping() {
    let workflows = FakeWorkflows::default();
    let probe = workflows.clone();
    let resolver = WorkflowMutationResolver::new(
        single_tenant_config(),
        workflows,
        FakeRegistry::default(),
        FakeRoles::default(),
        FakeBroker::default(),
    );
    let _ = resolver
        .handle(&event(
            "createWorkflowCommand",
            json!({ "input": { "name": "variant-calling" } }),
        ))
        .await;
    let created = probe.created.lock().unwrap();
    let (input, scoped) = &created[0];
    assert_eq!(input.tags, None);
    assert!(!scoped);
}

#[tokio::test]
async fn missing_input_argument_yields_denial_envelope() {
    let resolver = WorkflowMutationResolver::new(
        single_tenant_config(),
        FakeWorkflows::default(),
        FakeRegistry::default(),
        FakeRoles::default(),
        FakeBroker::default(),
    );
    let response = resolver.handle(&event("startRunCommand", json!({}))).await;
    assert_eq!(response["statusCode"], 403);
    assert!(response["body"].as_str().unwrap().contains("input"));
}
