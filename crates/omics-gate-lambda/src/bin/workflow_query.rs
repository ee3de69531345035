// crates/omics-gate-lambda/src/bin/workflow_query.rs
// ============================================================================
// Module: Workflow Query Function
// Description: Entrypoint for the read-side workflow resolver.
// Purpose: Serve workflow, run, and task queries from the GraphQL API.
// Dependencies: omics-gate-lambda, omics-gate-aws, omics-gate-resolvers
// ============================================================================

//! Workflow query function entrypoint.

use lambda_runtime::Error;
use lambda_runtime::LambdaEvent;
use lambda_runtime::service_fn;
use serde_json::Value;

use omics_gate_aws::OmicsWorkflows;
use omics_gate_core::ResolverEvent;
use omics_gate_lambda::bootstrap;
use omics_gate_lambda::init_telemetry;
use omics_gate_resolvers::WorkflowQueryResolver;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry();
    let (config, shared) = bootstrap("workflow-query").await?;
    let resolver = WorkflowQueryResolver::new(config, OmicsWorkflows::new(&shared));
    let resolver = &resolver;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ResolverEvent>| async move {
        Ok::<Value, Error>(resolver.handle(&event.payload).await)
    }))
    .await
}
