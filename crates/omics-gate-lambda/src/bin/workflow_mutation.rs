// crates/omics-gate-lambda/src/bin/workflow_mutation.rs
// ============================================================================
// Module: Workflow Mutation Function
// Description: Entrypoint for the write-side workflow resolver.
// Purpose: Serve run starts and workflow creation from the GraphQL API.
// Dependencies: omics-gate-lambda, omics-gate-aws, omics-gate-resolvers
// ============================================================================

//! Workflow mutation function entrypoint.

use lambda_runtime::Error;
use lambda_runtime::LambdaEvent;
use lambda_runtime::service_fn;
use serde_json::Value;

use omics_gate_aws::EcrRegistry;
use omics_gate_aws::IamRoleDirectory;
use omics_gate_aws::OmicsWorkflows;
use omics_gate_aws::StsBroker;
use omics_gate_core::ResolverEvent;
use omics_gate_lambda::bootstrap;
use omics_gate_lambda::init_telemetry;
use omics_gate_resolvers::WorkflowMutationResolver;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry();
    let (config, shared) = bootstrap("workflow-mutation").await?;
    let resolver = WorkflowMutationResolver::new(
        config,
        OmicsWorkflows::new(&shared),
        EcrRegistry::new(&shared),
        IamRoleDirectory::new(&shared),
        StsBroker::new(&shared),
    );
    let resolver = &resolver;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ResolverEvent>| async move {
        Ok::<Value, Error>(resolver.handle(&event.payload).await)
    }))
    .await
}
