use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::release::ReleaseVersions;
use crate::sweep::{self, Endpoints, ExampleInvocations};

/// Build and run every example program against a live cluster
pub struct RunExamples;

impl Step for RunExamples {
  fn name(&self) -> &'static str {
    "run_examples"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    let config = ctx.config;

    let mut servers = ctx.console.ask(
      "Starting to run examples.\nPlease create your cluster and enter the cluster bootstrap servers [eg. localhost:9092]: ",
    )?;
    if servers.is_empty() {
      servers = config.default_bootstrap_servers.clone();
    }
    let schema_registry = ctx
      .console
      .ask("Enter the url of schemaregistry: [eg. http://localhost:8081/]")?;

    let endpoints = Endpoints {
      servers,
      schema_registry,
    };
    let invocations = ExampleInvocations::resolve(&config.examples, &endpoints)?;
    tracing::debug!(count = invocations.len(), "resolved example invocations");

    sweep::sweep(ctx, &invocations)?;
    Ok(())
  }
}
