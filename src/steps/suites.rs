//! Go test suites, run against the operator's cluster

use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::gotest;
use crate::release::ReleaseVersions;

pub struct RunKafkaTests;

impl Step for RunKafkaTests {
  fn name(&self) -> &'static str {
    "run_tests_kafka"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    let servers = ctx
      .console
      .ask("Please create your cluster and enter the bootstrap servers: ")?;
    gotest::run_suite(ctx, "kafka", Some(&servers))?;
    Ok(())
  }
}

pub struct RunSchemaRegistryTests;

impl Step for RunSchemaRegistryTests {
  fn name(&self) -> &'static str {
    "run_tests_schemaregistry"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    gotest::run_suite(ctx, "schemaregistry", None)?;
    Ok(())
  }
}
