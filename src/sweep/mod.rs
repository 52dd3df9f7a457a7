//! Example smoke-test sweep
//!
//! Builds and runs every example program that has a known invocation, one at a time, and lets
//! the operator eyeball each run. A broken example is noted and the sweep moves on; at the end
//! the operator gets the list of examples that errored and the list nobody knew how to run.

pub mod invocations;

pub use invocations::{Endpoints, ExampleInvocations};

use crate::core::error::{RunbookError, RunbookResult, ResultExt};
use crate::shell::CommandSpec;
use crate::steps::StepContext;
use std::fs;
use std::path::Path;

/// Example directory that is never run
pub const LEGACY: &str = "legacy";

/// Where every example ended up
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
  /// Built and run, in sweep order (includes errored ones)
  pub attempted: Vec<String>,
  pub errored: Vec<String>,
  /// No known invocation
  pub skipped: Vec<String>,
}

/// First-level sub-directories of `dir`, sorted by name
pub fn example_names(dir: &Path) -> RunbookResult<Vec<String>> {
  let entries = fs::read_dir(dir).with_context(|| format!("Failed to list examples in {}", dir.display()))?;

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry?;
    if entry.file_type()?.is_dir() {
      names.push(entry.file_name().to_string_lossy().into_owned());
    }
  }
  names.sort();
  Ok(names)
}

/// Sweep every example under the configured examples directory
pub fn sweep(ctx: &mut StepContext<'_>, invocations: &ExampleInvocations) -> RunbookResult<SweepReport> {
  let config = ctx.config;
  let examples_dir = Path::new(&config.examples_dir);
  let mut report = SweepReport::default();

  for name in example_names(&ctx.root.join(examples_dir))? {
    if name == LEGACY {
      ctx.console.announce("Skipping legacy examples")?;
      continue;
    }
    let Some(args) = invocations.get(&name) else {
      report.skipped.push(name);
      continue;
    };

    report.attempted.push(name.clone());
    match attempt(ctx, &examples_dir.join(&name), &name, args) {
      Ok(()) => {}
      Err(err) if err.is_operator_input() => return Err(err),
      Err(err) => {
        ctx.console.announce("Exception:")?;
        ctx.console.say(err.to_string())?;
        report.errored.push(name);
      }
    }
  }

  if !report.errored.is_empty() {
    ctx.console.confirm_manual_step(format!(
      "Please check these errored examples:\n {}",
      report.errored.join(",")
    ))?;
  }
  if !report.skipped.is_empty() {
    ctx.console.confirm_manual_step(format!(
      "Please check these skipped examples manually:\n {}",
      report.skipped.join(", ")
    ))?;
  }

  Ok(report)
}

/// Build, run under the timeout, and pause for inspection
fn attempt(ctx: &mut StepContext<'_>, dir: &Path, name: &str, args: &str) -> RunbookResult<()> {
  ctx.console.announce(format!("Running {}", name))?;

  let build = ctx.shell.run(&CommandSpec::new("go", ["build"]).in_dir(dir))?;
  if !build.success() {
    return Err(RunbookError::message(format!("go build of {} failed ({})", name, build)));
  }

  let config = ctx.config;
  let run = CommandSpec::script(format!("exec ./{} {}", name, args))
    .in_dir(dir)
    .timeout(config.example_timeout());
  if ctx.shell.run(&run)?.timed_out {
    ctx
      .console
      .say(format!("{} stopped after {}s", name, config.example_timeout_secs))?;
  }

  ctx.console.confirm_manual_step("Please inspect the result.")
}
