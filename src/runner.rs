//! Interactive session driver
//!
//! Collects the old and new version, lists the steps, and runs the sequence from the step the
//! operator picks. Resuming is by position only; nothing about earlier runs is persisted.

use crate::core::config::RunbookConfig;
use crate::core::error::{InputError, RunbookResult};
use crate::release::ReleaseVersions;
use crate::shell::Shell;
use crate::steps::{StepContext, StepSequence};
use crate::ui::Console;
use std::path::Path;

const RESUME_PROMPT: &str = "Please press Enter to start at beginning, or enter a number to resume at a step: ";

/// Print the numbered step list, 1-based
pub fn list_steps(console: &mut Console, steps: &StepSequence) -> RunbookResult<()> {
  for (i, name) in steps.names().enumerate() {
    console.say(format!("{}. {}", i + 1, name))?;
  }
  Ok(())
}

/// Turn the operator's reply into a 0-based start index
///
/// Empty means the first step. Anything else must be a step number between 1 and `len`.
pub fn parse_resume_point(entry: &str, len: usize) -> RunbookResult<usize> {
  let entry = entry.trim();
  if entry.is_empty() {
    return Ok(0);
  }
  match entry.parse::<usize>() {
    Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
    _ => Err(
      InputError::ResumeIndex {
        entry: entry.to_string(),
        steps: len,
      }
      .into(),
    ),
  }
}

/// Run every step from `start` to the end, stopping at the first error
pub fn run_from(
  steps: &StepSequence,
  start: usize,
  ctx: &mut StepContext<'_>,
  versions: &ReleaseVersions,
) -> RunbookResult<()> {
  for (i, step) in steps.starting_at(start) {
    ctx.console.announce(format!("{}. {} will be run.\n", i + 1, step.name()))?;
    tracing::debug!(step = step.name(), index = i + 1, "starting step");
    step.run(ctx, versions)?;
  }
  Ok(())
}

/// One full interactive session
pub fn run_session(
  console: &mut Console,
  shell: &dyn Shell,
  config: &RunbookConfig,
  root: &Path,
  steps: &StepSequence,
) -> RunbookResult<()> {
  let versions = ReleaseVersions::prompt(console)?;
  let branches = config.branches(&versions.new);
  tracing::debug!(
    old = %versions.old,
    new = %versions.new,
    pre_release = %branches.pre_release,
    "release versions"
  );

  list_steps(console, steps)?;
  if let Some(first) = steps.names().next() {
    console.say(format!("Numbers refer to the list above, where {} is step 1.", first))?;
  }
  let reply = console.ask(RESUME_PROMPT)?;
  let start = parse_resume_point(&reply, steps.len())?;

  let mut ctx = StepContext {
    console,
    shell,
    config,
    branches: &branches,
    root,
  };
  run_from(steps, start, &mut ctx, &versions)?;

  ctx.console.announce("Great work, the release is now complete!")
}
