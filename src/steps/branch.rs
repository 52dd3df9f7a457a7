//! Branch management around the pre-release working branch

use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::release::ReleaseVersions;

/// Check out and pull the release branch
fn sync_release_branch(ctx: &mut StepContext<'_>) -> RunbookResult<()> {
  let git = ctx.git();
  git.checkout(&ctx.branches.release)?;
  git.pull_rebase(&ctx.branches.remote, &ctx.branches.release)?;
  Ok(())
}

/// Sync the release branch, then (re)create the pre-release branch on top of it
fn recut_pre_release(ctx: &mut StepContext<'_>) -> RunbookResult<()> {
  sync_release_branch(ctx)?;
  ctx.git().switch_create(&ctx.branches.pre_release)?;
  ctx.console.confirm_manual_step(format!(
    "\nPlease rebase {} onto {}.",
    ctx.branches.pre_release, ctx.branches.release
  ))
}

pub struct Init;

impl Step for Init {
  fn name(&self) -> &'static str {
    "init"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    ctx.console.announce("Starting release process.")?;
    ctx.console.announce(format!(
      "Checking out to {}, pulling, and then checking out to {} for the remaining work",
      ctx.branches.release, ctx.branches.pre_release
    ))?;
    recut_pre_release(ctx)
  }
}

pub struct ImportBundle;

impl Step for ImportBundle {
  fn name(&self) -> &'static str {
    "import_bundle"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    ctx.console.confirm_manual_step(format!(
      "\nUpdate the static bundle, and press return when done.\n\
       You need to create a PR for it, and get it merged into {release}. \
       I will checkout to {release}, pull and then checkout to {pre} again once that's done.",
      release = ctx.branches.release,
      pre = ctx.branches.pre_release,
    ))?;
    recut_pre_release(ctx)
  }
}

pub struct MergePreRelease;

impl Step for MergePreRelease {
  fn name(&self) -> &'static str {
    "merge_pre_release"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    ctx.console.confirm_manual_step(format!(
      "Please create a PR for the changes on {pre}. \
       After merging the PR into {release}, I will checkout to {release} and pull.",
      release = ctx.branches.release,
      pre = ctx.branches.pre_release,
    ))?;
    sync_release_branch(ctx)
  }
}
