//! Tagging and the GitHub release

use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::release::ReleaseVersions;

/// Create the release tag locally and dry-run pushing it
///
/// The real push is left to the operator.
pub struct Tag;

impl Step for Tag {
  fn name(&self) -> &'static str {
    "tag"
  }

  fn run(&self, ctx: &mut StepContext<'_>, versions: &ReleaseVersions) -> RunbookResult<()> {
    let tag = versions.tag();
    let git = ctx.git();

    ctx.console.announce("Creating a local tag")?;
    git.tag(&tag)?;

    ctx.console.announce("Dry-running the push of the tag")?;
    git.push_dry_run(&ctx.branches.remote, &tag)?;

    ctx.console.confirm_manual_step(format!(
      "If the results of the dry-run were fine, run the following command:\n\tgit push {} {}\n",
      ctx.branches.remote, tag
    ))
  }
}

pub struct ReleaseNotes;

impl Step for ReleaseNotes {
  fn name(&self) -> &'static str {
    "release_notes"
  }

  fn run(&self, ctx: &mut StepContext<'_>, versions: &ReleaseVersions) -> RunbookResult<()> {
    ctx.console.confirm_manual_step(format!(
      "Create the release on {}/releases/new?tag={}",
      ctx.config.repository_url.trim_end_matches('/'),
      versions.tag()
    ))
  }
}
