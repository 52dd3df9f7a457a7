use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::release::ReleaseVersions;

pub struct ReviewChangelog;

impl Step for ReviewChangelog {
  fn name(&self) -> &'static str {
    "review_changelog"
  }

  fn run(&self, ctx: &mut StepContext<'_>, versions: &ReleaseVersions) -> RunbookResult<()> {
    ctx.git().log(&format!("HEAD...{}", versions.previous_tag()))?;
    ctx
      .console
      .confirm_manual_step("\nReview the changelog, and press return when all entries added.")
  }
}
