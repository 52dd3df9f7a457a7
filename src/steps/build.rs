use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::release::ReleaseVersions;
use crate::shell::CommandSpec;

/// Clean and build every package until the operator is satisfied with the result
pub struct CleanBuild;

impl Step for CleanBuild {
  fn name(&self) -> &'static str {
    "clean_build"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    loop {
      for dir in &ctx.config.build_dirs {
        ctx.console.announce(format!("Building {}", dir))?;
        ctx.shell.run(&CommandSpec::new("go", ["clean"]).in_dir(dir))?;
        ctx.shell.run(&CommandSpec::new("go", ["build", "-v", "./..."]).in_dir(dir))?;
      }
      if ctx.console.ask_yes_no("Are you happy with the result of the build?")? {
        return Ok(());
      }
    }
  }
}
