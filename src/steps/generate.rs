//! Regenerated sources and documentation

use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::release::ReleaseVersions;
use crate::shell::CommandSpec;
use std::path::PathBuf;

const MAKEFILE: &str = "mk/Makefile";

fn make(target: &str) -> CommandSpec {
  CommandSpec::new("make", ["-f", MAKEFILE, target])
}

/// Regenerate the error-code tables from the vendored header
pub struct UpdateErrorCodes;

impl Step for UpdateErrorCodes {
  fn name(&self) -> &'static str {
    "update_error_codes"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    ctx.console.confirm_manual_step("Going to generate errors")?;
    ctx.shell.run(&make("generr"))?;
    ctx.console.announce("Generated errors.")
  }
}

/// Build the API docs inside a Python virtualenv
pub struct GenerateDocs;

impl Step for GenerateDocs {
  fn name(&self) -> &'static str {
    "generate_docs"
  }

  fn run(&self, ctx: &mut StepContext<'_>, _versions: &ReleaseVersions) -> RunbookResult<()> {
    ctx
      .console
      .confirm_manual_step("Going to generate docs. Make sure that godoc is installed and on the $PATH")?;

    let mut activate = ctx
      .console
      .ask("Either specify a virtualenv path to activate, or leave empty to create a new one: ")?;
    if activate.is_empty() {
      let venv = scratch_venv_path();
      ctx.shell.run(&CommandSpec::new(
        "virtualenv",
        [
          "--python".to_string(),
          "/usr/bin/python3".to_string(),
          venv.display().to_string(),
        ],
      ))?;
      activate = venv.join("bin").join("activate").display().to_string();
    }

    ctx.shell.run(&docs_script(&activate))?;
    ctx.console.announce("Generated docs.")
  }
}

/// Fresh virtualenv location with a random suffix
fn scratch_venv_path() -> PathBuf {
  std::env::temp_dir().join(format!(".releasevenv-{}", rand::random_range(0..=200u32)))
}

fn docs_script(activate: &str) -> CommandSpec {
  CommandSpec::script(format!(
    ". {}; pip install beautifulsoup4; make -f {} docs; deactivate",
    activate, MAKEFILE
  ))
}
