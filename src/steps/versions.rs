//! Version bookkeeping steps

use super::{Step, StepContext};
use crate::core::error::RunbookResult;
use crate::release::ReleaseVersions;
use crate::release::vendor;
use std::path::Path;

/// Bump the librdkafka version in the Go sources, README and doc generator
///
/// Each file is only touched after the operator agrees to it.
pub struct UpdateLibrdkafkaVersion;

impl Step for UpdateLibrdkafkaVersion {
  fn name(&self) -> &'static str {
    "update_librdkafka_version"
  }

  fn run(&self, ctx: &mut StepContext<'_>, versions: &ReleaseVersions) -> RunbookResult<()> {
    let config = ctx.config;
    let paths = &config.vendor;

    if ctx
      .console
      .ask_yes_no(format!("Can I update the librdkafka version in {}?", paths.version_file.display()))?
    {
      let header = std::fs::read_to_string(ctx.root.join(&paths.header))?;
      match vendor::min_version_from_header(&header)? {
        Some(hex) => {
          ctx.console.announce(format!("Hex version is {}", hex))?;
          edit_vendored_file(ctx, &paths.version_file, |source| {
            let source = vendor::set_min_version(source, &hex)?;
            vendor::set_tagged_version(&source, &versions.new)
          })?;
        }
        None => {
          ctx.console.announce(format!(
            "No RD_KAFKA_VERSION in {}, leaving {} alone",
            paths.header.display(),
            paths.version_file.display()
          ))?;
        }
      }
    }

    if ctx
      .console
      .ask_yes_no(format!("Can I update the librdkafka version in {}?", paths.readme.display()))?
    {
      edit_vendored_file(ctx, &paths.readme, |source| {
        vendor::set_readme_version(source, &versions.new)
      })?;
    }

    if ctx
      .console
      .ask_yes_no(format!("Can I update {}?", paths.doc_gen_script.display()))?
    {
      edit_vendored_file(ctx, &paths.doc_gen_script, |source| {
        vendor::set_doc_gen_version(source, &versions.new)
      })?;
    }

    Ok(())
  }
}

/// Rewrite one file under the repository root
///
/// A file that cannot be read or written is reported and skipped; only console errors propagate.
fn edit_vendored_file<F>(ctx: &mut StepContext<'_>, path: &Path, edit: F) -> RunbookResult<()>
where
  F: FnOnce(&str) -> RunbookResult<String>,
{
  match vendor::rewrite_file(&ctx.root.join(path), edit) {
    Ok(_) => ctx.console.announce(format!("Updated {}", path.display())),
    Err(err) => {
      tracing::warn!(file = %path.display(), "version update failed: {}", err);
      ctx
        .console
        .announce(format!("Could not update {}, please edit it by hand: {}", path.display(), err))
    }
  }
}

/// A new major version changes the Go module path
pub struct MajorVersionCheck;

impl Step for MajorVersionCheck {
  fn name(&self) -> &'static str {
    "major_version_check"
  }

  fn run(&self, ctx: &mut StepContext<'_>, versions: &ReleaseVersions) -> RunbookResult<()> {
    if !versions.is_major_change() {
      return Ok(());
    }
    ctx.console.confirm_manual_step(
      "There is a major version change, please replace module name in the go.mod files, and wherever they are imported.",
    )
  }
}
