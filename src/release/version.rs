use crate::core::error::RunbookResult;
use crate::ui::Console;

/// The version being replaced and the version being released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersions {
  pub old: String,
  pub new: String,
}

impl ReleaseVersions {
  pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
    Self {
      old: old.into(),
      new: new.into(),
    }
  }

  /// Ask the operator for both versions. Whatever is typed is taken as-is.
  pub fn prompt(console: &mut Console) -> RunbookResult<Self> {
    let old = console.ask("The old version is: (eg. 1.9.0) ")?;
    let new = console.ask("The new version is: (eg. 2.0.2) ")?;
    Ok(Self { old, new })
  }

  /// Whether the leading dotted segment differs
  pub fn is_major_change(&self) -> bool {
    major(&self.old) != major(&self.new)
  }

  /// Tag for the new release
  pub fn tag(&self) -> String {
    format!("v{}", self.new)
  }

  /// Tag of the previous release
  pub fn previous_tag(&self) -> String {
    format!("v{}", self.old)
  }
}

fn major(version: &str) -> &str {
  version.split('.').next().unwrap_or(version)
}
