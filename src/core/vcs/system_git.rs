//! System git backend
//!
//! Thin wrappers over porcelain commands. Output goes straight to the operator's terminal and
//! the outcome is handed back unjudged: a failed pull or a rejected dry-run push is something
//! the operator reads and reacts to, not a reason to abort the release.

use crate::core::error::RunbookResult;
use crate::shell::{CommandOutcome, CommandSpec, Shell};

/// Git operations issued through a [`Shell`]
pub struct SystemGit<'a> {
  shell: &'a dyn Shell,
}

impl<'a> SystemGit<'a> {
  pub fn new(shell: &'a dyn Shell) -> Self {
    Self { shell }
  }

  pub fn checkout(&self, branch: &str) -> RunbookResult<CommandOutcome> {
    self.git(["checkout", branch])
  }

  /// `git pull <remote> <branch> -r`
  pub fn pull_rebase(&self, remote: &str, branch: &str) -> RunbookResult<CommandOutcome> {
    self.git(["pull", remote, branch, "-r"])
  }

  /// Create or reset `branch` at the current HEAD and switch to it
  pub fn switch_create(&self, branch: &str) -> RunbookResult<CommandOutcome> {
    self.git(["switch", "-C", branch])
  }

  pub fn tag(&self, name: &str) -> RunbookResult<CommandOutcome> {
    self.git(["tag", name])
  }

  pub fn push_dry_run(&self, remote: &str, refname: &str) -> RunbookResult<CommandOutcome> {
    self.git(["push", "--dry-run", remote, refname])
  }

  /// Unpaged log of a revision range
  pub fn log(&self, range: &str) -> RunbookResult<CommandOutcome> {
    self.git(["--no-pager", "log", range])
  }

  fn git<const N: usize>(&self, args: [&str; N]) -> RunbookResult<CommandOutcome> {
    self.shell.run(&git_cmd(args))
  }
}

/// Build a git command with safe configuration overrides
///
/// - `advice.detachedHead=false`: checkouts of tags stay quiet
/// - `core.quotePath=false`: don't escape non-ASCII paths in log output
pub(crate) fn git_cmd<I, S>(args: I) -> CommandSpec
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  let mut full: Vec<String> = ["-c", "advice.detachedHead=false", "-c", "core.quotePath=false"]
    .into_iter()
    .map(String::from)
    .collect();
  full.extend(args.into_iter().map(Into::into));
  CommandSpec::new("git", full)
}
