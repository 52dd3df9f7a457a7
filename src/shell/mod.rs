//! External process execution
//!
//! Every step of the runbook is ultimately a call to git, go, make or a shell pipeline. Calls
//! are described by a [`CommandSpec`] and executed through the [`Shell`] trait so steps can be
//! exercised against a scripted fake in tests.
//!
//! Execution is best-effort: a command that starts and exits non-zero yields a
//! [`CommandOutcome`] the caller is free to ignore. Only a failure to start the process is an
//! error, because the operator watches the console and re-runs a step by number when
//! something looks wrong.

mod system;

pub use system::SystemShell;

use crate::core::error::RunbookResult;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How the process is started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
  /// Program plus argument list, no shell interpretation
  Args { program: String, args: Vec<String> },
  /// A single string handed to `sh -c`
  Script(String),
}

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub invocation: Invocation,
  /// Working directory, relative to the repository root
  pub dir: Option<PathBuf>,
  pub envs: Vec<(String, String)>,
  pub timeout: Option<Duration>,
}

impl CommandSpec {
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::from_invocation(Invocation::Args {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    })
  }

  pub fn script(script: impl Into<String>) -> Self {
    Self::from_invocation(Invocation::Script(script.into()))
  }

  fn from_invocation(invocation: Invocation) -> Self {
    Self {
      invocation,
      dir: None,
      envs: Vec::new(),
      timeout: None,
    }
  }

  pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
    self.dir = Some(dir.as_ref().to_path_buf());
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.envs.push((key.into(), value.into()));
    self
  }

  pub fn timeout(mut self, limit: Duration) -> Self {
    self.timeout = Some(limit);
    self
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(dir) = &self.dir {
      write!(f, "(in {}) ", dir.display())?;
    }
    match &self.invocation {
      Invocation::Args { program, args } if args.is_empty() => write!(f, "{}", program),
      Invocation::Args { program, args } => write!(f, "{} {}", program, args.join(" ")),
      Invocation::Script(script) => write!(f, "sh -c '{}'", script),
    }
  }
}

/// What happened to a command that was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
  /// Exit code; `None` when killed by a signal
  pub code: Option<i32>,
  /// The wall-clock limit expired and the process was killed
  pub timed_out: bool,
}

impl CommandOutcome {
  pub fn exited(code: Option<i32>) -> Self {
    Self { code, timed_out: false }
  }

  pub fn timed_out() -> Self {
    Self {
      code: None,
      timed_out: true,
    }
  }

  pub fn success(&self) -> bool {
    !self.timed_out && self.code == Some(0)
  }
}

impl fmt::Display for CommandOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.timed_out, self.code) {
      (true, _) => write!(f, "timed out"),
      (false, Some(code)) => write!(f, "exit code {}", code),
      (false, None) => write!(f, "terminated by signal"),
    }
  }
}

/// Lines of a command's stdout, read lazily until the stream closes
pub type LineStream = Box<dyn Iterator<Item = String>>;

/// Runs external commands on behalf of the steps
pub trait Shell {
  /// Run to completion with output going straight to the terminal
  fn run(&self, spec: &CommandSpec) -> RunbookResult<CommandOutcome>;

  /// Start the command and hand back its stdout line by line
  fn stream(&self, spec: &CommandSpec) -> RunbookResult<LineStream>;
}
