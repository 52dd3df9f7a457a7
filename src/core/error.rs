//! Error types for release-runbook with contextual messages and exit codes
//!
//! Only a handful of things are fatal to a release run: the operator's input stream closing,
//! an unusable resume index, a broken configuration file, or an external tool that cannot be
//! spawned at all. A command that runs and exits non-zero is *not* an error here; see
//! [`crate::shell::CommandOutcome`].

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-runbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Operator or configuration error
  User = 1,
  /// System error (I/O, missing tools)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-runbook
#[derive(Debug)]
pub enum RunbookError {
  /// Unusable operator input
  Input(InputError),

  /// Configuration errors
  Config(ConfigError),

  /// External command could not be started
  Command(CommandError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RunbookError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RunbookError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RunbookError::Message { message, context, help } => RunbookError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      RunbookError::Io(err) => RunbookError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Whether the operator's side of the conversation is unusable.
  ///
  /// These errors must never be swallowed by a step that buckets failures, otherwise every
  /// following prompt would fail the same way.
  pub fn is_operator_input(&self) -> bool {
    matches!(self, RunbookError::Input(_))
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RunbookError::Input(_) => ExitCode::User,
      RunbookError::Config(_) => ExitCode::User,
      RunbookError::Command(_) => ExitCode::System,
      RunbookError::Io(_) => ExitCode::System,
      RunbookError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RunbookError::Input(e) => e.help_message(),
      RunbookError::Config(e) => e.help_message(),
      RunbookError::Command(e) => e.help_message(),
      RunbookError::Message { help, .. } => help.clone(),
      RunbookError::Io(_) => None,
    }
  }
}

impl fmt::Display for RunbookError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunbookError::Input(e) => write!(f, "{}", e),
      RunbookError::Config(e) => write!(f, "{}", e),
      RunbookError::Command(e) => write!(f, "{}", e),
      RunbookError::Io(e) => write!(f, "I/O error: {}", e),
      RunbookError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RunbookError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RunbookError::Io(e) => Some(e),
      RunbookError::Command(CommandError::Spawn { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for RunbookError {
  fn from(err: io::Error) -> Self {
    RunbookError::Io(err)
  }
}

impl From<InputError> for RunbookError {
  fn from(err: InputError) -> Self {
    RunbookError::Input(err)
  }
}

impl From<ConfigError> for RunbookError {
  fn from(err: ConfigError) -> Self {
    RunbookError::Config(err)
  }
}

impl From<CommandError> for RunbookError {
  fn from(err: CommandError) -> Self {
    RunbookError::Command(err)
  }
}

impl From<toml_edit::de::Error> for RunbookError {
  fn from(err: toml_edit::de::Error) -> Self {
    RunbookError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<regex::Error> for RunbookError {
  fn from(err: regex::Error) -> Self {
    RunbookError::message(format!("Pattern error: {}", err))
  }
}

/// Operator input errors
#[derive(Debug)]
pub enum InputError {
  /// stdin reached end-of-file while a prompt was waiting
  Closed { prompt: String },

  /// Resume point is not a step number
  ResumeIndex { entry: String, steps: usize },
}

impl InputError {
  fn help_message(&self) -> Option<String> {
    match self {
      InputError::Closed { .. } => Some("The runbook is interactive; run it from a terminal.".to_string()),
      InputError::ResumeIndex { steps, .. } => Some(format!(
        "Enter a step number between 1 and {}, or press Return to start from the beginning.",
        steps
      )),
    }
  }
}

impl fmt::Display for InputError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InputError::Closed { prompt } => write!(f, "Operator input closed while waiting for: {}", prompt.trim()),
      InputError::ResumeIndex { entry, steps } => {
        write!(f, "Invalid resume point '{}' (there are {} steps)", entry, steps)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// An explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// Example names listed more than once
  DuplicateExamples { names: Vec<String> },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Drop --config to use release.toml from the repository, or the built-in defaults.".to_string())
      }
      ConfigError::DuplicateExamples { .. } => {
        Some("Each [[examples]] name may appear only once; remove or merge the repeated entries.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Configuration file not found: {}", path.display()),
      ConfigError::DuplicateExamples { names } => {
        write!(f, "Duplicate example invocations: {}", names.join(", "))
      }
    }
  }
}

/// External command errors
#[derive(Debug)]
pub enum CommandError {
  /// Process could not be started
  Spawn { command: String, source: io::Error },
}

impl CommandError {
  fn help_message(&self) -> Option<String> {
    match self {
      CommandError::Spawn { command, source } if source.kind() == io::ErrorKind::NotFound => {
        let program = command.split_whitespace().next().unwrap_or(command);
        Some(format!("Make sure `{}` is installed and on $PATH.", program))
      }
      CommandError::Spawn { .. } => None,
    }
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandError::Spawn { command, source } => write!(f, "Failed to start `{}`: {}", command, source),
    }
  }
}

/// Result type alias for release-runbook
pub type RunbookResult<T> = Result<T, RunbookError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RunbookResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RunbookError>,
{
  fn with_context<F>(self, f: F) -> RunbookResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RunbookError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
