//! Shell backed by real processes

use super::{CommandOutcome, CommandSpec, Invocation, LineStream, Shell};
use crate::core::error::{CommandError, RunbookResult};
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs commands against a repository checkout on disk
pub struct SystemShell {
  root: PathBuf,
}

impl SystemShell {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }

  fn command(&self, spec: &CommandSpec) -> Command {
    let mut cmd = match &spec.invocation {
      Invocation::Args { program, args } => {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd
      }
      Invocation::Script(script) => {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
      }
    };

    match &spec.dir {
      Some(dir) => cmd.current_dir(self.root.join(dir)),
      None => cmd.current_dir(&self.root),
    };
    cmd.envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    cmd
  }

  fn spawn(&self, spec: &CommandSpec, cmd: &mut Command) -> RunbookResult<Child> {
    tracing::debug!(command = %spec, "spawning");
    cmd.spawn().map_err(|source| {
      CommandError::Spawn {
        command: spec.to_string(),
        source,
      }
      .into()
    })
  }
}

impl Shell for SystemShell {
  fn run(&self, spec: &CommandSpec) -> RunbookResult<CommandOutcome> {
    let mut child = self.spawn(spec, &mut self.command(spec))?;

    let outcome = match spec.timeout {
      Some(limit) => wait_with_timeout(&mut child, limit)?,
      None => CommandOutcome::exited(child.wait()?.code()),
    };

    if !outcome.success() {
      tracing::warn!(command = %spec, "{}", outcome);
    }
    Ok(outcome)
  }

  fn stream(&self, spec: &CommandSpec) -> RunbookResult<LineStream> {
    let mut cmd = self.command(spec);
    cmd.stdout(Stdio::piped()).stderr(Stdio::inherit());

    let mut child = self.spawn(spec, &mut cmd)?;
    let stdout = child
      .stdout
      .take()
      .ok_or_else(|| io::Error::other("child stdout was not captured"))?;

    Ok(Box::new(ChildLines {
      command: spec.to_string(),
      child: Some(child),
      lines: BufReader::new(stdout).lines(),
    }))
  }
}

/// Poll until the child exits or the limit passes, killing it in the latter case
fn wait_with_timeout(child: &mut Child, limit: Duration) -> io::Result<CommandOutcome> {
  let deadline = Instant::now() + limit;
  loop {
    if let Some(status) = child.try_wait()? {
      return Ok(CommandOutcome::exited(status.code()));
    }
    if Instant::now() >= deadline {
      if let Err(err) = child.kill() {
        tracing::debug!("kill after timeout failed: {}", err);
      }
      child.wait()?;
      return Ok(CommandOutcome::timed_out());
    }
    thread::sleep(POLL_INTERVAL);
  }
}

/// Stdout of a running child; the child is reaped once the stream closes
struct ChildLines {
  command: String,
  child: Option<Child>,
  lines: Lines<BufReader<ChildStdout>>,
}

impl ChildLines {
  fn reap(&mut self) {
    if let Some(mut child) = self.child.take() {
      match child.wait() {
        Ok(status) if !status.success() => {
          tracing::debug!(command = %self.command, "{}", CommandOutcome::exited(status.code()))
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(command = %self.command, "failed to wait for child: {}", err),
      }
    }
  }
}

impl Iterator for ChildLines {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    loop {
      match self.lines.next() {
        Some(Ok(line)) => return Some(line),
        // Non UTF-8 output is never a structured record
        Some(Err(err)) if err.kind() == io::ErrorKind::InvalidData => continue,
        Some(Err(err)) => {
          tracing::warn!(command = %self.command, "reading output failed: {}", err);
          self.reap();
          return None;
        }
        None => {
          self.reap();
          return None;
        }
      }
    }
  }
}

impl Drop for ChildLines {
  fn drop(&mut self) {
    // Dropped before the stream closed: the child may be blocked on a full pipe
    if let Some(child) = self.child.as_mut() {
      let _ = child.kill();
    }
    self.reap();
  }
}
