//! Test doubles shared by the unit tests

use crate::core::config::{Branches, RunbookConfig};
use crate::core::error::RunbookResult;
use crate::shell::{CommandOutcome, CommandSpec, LineStream, Shell};
use crate::steps::StepContext;
use crate::ui::Console;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Cursor, Write};
use std::rc::Rc;
use tempfile::TempDir;

/// Cloneable sink so a test can read what the console printed
#[derive(Clone, Default)]
pub struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
  pub fn contents(&self) -> String {
    String::from_utf8_lossy(&self.0.borrow()).into_owned()
  }
}

impl Write for OutputBuffer {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.borrow_mut().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

/// Console fed from a fixed script of operator replies
pub fn scripted_console(input: &str) -> (Console, OutputBuffer) {
  let output = OutputBuffer::default();
  let console = Console::new(Box::new(Cursor::new(input.as_bytes().to_vec())), Box::new(output.clone()));
  (console, output)
}

/// Records every command and replays canned outcomes and output streams
#[derive(Default)]
pub struct FakeShell {
  calls: RefCell<Vec<CommandSpec>>,
  outcomes: RefCell<VecDeque<CommandOutcome>>,
  streams: RefCell<VecDeque<Vec<String>>>,
}

impl FakeShell {
  /// Queue the outcome of the next `run` call; unqueued calls succeed
  pub fn push_outcome(&self, outcome: CommandOutcome) {
    self.outcomes.borrow_mut().push_back(outcome);
  }

  /// Queue the stdout of the next `stream` call; unqueued calls produce nothing
  pub fn push_stream<I, S>(&self, lines: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .streams
      .borrow_mut()
      .push_back(lines.into_iter().map(Into::into).collect());
  }

  pub fn calls(&self) -> Vec<CommandSpec> {
    self.calls.borrow().clone()
  }

  /// Rendered command lines, in call order
  pub fn commands(&self) -> Vec<String> {
    self.calls.borrow().iter().map(ToString::to_string).collect()
  }
}

impl Shell for FakeShell {
  fn run(&self, spec: &CommandSpec) -> RunbookResult<CommandOutcome> {
    self.calls.borrow_mut().push(spec.clone());
    Ok(
      self
        .outcomes
        .borrow_mut()
        .pop_front()
        .unwrap_or(CommandOutcome::exited(Some(0))),
    )
  }

  fn stream(&self, spec: &CommandSpec) -> RunbookResult<LineStream> {
    self.calls.borrow_mut().push(spec.clone());
    let lines = self.streams.borrow_mut().pop_front().unwrap_or_default();
    Ok(Box::new(lines.into_iter()))
  }
}

/// Everything a step needs, backed by fakes and a scratch repository directory
pub struct Harness {
  pub console: Console,
  pub output: OutputBuffer,
  pub shell: FakeShell,
  pub config: RunbookConfig,
  pub branches: Branches,
  pub root: TempDir,
}

impl Harness {
  pub fn new(input: &str) -> Self {
    let (console, output) = scripted_console(input);
    let config = RunbookConfig::default();
    let branches = config.branches("2.0.0");
    Self {
      console,
      output,
      shell: FakeShell::default(),
      config,
      branches,
      root: tempfile::tempdir().expect("create scratch repository"),
    }
  }

  pub fn ctx(&mut self) -> StepContext<'_> {
    StepContext {
      console: &mut self.console,
      shell: &self.shell,
      config: &self.config,
      branches: &self.branches,
      root: self.root.path(),
    }
  }

  pub fn printed(&self) -> String {
    self.output.contents()
  }
}
