//! Operator interaction
//!
//! Every suspension point of a release run is one of these prompts. Text describing an
//! automated action is printed in bright cyan so it stands apart from the output of the
//! tools being driven.

use crate::core::error::{InputError, RunbookResult};
use anstyle::{AnsiColor, Color, Style};
use std::io::{self, BufRead, Write};

const ACTION: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightCyan)));

/// Line-oriented conversation with the operator
pub struct Console {
  input: Box<dyn BufRead>,
  output: Box<dyn Write>,
}

impl Console {
  pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
    Self { input, output }
  }

  /// Console over the process's stdin and stdout
  pub fn stdio() -> Self {
    Self::new(Box::new(io::stdin().lock()), Box::new(io::stdout()))
  }

  /// Describe an action the runbook is about to take
  pub fn announce(&mut self, text: impl AsRef<str>) -> RunbookResult<()> {
    writeln!(self.output, "{ACTION}{}{ACTION:#}", text.as_ref())?;
    self.output.flush()?;
    Ok(())
  }

  /// Like [`Console::announce`] but leaves the cursor on the same line
  pub fn announce_inline(&mut self, text: impl AsRef<str>) -> RunbookResult<()> {
    write!(self.output, "{ACTION}{}{ACTION:#}", text.as_ref())?;
    self.output.flush()?;
    Ok(())
  }

  /// Plain, unstyled line
  pub fn say(&mut self, text: impl AsRef<str>) -> RunbookResult<()> {
    writeln!(self.output, "{}", text.as_ref())?;
    self.output.flush()?;
    Ok(())
  }

  /// Ask for free text; surrounding whitespace is trimmed
  pub fn ask(&mut self, prompt: &str) -> RunbookResult<String> {
    self.announce_inline(prompt)?;
    Ok(self.read_line(prompt)?.trim().to_string())
  }

  /// Gate on a task the operator performs outside the runbook. The reply is never inspected.
  pub fn confirm_manual_step(&mut self, prompt: impl AsRef<str>) -> RunbookResult<()> {
    let prompt = format!("{} (Press Return to continue)", prompt.as_ref());
    self.announce(&prompt)?;
    self.read_line(&prompt)?;
    Ok(())
  }

  /// Yes/no question defaulting to yes; only a reply starting with `n` or `N` declines
  pub fn ask_yes_no(&mut self, prompt: impl AsRef<str>) -> RunbookResult<bool> {
    let prompt = format!("{} [Y/n] ", prompt.as_ref());
    self.announce_inline(&prompt)?;
    let reply = self.read_line(&prompt)?;
    Ok(!matches!(reply.chars().next(), Some('n' | 'N')))
  }

  fn read_line(&mut self, prompt: &str) -> RunbookResult<String> {
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Err(
        InputError::Closed {
          prompt: prompt.to_string(),
        }
        .into(),
      );
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
  }
}
