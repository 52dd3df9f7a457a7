//! `go test -json` event stream
//!
//! `go test -json` prints one JSON object per line. Only records naming both a test and an
//! action are test events; package-level records, build output and anything that fails to
//! parse are noise and are skipped.

use serde::Deserialize;

/// What happened to a test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestAction {
  Run,
  Pass,
  Fail,
  Skip,
  /// `output`, `pause`, `cont`, `bench` and anything newer
  Other(String),
}

impl From<&str> for TestAction {
  fn from(action: &str) -> Self {
    match action {
      "run" => TestAction::Run,
      "pass" => TestAction::Pass,
      "fail" => TestAction::Fail,
      "skip" => TestAction::Skip,
      other => TestAction::Other(other.to_string()),
    }
  }
}

/// One identified test event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEvent {
  pub test: String,
  pub action: TestAction,
}

#[derive(Debug, Deserialize)]
struct Record {
  #[serde(rename = "Test")]
  test: Option<String>,
  #[serde(rename = "Action")]
  action: Option<String>,
}

impl TestEvent {
  /// Parse a single output line; `None` for anything that isn't a test event
  pub fn parse(line: &str) -> Option<Self> {
    let record: Record = serde_json::from_str(line).ok()?;
    Some(Self {
      test: record.test?,
      action: TestAction::from(record.action?.as_str()),
    })
  }
}

/// Lazily parsed events over a stream of output lines
///
/// Each line is parsed into its own record; nothing carries over from one line to the next.
pub struct TestEvents<I> {
  lines: I,
}

impl<I> Iterator for TestEvents<I>
where
  I: Iterator<Item = String>,
{
  type Item = TestEvent;

  fn next(&mut self) -> Option<TestEvent> {
    loop {
      let line = self.lines.next()?;
      if let Some(event) = TestEvent::parse(&line) {
        return Some(event);
      }
    }
  }
}

pub fn events<I>(lines: I) -> TestEvents<I::IntoIter>
where
  I: IntoIterator<Item = String>,
{
  TestEvents {
    lines: lines.into_iter(),
  }
}
