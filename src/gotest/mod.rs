//! Go test aggregation with a single flakiness re-run
//!
//! A package's tests run once under `go test -json`. Failures are collected in the order they
//! are reported, then every failing test is re-run on its own, one process at a time. Tests
//! that pass on the second attempt are reported as flaky; anything that fails twice is handed
//! to the operator to fix by hand. There is never a third attempt.

pub mod events;

pub use events::{TestAction, TestEvent, events};

use crate::core::error::RunbookResult;
use crate::shell::CommandSpec;
use crate::steps::StepContext;
use crate::ui::Console;

/// Environment variable carrying the operator's bootstrap servers into the test process
pub const BOOTSTRAP_SERVERS_ENV: &str = "BOOTSTRAP_SERVERS";

/// How a suite ended up after the optional re-run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
  /// Nothing failed
  Clean,
  /// These failed once and passed when re-run
  Flaky(Vec<String>),
  /// These failed on the re-run as well
  Persistent(Vec<String>),
}

/// Run the tests of one package directory and walk the operator through the result
pub fn run_suite(ctx: &mut StepContext<'_>, dir: &str, servers: Option<&str>) -> RunbookResult<TestOutcome> {
  ctx.console.announce(format!("Running tests in {}", dir))?;
  let lines = ctx.shell.stream(&test_command(dir, servers, None))?;
  let failed = collect_failures(ctx.console, events(lines))?;

  if failed.is_empty() {
    ctx
      .console
      .confirm_manual_step("All tests ran successfully. Press return to continue")?;
    return Ok(TestOutcome::Clean);
  }

  ctx
    .console
    .announce(format!("Following tests failed: {}", failed.join(", ")))?;
  ctx.console.announce("Re-running failed tests to see if any was flaky")?;

  let mut failed_twice = Vec::new();
  for test in &failed {
    let lines = ctx.shell.stream(&test_command(dir, servers, Some(test)))?;
    failed_twice.extend(collect_failures(ctx.console, events(lines))?);
  }

  if failed_twice.is_empty() {
    ctx.console.confirm_manual_step(format!(
      "These tests were flaky and passed when re-run: {}. Press return to continue",
      failed.join(", ")
    ))?;
    Ok(TestOutcome::Flaky(failed))
  } else {
    ctx.console.confirm_manual_step(format!(
      "These tests failed twice: {}. Press return after fixing them manually.",
      failed_twice.join(",")
    ))?;
    Ok(TestOutcome::Persistent(failed_twice))
  }
}

/// Echo each event and return the failing tests in the order they were reported
pub fn collect_failures<I>(console: &mut Console, events: I) -> RunbookResult<Vec<String>>
where
  I: Iterator<Item = TestEvent>,
{
  let mut failed = Vec::new();
  for event in events {
    match event.action {
      TestAction::Run => console.say(format!("Running {}", event.test))?,
      TestAction::Pass => console.say(format!("Passed: {}", event.test))?,
      TestAction::Skip => console.say(format!("Skipped: {}", event.test))?,
      TestAction::Fail => {
        console.say(format!("Failed: {}", event.test))?;
        failed.push(event.test);
      }
      TestAction::Other(_) => {}
    }
  }
  Ok(failed)
}

/// `go test -json` in `dir`, optionally narrowed to a single test
fn test_command(dir: &str, servers: Option<&str>, only: Option<&str>) -> CommandSpec {
  let mut args = vec!["test".to_string(), "-json".to_string()];
  if let Some(test) = only {
    args.push("-run".to_string());
    args.push(run_pattern(test));
  }

  let spec = CommandSpec::new("go", args).in_dir(dir);
  match servers {
    Some(servers) if !servers.is_empty() => spec.env(BOOTSTRAP_SERVERS_ENV, servers),
    _ => spec,
  }
}

/// `-run` pattern matching exactly `test`
///
/// Go matches each `/`-separated element of the pattern against the matching level of the test
/// name, so every element is escaped and anchored on its own.
fn run_pattern(test: &str) -> String {
  test
    .split('/')
    .map(|element| format!("^{}$", regex::escape(element)))
    .collect::<Vec<_>>()
    .join("/")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{Harness, scripted_console};

  const A_RUN: &str = r#"{"Action":"run","Test":"A"}"#;
  const A_PASS: &str = r#"{"Action":"pass","Test":"A"}"#;
  const B_RUN: &str = r#"{"Action":"run","Test":"B"}"#;
  const B_FAIL: &str = r#"{"Action":"fail","Test":"B"}"#;
  const B_PASS: &str = r#"{"Action":"pass","Test":"B"}"#;
  const PKG_FAIL: &str = r#"{"Action":"fail","Package":"kafka"}"#;

  fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_first_pass_collects_only_failures() {
    let (mut console, output) = scripted_console("");
    let failed = collect_failures(&mut console, events(lines(&[A_RUN, A_PASS, B_RUN, B_FAIL, PKG_FAIL]))).unwrap();

    assert_eq!(failed, vec!["B"]);
    let printed = output.contents();
    assert!(printed.contains("Running A"));
    assert!(printed.contains("Passed: A"));
    assert!(printed.contains("Failed: B"));
  }

  #[test]
  fn test_failure_order_is_preserved() {
    let (mut console, _) = scripted_console("");
    let stream = lines(&[
      r#"{"Action":"fail","Test":"TestZ"}"#,
      r#"{"Action":"fail","Test":"TestA"}"#,
      r#"{"Action":"fail","Test":"TestM"}"#,
    ]);
    assert_eq!(
      collect_failures(&mut console, events(stream)).unwrap(),
      vec!["TestZ", "TestA", "TestM"]
    );
  }

  #[test]
  fn test_clean_run_pauses_once() {
    let mut harness = Harness::new("\n");
    harness.shell.push_stream(lines(&[A_RUN, A_PASS]));

    let outcome = run_suite(&mut harness.ctx(), "schemaregistry", None).unwrap();

    assert_eq!(outcome, TestOutcome::Clean);
    assert_eq!(harness.shell.calls().len(), 1);
    assert!(harness.printed().contains("All tests ran successfully."));
  }

  #[test]
  fn test_flaky_failure_takes_acknowledgement_path() {
    let mut harness = Harness::new("\n");
    harness.shell.push_stream(lines(&[A_RUN, A_PASS, B_RUN, B_FAIL]));
    harness.shell.push_stream(lines(&[B_RUN, B_PASS]));

    let outcome = run_suite(&mut harness.ctx(), "kafka", Some("localhost:9092")).unwrap();

    assert_eq!(outcome, TestOutcome::Flaky(vec!["B".to_string()]));
    let printed = harness.printed();
    assert!(printed.contains("Following tests failed: B"));
    assert!(printed.contains("flaky and passed when re-run: B"));
    assert!(!printed.contains("failed twice"));
  }

  #[test]
  fn test_persistent_failure_takes_manual_fix_path() {
    let mut harness = Harness::new("\n");
    harness.shell.push_stream(lines(&[A_RUN, A_PASS, B_RUN, B_FAIL]));
    harness.shell.push_stream(lines(&[B_RUN, B_FAIL, PKG_FAIL]));

    let outcome = run_suite(&mut harness.ctx(), "kafka", None).unwrap();

    assert_eq!(outcome, TestOutcome::Persistent(vec!["B".to_string()]));
    let printed = harness.printed();
    assert!(printed.contains("These tests failed twice: B. Press return after fixing them manually."));
    assert!(!printed.contains("flaky"));
  }

  #[test]
  fn test_each_failure_is_rerun_individually() {
    let mut harness = Harness::new("\n");
    harness.shell.push_stream(lines(&[
      r#"{"Action":"fail","Test":"TestOne"}"#,
      r#"{"Action":"fail","Test":"TestTwo"}"#,
    ]));

    run_suite(&mut harness.ctx(), "kafka", Some("broker:9092")).unwrap();

    let calls = harness.shell.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].to_string(), "(in kafka) go test -json -run ^TestOne$");
    assert_eq!(calls[2].to_string(), "(in kafka) go test -json -run ^TestTwo$");
    assert!(
      calls
        .iter()
        .all(|c| c.envs == vec![(BOOTSTRAP_SERVERS_ENV.to_string(), "broker:9092".to_string())])
    );
  }

  #[test]
  fn test_empty_servers_are_not_exported() {
    let spec = test_command("kafka", Some(""), None);
    assert!(spec.envs.is_empty());
  }

  #[test]
  fn test_run_pattern_escapes_each_subtest_level() {
    let name = "TestSerde/decode_(nested)+[1]";
    let pattern = run_pattern(name);
    assert_eq!(pattern, r"^TestSerde$/^decode_\(nested\)\+\[1\]$");

    for (element, level) in pattern.split('/').zip(name.split('/')) {
      let re = regex::Regex::new(element).unwrap();
      assert!(re.is_match(level), "{element} should match {level}");
    }
    assert!(!regex::Regex::new("^decode_\\(nested\\)$").unwrap().is_match("decode_nested"));
  }

  #[test]
  fn test_subtest_with_metacharacters_is_rerun_by_literal_name() {
    let mut harness = Harness::new("\n");
    let fail = r#"{"Action":"fail","Test":"TestSerde/decode_(nested)"}"#;
    harness.shell.push_stream([fail]);
    harness.shell.push_stream([fail]);

    let outcome = run_suite(&mut harness.ctx(), "schemaregistry", None).unwrap();

    assert_eq!(outcome, TestOutcome::Persistent(vec!["TestSerde/decode_(nested)".to_string()]));
    let calls = harness.shell.calls();
    assert_eq!(
      calls[1].to_string(),
      r"(in schemaregistry) go test -json -run ^TestSerde$/^decode_\(nested\)$"
    );
  }
}
