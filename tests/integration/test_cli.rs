//! Command-line surface: flags, configuration and startup failures

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_version_flag() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = run_runbook(&repo.path, &["--version"], "")?;

  assert!(output.status.success());
  assert!(stdout(&output).starts_with("release-runbook "));
  Ok(())
}

#[test]
fn test_missing_explicit_config_is_rejected() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = run_runbook(&repo.path, &["--config", "nope.toml"], "1.9.0\n2.0.0\n")?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Configuration file not found"));
  // nothing was asked
  assert!(!stdout(&output).contains("The old version is"));
  Ok(())
}

#[test]
fn test_duplicate_examples_in_config_are_rejected() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file(
    "release.toml",
    r#"
[[examples]]
name = "producer_example"
args = "{servers} test4"

[[examples]]
name = "producer_example"
args = "{servers} test5"
"#,
  )?;

  let output = run_runbook(&repo.path, &[], "1.9.0\n2.0.0\n")?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("producer_example"));
  Ok(())
}

#[test]
fn test_repo_flag_selects_working_tree() -> Result<()> {
  let repo = TestRepo::new()?;
  let elsewhere = tempfile::TempDir::new()?;
  let path = repo.path.to_string_lossy().into_owned();

  let output = run_runbook(elsewhere.path(), &["-C", &path], "1.9.0\n2.0.0\n13\n\n\n")?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(repo.tags()?.contains(&"v2.0.0".to_string()));
  Ok(())
}
