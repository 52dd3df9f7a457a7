//! End-to-end interactive sessions driven through stdin

use crate::helpers::*;
use anyhow::Result;
use regex::Regex;

const STEPS: [&str; 14] = [
  "init",
  "import_bundle",
  "review_changelog",
  "update_librdkafka_version",
  "major_version_check",
  "update_error_codes",
  "generate_docs",
  "clean_build",
  "run_tests_kafka",
  "run_tests_schemaregistry",
  "run_examples",
  "merge_pre_release",
  "tag",
  "release_notes",
];

#[test]
fn test_step_listing_is_numbered_in_order() -> Result<()> {
  let repo = TestRepo::new()?;
  // input closes at the resume prompt, right after the listing
  let output = run_runbook(&repo.path, &[], "1.9.0\n2.0.0\n")?;

  let line = Regex::new(r"(?m)(\d+)\. (\w+)$")?;
  let listed: Vec<(usize, String)> = line
    .captures_iter(&stdout(&output))
    .map(|c| (c[1].parse().unwrap(), c[2].to_string()))
    .collect();

  let expected: Vec<(usize, String)> = STEPS
    .iter()
    .enumerate()
    .map(|(i, name)| (i + 1, name.to_string()))
    .collect();
  assert_eq!(listed, expected);
  assert!(stdout(&output).contains("where init is step 1."));
  Ok(())
}

#[test]
fn test_invalid_resume_point_runs_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = run_runbook(&repo.path, &[], "1.9.0\n2.0.0\nabc\n")?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!stdout(&output).contains("will be run"));
  assert!(stderr(&output).contains("Invalid resume point 'abc'"));
  Ok(())
}

#[test]
fn test_out_of_range_resume_point_runs_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  for entry in ["0", "15"] {
    let output = run_runbook(&repo.path, &[], &format!("1.9.0\n2.0.0\n{}\n", entry))?;
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("will be run"));
  }
  Ok(())
}

#[test]
fn test_closed_input_aborts() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = run_runbook(&repo.path, &[], "1.9.0\n")?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Operator input closed"));
  Ok(())
}

#[test]
fn test_resume_at_last_step_runs_only_release_notes() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = run_runbook(&repo.path, &[], "1.9.0\n2.0.0\n14\n\n")?;
  let out = stdout(&output);

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(out.contains("14. release_notes will be run."));
  assert!(!out.contains("13. tag will be run."));
  assert!(out.contains("releases/new?tag=v2.0.0"));
  assert!(out.contains("Great work, the release is now complete!"));
  assert!(repo.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_tag_step_survives_rejected_dry_run() -> Result<()> {
  // there is no remote, so the dry-run push fails; the tag must still exist
  let repo = TestRepo::new()?;
  let output = run_runbook(&repo.path, &[], "1.9.0\n2.0.0\n13\n\n\n")?;
  let out = stdout(&output);

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(out.contains("13. tag will be run."));
  assert!(out.contains("git push real-origin v2.0.0"));
  assert_eq!(repo.tags()?, vec!["v2.0.0".to_string()]);
  Ok(())
}

#[test]
fn test_configured_remote_used_for_push_hint() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file(".config/release.toml", "remote = \"upstream\"\n")?;

  let output = run_runbook(&repo.path, &[], "1.9.0\n2.0.0\n13\n\n\n")?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("git push upstream v2.0.0"));
  Ok(())
}
