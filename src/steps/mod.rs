//! Release steps
//!
//! All steps implement the `Step` trait and are registered, in order, in
//! [`StepSequence::standard`]. The order is fixed: the operator can only choose where to start.
//!
//! ## Branches
//! - **init**: sync the release branch and cut the pre-release branch
//! - **import_bundle**: wait for the static bundle PR, then re-cut the pre-release branch
//! - **merge_pre_release**: wait for the release PR, then sync the release branch
//!
//! ## Versions
//! - **review_changelog**: show the log since the previous tag
//! - **update_librdkafka_version**: bump the vendored library version strings
//! - **major_version_check**: flag module path changes on a major bump
//!
//! ## Generated files
//! - **update_error_codes**, **generate_docs**
//!
//! ## Verification
//! - **clean_build**, **run_tests_kafka**, **run_tests_schemaregistry**, **run_examples**
//!
//! ## Publishing
//! - **tag**, **release_notes**

pub mod branch;
pub mod build;
pub mod changelog;
pub mod generate;
pub mod publish;
pub mod smoke;
pub mod suites;
pub mod versions;

use crate::core::config::{Branches, RunbookConfig};
use crate::core::error::RunbookResult;
use crate::core::vcs::SystemGit;
use crate::release::ReleaseVersions;
use crate::shell::Shell;
use crate::ui::Console;
use std::path::Path;

/// Everything a step may touch while it runs
pub struct StepContext<'a> {
  pub console: &'a mut Console,
  pub shell: &'a dyn Shell,
  pub config: &'a RunbookConfig,
  /// Branch names derived from the new version at startup
  pub branches: &'a Branches,
  /// Repository root, for steps that edit files in-process
  pub root: &'a Path,
}

impl<'a> StepContext<'a> {
  pub fn git(&self) -> SystemGit<'a> {
    SystemGit::new(self.shell)
  }
}

/// One named unit of the release
pub trait Step {
  /// Name shown in the step list
  fn name(&self) -> &'static str;

  /// Perform the step; an error aborts the whole run
  fn run(&self, ctx: &mut StepContext<'_>, versions: &ReleaseVersions) -> RunbookResult<()>;
}

/// Immutable, ordered list of steps
pub struct StepSequence {
  steps: Vec<Box<dyn Step>>,
}

impl StepSequence {
  pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
    Self { steps }
  }

  /// The release, start to finish
  pub fn standard() -> Self {
    Self::new(vec![
      Box::new(branch::Init),
      Box::new(branch::ImportBundle),
      Box::new(changelog::ReviewChangelog),
      Box::new(versions::UpdateLibrdkafkaVersion),
      Box::new(versions::MajorVersionCheck),
      Box::new(generate::UpdateErrorCodes),
      Box::new(generate::GenerateDocs),
      Box::new(build::CleanBuild),
      Box::new(suites::RunKafkaTests),
      Box::new(suites::RunSchemaRegistryTests),
      Box::new(smoke::RunExamples),
      Box::new(branch::MergePreRelease),
      Box::new(publish::Tag),
      Box::new(publish::ReleaseNotes),
    ])
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  /// Steps from the 0-based `start` to the end, with their 0-based index
  pub fn starting_at(&self, start: usize) -> impl Iterator<Item = (usize, &dyn Step)> {
    self.steps.iter().map(|s| s.as_ref()).enumerate().skip(start)
  }

  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.steps.iter().map(|s| s.name())
  }
}
