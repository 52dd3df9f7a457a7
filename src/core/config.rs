use crate::core::error::{ConfigError, RunbookResult, ResultExt};
use crate::sweep::invocations::duplicate_names;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for release-runbook
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field has a default, so an empty file (or no file at all) describes the
/// confluent-kafka-go layout the runbook was written for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunbookConfig {
  /// Remote that release branches and tags are pulled from and pushed to
  pub remote: String,

  /// Branch releases are cut from
  pub release_branch: String,

  /// Working branch template; `{version}` is replaced with the new version
  pub pre_release_branch: String,

  /// Project page, used to link the release-notes form
  pub repository_url: String,

  /// Packages cleaned and built by the `clean_build` step, in order
  pub build_dirs: Vec<String>,

  /// Files touched when bumping the vendored librdkafka version
  pub vendor: VendorPaths,

  /// Directory holding one sub-directory per example program
  pub examples_dir: String,

  /// Wall-clock limit for each example run
  pub example_timeout_secs: u64,

  /// Used when the operator leaves the bootstrap servers prompt empty
  pub default_bootstrap_servers: String,

  /// Example invocations; empty means the built-in table
  pub examples: Vec<ExampleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorPaths {
  pub header: PathBuf,
  pub version_file: PathBuf,
  pub readme: PathBuf,
  pub doc_gen_script: PathBuf,
}

/// One `[[examples]]` entry: how to invoke a single example program
///
/// `args` may reference `{servers}` and `{schema_registry}`, filled in from the operator's
/// answers when the sweep starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleEntry {
  pub name: String,
  #[serde(default)]
  pub args: String,
}

/// Branch names for one release, derived once the new version is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branches {
  pub remote: String,
  pub release: String,
  pub pre_release: String,
}

impl Default for RunbookConfig {
  fn default() -> Self {
    Self {
      remote: "real-origin".to_string(),
      release_branch: "master".to_string(),
      pre_release_branch: "dev_pre-release_v{version}".to_string(),
      repository_url: "https://github.com/confluentinc/confluent-kafka-go".to_string(),
      build_dirs: ["kafka", "schemaregistry", "soaktest", "kafkatest"]
        .into_iter()
        .map(String::from)
        .collect(),
      vendor: VendorPaths::default(),
      examples_dir: "examples".to_string(),
      example_timeout_secs: 5,
      default_bootstrap_servers: "localhost:9092".to_string(),
      examples: Vec::new(),
    }
  }
}

impl Default for VendorPaths {
  fn default() -> Self {
    Self {
      header: PathBuf::from("kafka/librdkafka_vendor/rdkafka.h"),
      version_file: PathBuf::from("kafka/00version.go"),
      readme: PathBuf::from("README.md"),
      doc_gen_script: PathBuf::from("mk/doc-gen.py"),
    }
  }
}

impl RunbookConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from an explicit file, the repository search path, or fall back to defaults
  pub fn load(repo_root: &Path, explicit: Option<&Path>) -> RunbookResult<Self> {
    let config_path = match explicit {
      Some(path) if path.exists() => path.to_path_buf(),
      Some(path) => return Err(ConfigError::NotFound { path: path.to_path_buf() }.into()),
      None => match Self::find_config_path(repo_root) {
        Some(path) => path,
        None => {
          tracing::debug!("no release.toml under {}, using defaults", repo_root.display());
          return Ok(Self::default());
        }
      },
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    tracing::debug!("loaded configuration from {}", config_path.display());
    Ok(config)
  }

  /// Parse and validate a TOML document
  pub fn parse(content: &str) -> RunbookResult<Self> {
    let config: RunbookConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Reject example tables that name the same program twice
  pub fn validate(&self) -> RunbookResult<()> {
    let duplicates = duplicate_names(self.examples.iter().map(|e| e.name.as_str()));
    if !duplicates.is_empty() {
      return Err(ConfigError::DuplicateExamples { names: duplicates }.into());
    }
    Ok(())
  }

  /// Branch names for a release of `new_version`
  pub fn branches(&self, new_version: &str) -> Branches {
    Branches {
      remote: self.remote.clone(),
      release: self.release_branch.clone(),
      pre_release: self.pre_release_branch.replace("{version}", new_version),
    }
  }

  pub fn example_timeout(&self) -> Duration {
    Duration::from_secs(self.example_timeout_secs)
  }
}
