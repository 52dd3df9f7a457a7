//! In-place rewrites of the vendored librdkafka version
//!
//! The Go client pins a minimum librdkafka version as a hex macro and mentions the bundled
//! version in a few human-readable places. All rewrites replace every match and leave the
//! rest of the file untouched.

use crate::core::error::{RunbookResult, ResultExt};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;

/// Minimum version to require, derived from the vendored header
///
/// The last byte of `RD_KAFKA_VERSION` is the pre-release counter; it is zeroed so release
/// candidates of the same version also satisfy the check.
pub fn min_version_from_header(header: &str) -> RunbookResult<Option<String>> {
  let pattern = Regex::new(r"#define\s+RD_KAFKA_VERSION\s+(0x[0-9A-Fa-f]{8})")?;
  Ok(pattern.captures(header).map(|caps| {
    let hex = &caps[1];
    format!("{}00", &hex[..hex.len() - 2])
  }))
}

/// Point `MIN_RD_KAFKA_VERSION` at `hex`
pub fn set_min_version(source: &str, hex: &str) -> RunbookResult<String> {
  let pattern = Regex::new(r"#define MIN_RD_KAFKA_VERSION 0x[0-9A-Fa-f]{8}")?;
  let replacement = format!("#define MIN_RD_KAFKA_VERSION {}", hex);
  Ok(pattern.replace_all(source, NoExpand(&replacement)).into_owned())
}

/// `librdkafka v1.2.3` in the Go version file's error text
pub fn set_tagged_version(source: &str, version: &str) -> RunbookResult<String> {
  replace_versioned(source, r"librdkafka v[0-9.]+", &format!("librdkafka v{}", version))
}

/// `librdkafka 1.2.3` in prose
pub fn set_readme_version(source: &str, version: &str) -> RunbookResult<String> {
  replace_versioned(source, r"librdkafka [0-9.]+", &format!("librdkafka {}", version))
}

/// `"v1.2.3` in the doc generator
pub fn set_doc_gen_version(source: &str, version: &str) -> RunbookResult<String> {
  replace_versioned(source, r#""v[0-9.]+"#, &format!("\"v{}", version))
}

fn replace_versioned(source: &str, pattern: &str, replacement: &str) -> RunbookResult<String> {
  let pattern = Regex::new(pattern)?;
  Ok(pattern.replace_all(source, NoExpand(replacement)).into_owned())
}

/// Apply `edit` to a file, writing it back only when something changed
pub fn rewrite_file<F>(path: &Path, edit: F) -> RunbookResult<bool>
where
  F: FnOnce(&str) -> RunbookResult<String>,
{
  let original = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let updated = edit(&original)?;
  if updated == original {
    return Ok(false);
  }
  fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(true)
}
