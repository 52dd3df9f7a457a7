//! Core building blocks shared by every step
//!
//! - **config**: Runbook configuration (release.toml) parsing and validation
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: Git operations issued through the shell (SystemGit)

pub mod config;
pub mod error;
pub mod vcs;
