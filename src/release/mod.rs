//! Release identity and version bookkeeping
//!
//! # Core Invariants
//!
//! 1. **Versions are operator-supplied strings**
//!    - Entered at startup, never validated, immutable for the run
//!    - Only the major segment is ever inspected
//!
//! 2. **One tag per release**: `v<new>`, created locally and pushed by the operator
//!
//! 3. **Vendored library version follows the release**
//!    - The minimum librdkafka version comes from the vendored header
//!    - Human-readable version strings are rewritten in place

pub mod vendor;
pub mod version;

pub use version::ReleaseVersions;
