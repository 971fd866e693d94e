//! The two idempotent workspace reconcilers.
//!
//! Each one inspects current state, changes only what is missing or wrong,
//! and is a no-op on a second run. They share nothing but the workspace root.

pub mod exclude;
pub mod link;

pub use exclude::{ensure_exclude_entries, ExcludeOutcome, IgnoreRule};
pub use link::{ensure_external_link, LinkOutcome, LinkState};
