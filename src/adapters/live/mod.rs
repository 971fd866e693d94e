//! Live adapters for real external interactions.

pub mod git;
pub mod linker;
pub mod reporter;
