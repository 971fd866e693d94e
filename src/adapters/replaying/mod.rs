//! Replaying adapters that replay recorded interactions.

pub mod git;

pub use git::ReplayingGitRepo;
