//! Port traits defining external boundaries.
//!
//! Each trait is a seam between the reconcilers and something outside the
//! process: the `git` binary, the platform's directory-link mechanism, and the
//! user's terminal. Implementations live in `src/adapters/`.

pub mod git;
pub mod linker;
pub mod reporter;

pub use git::GitRepo;
pub use linker::{DirLinker, LinkKind};
pub use reporter::Reporter;
