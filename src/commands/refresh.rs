//! `compdb-refresh refresh` command, also the default.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::RefreshError;

use super::{exclude, install, link};

/// Execute every step in order: exclude entries, external link, install.
///
/// Stops at the first failing step.
///
/// # Errors
///
/// Returns the error of the first step that fails.
pub fn run(ctx: &ServiceContext, root: &Path) -> Result<(), RefreshError> {
    exclude::run(ctx, root)?;
    link::run(ctx, root)?;
    install::run(root)?;
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::adapters::live::linker::SymlinkLinker;
    use crate::adapters::memory::CapturingReporter;
    use crate::ports::GitRepo;

    struct NoRepo;

    impl GitRepo for NoRepo {
        fn common_dir(&self, _cwd: &Path) -> Option<PathBuf> {
            None
        }

        fn show_prefix(
            &self,
            _cwd: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            unreachable!("prefix is only queried inside a repository")
        }
    }

    fn ctx() -> ServiceContext {
        ServiceContext::new(
            Box::new(NoRepo),
            Box::new(SymlinkLinker),
            Box::new(CapturingReporter::new()),
        )
    }

    #[test]
    fn runs_every_step() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bazel-out")).unwrap();
        std::fs::create_dir_all(dir.path().join("bazel-bin")).unwrap();
        std::fs::write(dir.path().join(install::ARTIFACT), "[]").unwrap();

        run(&ctx(), dir.path()).unwrap();

        assert!(std::fs::read_link(dir.path().join("external")).is_ok());
        assert_eq!(std::fs::read_to_string(dir.path().join(install::DESTINATION)).unwrap(), "[]");
    }

    #[test]
    fn link_failure_stops_before_install() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bazel-bin")).unwrap();
        std::fs::write(dir.path().join(install::ARTIFACT), "[]").unwrap();

        let err = run(&ctx(), dir.path()).unwrap_err();

        assert!(matches!(err, RefreshError::MissingBuildOutput { .. }));
        assert!(!dir.path().join(install::DESTINATION).exists());
    }
}
