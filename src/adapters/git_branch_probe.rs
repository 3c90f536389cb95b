use std::path::PathBuf;

use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::ports::BranchProbe;

/// Reads the checked-out branch of the repository containing `root`.
#[derive(Debug, Clone)]
pub struct GitBranchProbe {
    root: PathBuf,
}

impl GitBranchProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BranchProbe for GitBranchProbe {
    fn current_branch(&self) -> Option<String> {
        let repo = match Repository::discover(&self.root) {
            Ok(repo) => repo,
            Err(err) => {
                debug!(root = %self.root.display(), error = %err, "no git repository");
                return None;
            }
        };

        match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(ToOwned::to_owned),
            Ok(_) => None,
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head_ref = repo.find_reference("HEAD").ok()?;
                let target = head_ref.symbolic_target()?;
                Some(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
            }
            Err(err) => {
                debug!(error = %err, "unable to read HEAD");
                None
            }
        }
    }
}
