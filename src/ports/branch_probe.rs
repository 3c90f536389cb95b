/// Port for discovering the branch currently checked out.
pub trait BranchProbe {
    /// Current branch name; `None` when detached or not in a repository.
    fn current_branch(&self) -> Option<String>;
}
