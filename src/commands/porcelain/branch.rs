use crate::areas::repository::Repository;
use crate::errors::{JotError, JotResult};

impl Repository {
    /// Create a new branch pointing at the current HEAD commit
    ///
    /// The new branch shares its whole history with the active branch until
    /// a commit lands on either of them.
    pub fn branch(&mut self, name: &str) -> JotResult<()> {
        if self.branches().contains_key(name) {
            return Err(JotError::BranchAlreadyExists);
        }

        let tip = self.head_id().clone();
        self.create_branch(name.to_string(), tip);

        Ok(())
    }

    /// Delete a branch pointer
    ///
    /// Never deletes commits: they stay reachable through the global commit
    /// index and possibly other branches.
    pub fn rm_branch(&mut self, name: &str) -> JotResult<()> {
        if !self.branches().contains_key(name) {
            return Err(JotError::UnknownBranch);
        }
        if name == self.current_branch() {
            return Err(JotError::CannotRemoveCurrentBranch);
        }

        self.delete_branch(name);

        Ok(())
    }
}
