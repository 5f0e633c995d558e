use crate::areas::repository::Repository;
use crate::errors::JotResult;

impl Repository {
    /// Move HEAD to an arbitrary commit and reconcile the working directory
    ///
    /// The commit id may be abbreviated to any unambiguous prefix. The
    /// active branch switches to the branch whose history contains the
    /// commit: the current branch when it qualifies, otherwise the first
    /// qualifying branch in name order.
    pub fn reset(&mut self, commit_id: &str) -> JotResult<()> {
        let target = self.resolve_commit(commit_id)?.clone();
        self.reconcile_workspace(&target)?;
        self.staging_mut().clear()?;

        let id = target.id().clone();
        let current = self.current_branch().to_string();

        let mut owner = None;
        if let Some(tip) = self.branch_tip(&current)
            && self.history_contains(tip, &id)?
        {
            owner = Some(current.clone());
        }
        if owner.is_none() {
            for (name, tip) in self.branches() {
                if self.history_contains(tip, &id)? {
                    owner = Some(name.clone());
                    break;
                }
            }
        }

        self.move_head(owner.unwrap_or(current), id);

        Ok(())
    }
}
