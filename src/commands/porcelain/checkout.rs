use crate::areas::repository::Repository;
use crate::artifacts::commit::Commit;
use crate::commands::porcelain::file_name_of;
use crate::errors::{JotError, JotResult};

impl Repository {
    /// Switch the working directory and HEAD to another branch
    pub fn checkout_branch(&mut self, name: &str) -> JotResult<()> {
        if name == self.current_branch() {
            return Err(JotError::AlreadyOnBranch);
        }
        let tip = self
            .branch_tip(name)
            .ok_or(JotError::NoSuchBranch)?
            .clone();

        let target = self.commit_by_id(&tip)?.clone();
        self.reconcile_workspace(&target)?;
        self.staging_mut().clear()?;
        self.move_head(name.to_string(), tip);

        Ok(())
    }

    /// Overwrite one file with the content HEAD records for it
    pub fn restore_from_head(&self, file: &str) -> JotResult<()> {
        let name = file_name_of(file);
        let digest = self
            .head_commit()?
            .digest_for(name)
            .ok_or(JotError::FileNotInCommit)?
            .clone();

        self.workspace()
            .write_file(name, &self.blob_store().get(&digest)?)?;

        Ok(())
    }

    /// Overwrite one file with the content an explicit commit records
    ///
    /// The commit id may be abbreviated to any unambiguous prefix.
    pub fn restore_from_commit(&self, commit_id: &str, file: &str) -> JotResult<()> {
        let name = file_name_of(file);
        let digest = self
            .resolve_commit(commit_id)?
            .digest_for(name)
            .ok_or(JotError::FileNotInCommit)?
            .clone();

        self.workspace()
            .write_file(name, &self.blob_store().get(&digest)?)?;

        Ok(())
    }

    /// Reconcile the working directory with a target commit's snapshot
    ///
    /// Safety rule, checked before any mutation: a working file untracked by
    /// the current HEAD may not be silently overwritten with different
    /// content. Then every file tracked by HEAD but absent from the target
    /// is deleted, and every blob of the target is written out.
    pub(crate) fn reconcile_workspace(&self, target: &Commit) -> JotResult<()> {
        let workspace = self.workspace();
        let store = self.blob_store();
        let head = self.head_commit()?;

        for (name, digest) in target.blob_map() {
            if workspace.file_exists(name)
                && !head.is_tracking(name)
                && workspace.read_file(name)? != store.get(digest)?
            {
                return Err(JotError::UntrackedFileInTheWay);
            }
        }

        for name in head.tracked_files() {
            if !target.blob_map().contains_key(name) {
                workspace.remove_file(name)?;
            }
        }

        for (name, digest) in target.blob_map() {
            workspace.write_file(name, &store.get(digest)?)?;
        }

        Ok(())
    }
}
