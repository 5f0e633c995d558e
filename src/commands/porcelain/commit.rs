use crate::areas::repository::Repository;
use crate::artifacts::commit::Commit;
use crate::errors::{JotError, JotResult};

impl Repository {
    /// Record the staged changes as a new commit on the active branch
    pub fn commit(&mut self, message: &str) -> JotResult<()> {
        if message.is_empty() {
            return Err(JotError::EmptyMessage);
        }
        if self.staging().is_empty() {
            return Err(JotError::NoChanges);
        }

        let store = self.blob_store();
        let snapshot = Commit::from_parent(self.head_commit()?, message, &store)?;

        self.finish_commit(snapshot)
    }

    /// Fold the staging area into a prepared commit and land it
    ///
    /// Promotes every staging copy into the blob store, applies pending
    /// removals, clears both staging sets, re-hashes the commit so its id
    /// covers the final blob mapping, and appends it to the active branch,
    /// the global commit index and HEAD. Shared by `commit` and `merge`.
    pub(crate) fn finish_commit(&mut self, mut commit: Commit) -> JotResult<()> {
        let store = self.blob_store();

        let staged = self.staging().staged_files().cloned().collect::<Vec<_>>();
        for name in staged {
            let content = self.staging().staged_content(&name)?;
            let digest = store.put(&content)?;
            commit.track_blob(name, digest);
        }

        let removed = self.staging().removed_files().cloned().collect::<Vec<_>>();
        for name in removed {
            commit.untrack(&name);
        }

        self.staging_mut().clear()?;
        commit.rehash(&store)?;
        self.append_commit(commit);

        Ok(())
    }
}
