use crate::areas::repository::Repository;
use crate::artifacts::commit::Commit;
use crate::artifacts::digest::Digest;
use crate::artifacts::merge::{FileResolution, SplitPointFinder, conflict_block, resolve_file};
use crate::errors::{JotError, JotResult};
use bytes::Bytes;
use std::collections::BTreeSet;

impl Repository {
    /// Merge another branch into the active branch
    ///
    /// Computes the split point of the two tips, applies the three-way rule
    /// to every file known to either tip or the split point, and records a
    /// merge commit with both tips as parents. Conflicting files are written
    /// with conflict markers and staged; a conflict is reported but never
    /// aborts the merge.
    pub fn merge(&mut self, branch: &str) -> JotResult<()> {
        if branch == self.current_branch() {
            return Err(JotError::SelfMerge);
        }
        if !self.staging().is_empty() {
            return Err(JotError::UncommittedChanges);
        }
        let other_tip = self
            .branch_tip(branch)
            .ok_or(JotError::UnknownBranch)?
            .clone();

        let split_id = {
            let finder =
                SplitPointFinder::new(|id: &Digest| Ok(self.commit_by_id(id)?.parents().to_vec()));
            finder.find(self.head_id(), &other_tip)?
        };

        let split = self.commit_by_id(&split_id)?.clone();
        let current = self.head_commit()?.clone();
        let other = self.commit_by_id(&other_tip)?.clone();

        let conflicted = self.resolve_files(&split, &current, &other)?;

        if self.staging().is_empty() {
            return Err(JotError::NoChanges);
        }

        let message = format!("Merged {} into {}.", branch, self.current_branch());
        let store = self.blob_store();
        let snapshot = Commit::merged(&current, &other, message, &store)?;
        self.finish_commit(snapshot)?;

        if conflicted {
            println!("Encountered a merge conflict.");
        }

        Ok(())
    }

    /// Apply the three-way rule file by file, staging the results
    ///
    /// # Returns
    ///
    /// Whether any conflict block was written
    fn resolve_files(
        &mut self,
        split: &Commit,
        current: &Commit,
        other: &Commit,
    ) -> JotResult<bool> {
        let store = self.blob_store();
        let workspace = self.workspace();

        let mut names = BTreeSet::new();
        names.extend(split.blob_map().keys());
        names.extend(current.blob_map().keys());
        names.extend(other.blob_map().keys());

        let mut conflicted = false;

        for name in names {
            let at_split = split.digest_for(name);
            let on_current = current.digest_for(name);
            let on_other = other.digest_for(name);

            match resolve_file(at_split, on_current, on_other) {
                FileResolution::Keep => {}
                FileResolution::TakeOther => {
                    let Some(digest) = on_other else { continue };
                    let content = store.get(digest)?;

                    workspace.write_file(name, &content)?;
                    self.staging_mut().stage(name, &content)?;
                }
                FileResolution::Delete => {
                    workspace.remove_file(name)?;
                    self.staging_mut().mark_removed(name);
                }
                FileResolution::Conflict => {
                    let current_text = Self::blob_text(&store, on_current)?;
                    let other_text = Self::blob_text(&store, on_other)?;
                    let block = conflict_block(&current_text, &other_text);

                    workspace.write_file(name, block.as_bytes())?;
                    self.staging_mut().stage(name, &Bytes::from(block))?;
                    conflicted = true;
                }
            }
        }

        Ok(conflicted)
    }

    /// Blob content as text for a conflict block; an absent side is empty
    fn blob_text(
        store: &crate::areas::blob_store::BlobStore,
        digest: Option<&Digest>,
    ) -> JotResult<String> {
        match digest {
            Some(digest) => Ok(String::from_utf8_lossy(&store.get(digest)?).into_owned()),
            None => Ok(String::new()),
        }
    }
}
