use crate::areas::repository::Repository;
use crate::errors::JotResult;
use std::collections::BTreeSet;

impl Repository {
    /// Display branches, staged and removed files, unstaged modifications
    /// and untracked files, each section name-sorted
    pub fn status(&self) -> JotResult<()> {
        let mut output = String::new();

        output.push_str("=== Branches ===\n");
        for name in self.branches().keys() {
            if name == self.current_branch() {
                output.push_str(&format!("*{name}\n"));
            } else {
                output.push_str(&format!("{name}\n"));
            }
        }

        output.push_str("\n=== Staged Files ===\n");
        for name in self.staging().staged_files() {
            output.push_str(&format!("{name}\n"));
        }

        output.push_str("\n=== Removed Files ===\n");
        for name in self.staging().removed_files() {
            output.push_str(&format!("{name}\n"));
        }

        let (modified, untracked) = self.inspect_workspace()?;

        output.push_str("\n=== Modifications Not Staged For Commit ===\n");
        output.push_str(&modified);

        output.push_str("\n=== Untracked Files ===\n");
        output.push_str(&untracked);

        println!("{output}");
        Ok(())
    }

    /// Compare the working directory against HEAD and the staging area
    ///
    /// # Returns
    ///
    /// Rendered `(modifications, untracked)` section bodies
    fn inspect_workspace(&self) -> JotResult<(String, String)> {
        let workspace = self.workspace();
        let store = self.blob_store();
        let head = self.head_commit()?;

        let present = workspace.list_files()?.into_iter().collect::<BTreeSet<_>>();
        let mut universe = present.clone();
        universe.extend(self.staging().staged_files().cloned());
        universe.extend(head.tracked_files().iter().cloned());

        let mut modified = String::new();
        let mut untracked = String::new();

        for name in &universe {
            let staged = self.staging().is_staged(name);

            if present.contains(name) {
                let content = workspace.read_file(name)?;

                let differs_from_head = match head.digest_for(name) {
                    Some(digest) => store.get(digest)? != content,
                    None => false,
                };
                let differs_from_staged =
                    staged && self.staging().staged_content(name)? != content;

                if (head.digest_for(name).is_some() && !staged && differs_from_head)
                    || differs_from_staged
                {
                    modified.push_str(&format!("{name} (modified)\n"));
                } else if head.digest_for(name).is_none() && !staged {
                    untracked.push_str(&format!("{name}\n"));
                }
            } else if staged
                || (!self.staging().is_marked_removed(name) && head.is_tracking(name))
            {
                modified.push_str(&format!("{name} (deleted)\n"));
            }
        }

        Ok((modified, untracked))
    }
}
