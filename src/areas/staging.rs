//! Staging area (index)
//!
//! The only mutable pre-commit state: a set of names staged for the next
//! snapshot and a set of names marked for removal. Staged content is held as
//! a side copy under `.jot/staging/<name>` until commit time, when it is
//! promoted into the blob store and the copies are discarded.

use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StagingArea {
    /// Path of the staging directory; not persisted, re-attached after load
    #[serde(skip)]
    path: PathBuf,
    /// Names whose next-commit content has been captured
    staged: BTreeSet<String>,
    /// Names to be untracked and deleted by the next commit
    removed: BTreeSet<String>,
}

impl StagingArea {
    pub fn new(path: PathBuf) -> Self {
        StagingArea {
            path,
            staged: BTreeSet::new(),
            removed: BTreeSet::new(),
        }
    }

    /// Re-attach the staging directory path after deserialization
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    /// Capture `content` as the pending content for `name`
    ///
    /// Staging a name clears any pending removal marker for it.
    pub fn stage(&mut self, name: &str, content: &Bytes) -> anyhow::Result<()> {
        self.removed.remove(name);

        let copy_path = self.path.join(name);
        std::fs::write(&copy_path, content).context(format!(
            "Unable to write staging copy {}",
            copy_path.display()
        ))?;

        self.staged.insert(name.to_string());
        Ok(())
    }

    /// Remove `name` from the staged set and discard its pending copy
    pub fn discard(&mut self, name: &str) -> anyhow::Result<()> {
        if self.staged.remove(name) {
            let copy_path = self.path.join(name);
            if copy_path.exists() {
                std::fs::remove_file(&copy_path).context(format!(
                    "Unable to discard staging copy {}",
                    copy_path.display()
                ))?;
            }
        }

        Ok(())
    }

    /// Schedule `name` for untracking and deletion on the next commit
    pub fn mark_removed(&mut self, name: &str) {
        self.removed.insert(name.to_string());
    }

    /// Read the pending content captured for a staged name
    pub fn staged_content(&self, name: &str) -> anyhow::Result<Bytes> {
        let copy_path = self.path.join(name);

        let content = std::fs::read(&copy_path).context(format!(
            "Unable to read staging copy {}",
            copy_path.display()
        ))?;

        Ok(content.into())
    }

    pub fn is_staged(&self, name: &str) -> bool {
        self.staged.contains(name)
    }

    pub fn is_marked_removed(&self, name: &str) -> bool {
        self.removed.contains(name)
    }

    /// True when nothing is staged and nothing is marked for removal;
    /// gates `commit`
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }

    pub fn staged_files(&self) -> impl Iterator<Item = &String> {
        self.staged.iter()
    }

    pub fn removed_files(&self) -> impl Iterator<Item = &String> {
        self.removed.iter()
    }

    /// Drop both sets and delete every pending copy
    pub fn clear(&mut self) -> anyhow::Result<()> {
        for name in std::mem::take(&mut self.staged) {
            let copy_path = self.path.join(&name);
            if copy_path.exists() {
                std::fs::remove_file(&copy_path).context(format!(
                    "Unable to discard staging copy {}",
                    copy_path.display()
                ))?;
            }
        }
        self.removed.clear();

        Ok(())
    }
}
