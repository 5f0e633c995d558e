//! Commit snapshot record
//!
//! A commit is an immutable record of message, timestamp, parent linkage and
//! a file-name to blob-digest mapping. Its identity is a SHA-1 digest over
//! its logical content:
//!
//! ```text
//! id = sha1(timestamp + message + parent ids + blob contents)
//! ```
//!
//! where blob contents are fed in lexicographic file-name order. Two commits
//! with identical message, timestamp, parents and blob contents collide by
//! design; this models content addressing, not wall-clock uniqueness.
//!
//! The initial commit of every repository uses a fixed epoch timestamp so
//! that independently initialized repositories agree on its id.

use crate::areas::blob_store::BlobStore;
use crate::artifacts::digest::Digest;
use crate::errors::JotResult;
use serde::{Deserialize, Serialize};
use sha1::{Digest as _, Sha1};
use std::collections::{BTreeMap, BTreeSet};

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Human-readable timestamp format, e.g. `Thu Jan 1 00:00:00 1970 +0000`
const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Immutable snapshot record
///
/// Created through [`Commit::initial`], [`Commit::from_parent`] or
/// [`Commit::merged`]; after construction the only permitted mutation is the
/// fold-in of the staging area followed by a single [`Commit::rehash`], which
/// fixes the id over the final blob mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    id: Digest,
    message: String,
    timestamp: String,
    parents: Vec<Digest>,
    /// Tracked file name to blob digest; the materialized snapshot
    blob_map: BTreeMap<String, Digest>,
    /// Names considered tracked by this commit, a superset bookkeeping of
    /// `blob_map` used to detect deletions across merge and checkout
    tracked_files: BTreeSet<String>,
}

impl Commit {
    /// Create the root commit of a repository
    ///
    /// Uses the fixed epoch timestamp rendered in UTC, no parents and an
    /// empty snapshot, so every freshly initialized repository produces the
    /// same initial commit id.
    pub fn initial(store: &BlobStore) -> JotResult<Self> {
        let timestamp = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
            .format(TIMESTAMP_FORMAT)
            .to_string();

        Self::build(
            INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp,
            Vec::new(),
            BTreeMap::new(),
            BTreeSet::new(),
            store,
        )
    }

    /// Create an ordinary commit with a single parent
    ///
    /// Inherits the parent's full blob mapping and tracked-file set as its
    /// starting point; the staging area is folded in afterwards by the
    /// repository, followed by [`Commit::rehash`].
    pub fn from_parent(
        parent: &Commit,
        message: impl Into<String>,
        store: &BlobStore,
    ) -> JotResult<Self> {
        Self::build(
            message.into(),
            Self::now(),
            vec![parent.id.clone()],
            parent.blob_map.clone(),
            parent.tracked_files.clone(),
            store,
        )
    }

    /// Create a merge commit with two parents
    ///
    /// Starts from the first parent's mapping, then overlays the second
    /// parent's mapping for any conflicting keys; tracked sets are unioned.
    pub fn merged(
        first_parent: &Commit,
        second_parent: &Commit,
        message: impl Into<String>,
        store: &BlobStore,
    ) -> JotResult<Self> {
        let mut blob_map = first_parent.blob_map.clone();
        blob_map.extend(
            second_parent
                .blob_map
                .iter()
                .map(|(name, digest)| (name.clone(), digest.clone())),
        );

        let mut tracked_files = first_parent.tracked_files.clone();
        tracked_files.extend(second_parent.tracked_files.iter().cloned());

        Self::build(
            message.into(),
            Self::now(),
            vec![first_parent.id.clone(), second_parent.id.clone()],
            blob_map,
            tracked_files,
            store,
        )
    }

    fn build(
        message: String,
        timestamp: String,
        parents: Vec<Digest>,
        blob_map: BTreeMap<String, Digest>,
        tracked_files: BTreeSet<String>,
        store: &BlobStore,
    ) -> JotResult<Self> {
        let mut commit = Commit {
            id: Digest::over(&[]),
            message,
            timestamp,
            parents,
            blob_map,
            tracked_files,
        };
        commit.rehash(store)?;

        Ok(commit)
    }

    fn now() -> String {
        chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Recompute the id over the current logical content
    ///
    /// Called once at construction and, after the staging fold-in, a second
    /// time so the id reflects the final blob mapping.
    pub fn rehash(&mut self, store: &BlobStore) -> JotResult<()> {
        let mut hasher = Sha1::new();
        hasher.update(self.timestamp.as_bytes());
        hasher.update(self.message.as_bytes());
        for parent in &self.parents {
            hasher.update(parent.as_ref().as_bytes());
        }
        // BTreeMap iteration gives the canonical lexicographic order
        for digest in self.blob_map.values() {
            hasher.update(&store.get(digest)?);
        }

        self.id = Digest::from_hasher(hasher);
        Ok(())
    }

    /// Record a staged file in the snapshot and mark it tracked
    pub fn track_blob(&mut self, name: String, digest: Digest) {
        self.tracked_files.insert(name.clone());
        self.blob_map.insert(name, digest);
    }

    /// Drop a name from both the snapshot and the tracked set
    pub fn untrack(&mut self, name: &str) {
        self.tracked_files.remove(name);
        self.blob_map.remove(name);
    }

    pub fn id(&self) -> &Digest {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn parents(&self) -> &[Digest] {
        &self.parents
    }

    pub fn first_parent(&self) -> Option<&Digest> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn blob_map(&self) -> &BTreeMap<String, Digest> {
        &self.blob_map
    }

    pub fn digest_for(&self, name: &str) -> Option<&Digest> {
        self.blob_map.get(name)
    }

    pub fn tracked_files(&self) -> &BTreeSet<String> {
        &self.tracked_files
    }

    pub fn is_tracking(&self, name: &str) -> bool {
        self.tracked_files.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use fake::rand;

    fn temp_store() -> BlobStore {
        let dir = std::env::temp_dir().join(format!("jot-commit-{}", rand::random::<u32>()));
        BlobStore::new(dir)
    }

    #[test]
    fn initial_commits_of_independent_repositories_collide() {
        let first = Commit::initial(&temp_store()).unwrap();
        let second = Commit::initial(&temp_store()).unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(first.message(), INITIAL_COMMIT_MESSAGE);
        assert!(first.parents().is_empty());
    }

    #[test]
    fn rehash_of_unchanged_commit_is_stable() {
        let store = temp_store();
        let mut commit = Commit::initial(&store).unwrap();
        let before = commit.id().clone();

        commit.rehash(&store).unwrap();

        assert_eq!(commit.id(), &before);
    }

    #[test]
    fn id_covers_folded_in_blobs() {
        let store = temp_store();
        let parent = Commit::initial(&store).unwrap();
        let mut commit = Commit::from_parent(&parent, "add a file", &store).unwrap();
        let before = commit.id().clone();

        let digest = store.put(&Bytes::from_static(b"payload")).unwrap();
        commit.track_blob("a.txt".to_string(), digest);
        commit.rehash(&store).unwrap();

        assert_ne!(commit.id(), &before);
        assert!(commit.is_tracking("a.txt"));
    }

    #[test]
    fn merge_commit_overlays_second_parent_mapping() {
        let store = temp_store();
        let root = Commit::initial(&store).unwrap();

        let mut ours = Commit::from_parent(&root, "ours", &store).unwrap();
        let ours_blob = store.put(&Bytes::from_static(b"ours")).unwrap();
        ours.track_blob("shared.txt".to_string(), ours_blob);
        ours.track_blob("only-ours.txt".to_string(), store.put(&Bytes::from_static(b"l")).unwrap());
        ours.rehash(&store).unwrap();

        let mut theirs = Commit::from_parent(&root, "theirs", &store).unwrap();
        let theirs_blob = store.put(&Bytes::from_static(b"theirs")).unwrap();
        theirs.track_blob("shared.txt".to_string(), theirs_blob.clone());
        theirs.rehash(&store).unwrap();

        let merged = Commit::merged(&ours, &theirs, "merge", &store).unwrap();

        assert_eq!(merged.digest_for("shared.txt"), Some(&theirs_blob));
        assert!(merged.is_tracking("only-ours.txt"));
        assert!(merged.is_merge());
    }
}
