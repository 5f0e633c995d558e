//! Repository state and persistence
//!
//! Owns the commit arena (id → commit), the branch map (name → tip id), the
//! active branch, HEAD and the staging area. The whole record round-trips
//! through `.jot/state.json` once per invocation: load, mutate, persist.
//!
//! An exclusive lock is held on the state file while reading and writing so
//! that two racing invocations cannot silently discard each other's effects.

use crate::areas::blob_store::BlobStore;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::{JOT_DIR, Workspace};
use crate::artifacts::commit::Commit;
use crate::artifacts::digest::{DIGEST_LENGTH, Digest};
use crate::errors::{JotError, JotResult};
use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Name of the persisted state record inside `.jot`
pub const STATE_FILE: &str = "state.json";

/// Name of the blob directory inside `.jot`
pub const BLOBS_DIR: &str = "blobs";

/// Name of the staging directory inside `.jot`
pub const STAGING_DIR: &str = "staging";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// The repository engine's state
///
/// Commits are arena-allocated and referenced by id everywhere (parents,
/// branch tips, HEAD), which keeps the object graph acyclic and matches the
/// content-addressed nature of commits.
#[derive(Debug, Serialize, Deserialize)]
pub struct Repository {
    /// Workspace root; not persisted, re-attached after load
    #[serde(skip)]
    path: PathBuf,
    current_branch: String,
    head: Digest,
    branches: BTreeMap<String, Digest>,
    commits: BTreeMap<Digest, Commit>,
    staging: StagingArea,
}

impl Repository {
    /// Assemble a fresh repository state around an initial commit
    pub(crate) fn assemble(path: PathBuf, initial: Commit) -> Self {
        let staging = StagingArea::new(path.join(JOT_DIR).join(STAGING_DIR));
        let head = initial.id().clone();

        let mut branches = BTreeMap::new();
        branches.insert(DEFAULT_BRANCH.to_string(), head.clone());

        let mut commits = BTreeMap::new();
        commits.insert(head.clone(), initial);

        Repository {
            path,
            current_branch: DEFAULT_BRANCH.to_string(),
            head,
            branches,
            commits,
            staging,
        }
    }

    /// Load the persisted state from `.jot/state.json`
    ///
    /// Fails with `NotInitialized` when no repository exists at `path`.
    /// Takes a shared lock on the state file while reading.
    pub fn load(path: PathBuf) -> JotResult<Self> {
        let state_path = path.join(JOT_DIR).join(STATE_FILE);
        if !state_path.exists() {
            return Err(JotError::NotInitialized);
        }

        let mut state_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&state_path)
            .context(format!(
                "Unable to open state file {}",
                state_path.display()
            ))?;
        let mut lock = file_guard::lock(&mut state_file, file_guard::Lock::Shared, 0, 1)
            .context("Unable to lock state file for reading")?;

        let mut content = String::new();
        lock.read_to_string(&mut content)
            .context("Unable to read state file")?;

        let mut repository: Repository =
            serde_json::from_str(&content).context("Unable to parse state file")?;
        repository.staging.set_path(path.join(JOT_DIR).join(STAGING_DIR));
        repository.path = path;

        Ok(repository)
    }

    /// Write the whole state record back to `.jot/state.json`
    ///
    /// The exclusive lock is acquired before the file is truncated, so a
    /// reader holding the shared lock never observes a partially written
    /// record.
    pub fn persist(&self) -> JotResult<()> {
        let state_path = self.jot_path().join(STATE_FILE);

        let mut state_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .open(&state_path)
            .context(format!(
                "Unable to open state file {}",
                state_path.display()
            ))?;
        let mut lock = file_guard::lock(&mut state_file, file_guard::Lock::Exclusive, 0, 1)
            .context("Unable to lock state file for writing")?;
        lock.set_len(0).context("Unable to truncate state file")?;

        let content =
            serde_json::to_string_pretty(self).context("Unable to serialize repository state")?;
        lock.write_all(content.as_bytes())
            .context("Unable to write state file")?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn jot_path(&self) -> PathBuf {
        self.path.join(JOT_DIR)
    }

    pub fn blob_store(&self) -> BlobStore {
        BlobStore::new(self.jot_path().join(BLOBS_DIR))
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.path.clone())
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut StagingArea {
        &mut self.staging
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn branches(&self) -> &BTreeMap<String, Digest> {
        &self.branches
    }

    pub fn branch_tip(&self, name: &str) -> Option<&Digest> {
        self.branches.get(name)
    }

    pub fn head_id(&self) -> &Digest {
        &self.head
    }

    /// The commit currently checked out on the active branch
    pub fn head_commit(&self) -> JotResult<&Commit> {
        self.commit_by_id(&self.head)
    }

    /// Look up a commit in the global commit index
    pub fn commit_by_id(&self, id: &Digest) -> JotResult<&Commit> {
        self.commits
            .get(id)
            .ok_or_else(|| anyhow!("Commit {id} missing from the commit index").into())
    }

    pub fn all_commits(&self) -> impl Iterator<Item = &Commit> {
        self.commits.values()
    }

    /// Resolve a commit id by exact or unambiguous prefix match
    ///
    /// A full-length operand must parse as a valid digest; anything shorter
    /// matches by string prefix. Fails with `NoSuchCommit` when no commit
    /// matches or when the prefix is ambiguous.
    pub fn resolve_commit(&self, prefix: &str) -> JotResult<&Commit> {
        if prefix.len() == DIGEST_LENGTH {
            let id =
                Digest::try_parse(prefix.to_string()).map_err(|_| JotError::NoSuchCommit)?;
            return self.commits.get(&id).ok_or(JotError::NoSuchCommit);
        }

        let mut matches = self
            .commits
            .keys()
            .filter(|id| id.as_ref().starts_with(prefix));

        match (matches.next(), matches.next()) {
            (Some(id), None) => self.commit_by_id(id),
            _ => Err(JotError::NoSuchCommit),
        }
    }

    /// Record a finished commit: global index, active branch tip, HEAD
    pub(crate) fn append_commit(&mut self, commit: Commit) {
        let id = commit.id().clone();

        self.commits.insert(id.clone(), commit);
        self.branches.insert(self.current_branch.clone(), id.clone());
        self.head = id;
    }

    /// Point HEAD and the active branch name at an existing commit
    pub(crate) fn move_head(&mut self, branch: String, id: Digest) {
        self.current_branch = branch;
        self.head = id;
    }

    pub(crate) fn create_branch(&mut self, name: String, tip: Digest) {
        self.branches.insert(name, tip);
    }

    pub(crate) fn delete_branch(&mut self, name: &str) {
        self.branches.remove(name);
    }

    /// Walk first-parent ancestry from a commit back to the root
    pub fn first_parent_history(&self, from: &Digest) -> JotResult<Vec<&Commit>> {
        let mut history = Vec::new();
        let mut cursor = Some(from.clone());

        while let Some(id) = cursor {
            let commit = self.commit_by_id(&id)?;
            cursor = commit.first_parent().cloned();
            history.push(commit);
        }

        Ok(history)
    }

    /// Whether `target` is reachable from `tip` through any parent chain
    pub fn history_contains(&self, tip: &Digest, target: &Digest) -> JotResult<bool> {
        let mut queue = VecDeque::from([tip.clone()]);
        let mut visited = std::collections::BTreeSet::new();

        while let Some(id) = queue.pop_front() {
            if &id == target {
                return Ok(true);
            }
            if !visited.insert(id.clone()) {
                continue;
            }
            queue.extend(self.commit_by_id(&id)?.parents().iter().cloned());
        }

        Ok(false)
    }
}
