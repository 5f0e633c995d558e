use crate::areas::blob_store::BlobStore;
use crate::areas::repository::{BLOBS_DIR, Repository, STAGING_DIR};
use crate::areas::workspace::JOT_DIR;
use crate::artifacts::commit::Commit;
use crate::errors::{JotError, JotResult};
use anyhow::Context;
use std::path::PathBuf;

impl Repository {
    /// Initialize a new repository at `path`
    ///
    /// Creates the `.jot` metadata layout, the deterministic initial commit
    /// and the `master` branch pointing at it, then persists the fresh
    /// state. Refuses to re-initialize an existing repository.
    pub fn init(path: PathBuf) -> JotResult<Self> {
        let jot_path = path.join(JOT_DIR);
        if jot_path.exists() {
            return Err(JotError::AlreadyInitialized);
        }

        std::fs::create_dir_all(jot_path.join(BLOBS_DIR))
            .context("Unable to create the blob directory")?;
        std::fs::create_dir_all(jot_path.join(STAGING_DIR))
            .context("Unable to create the staging directory")?;

        let store = BlobStore::new(jot_path.join(BLOBS_DIR));
        let initial = Commit::initial(&store)?;

        let repository = Repository::assemble(path, initial);
        repository.persist()?;

        Ok(repository)
    }
}
