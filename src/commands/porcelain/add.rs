use crate::areas::repository::Repository;
use crate::commands::porcelain::file_name_of;
use crate::errors::{JotError, JotResult};

impl Repository {
    /// Stage a file for the next commit
    ///
    /// Captures the file's current content as a staging copy and clears any
    /// pending removal marker for the name. Staging content that is
    /// byte-identical to what HEAD already records is a no-op: the staging
    /// entry is removed again so unmodified files never reach a commit.
    pub fn add(&mut self, file: &str) -> JotResult<()> {
        let name = file_name_of(file).to_string();
        let workspace = self.workspace();

        if !workspace.file_exists(file) {
            return Err(JotError::FileNotFound);
        }
        let content = workspace.read_file(file)?;

        let recorded = match self.head_commit()?.digest_for(&name) {
            Some(digest) => Some(self.blob_store().get(digest)?),
            None => None,
        };

        self.staging_mut().stage(&name, &content)?;

        if recorded == Some(content) {
            self.staging_mut().discard(&name)?;
        }

        Ok(())
    }
}
