use crate::areas::repository::Repository;
use crate::commands::porcelain::file_name_of;
use crate::errors::{JotError, JotResult};

impl Repository {
    /// Unstage a file and/or schedule it for removal by the next commit
    ///
    /// A name that is neither staged nor tracked by HEAD is reported with
    /// `NothingToRemove` and no state is mutated. When HEAD tracks the name
    /// its working-directory copy is deleted immediately.
    pub fn rm(&mut self, file: &str) -> JotResult<()> {
        let name = file_name_of(file).to_string();

        let staged = self.staging().is_staged(&name);
        let tracked = self.head_commit()?.is_tracking(&name);

        if !staged && !tracked {
            return Err(JotError::NothingToRemove);
        }

        if staged {
            self.staging_mut().discard(&name)?;
        }

        if tracked {
            self.staging_mut().mark_removed(&name);
            self.workspace().remove_file(&name)?;
        }

        Ok(())
    }
}
