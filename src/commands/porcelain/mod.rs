//! User-facing repository operations
//!
//! Each file extends [`crate::areas::repository::Repository`] with one
//! command of the surface: `init`, `add`, `commit`, `rm`, `log`/`global-log`/
//! `find`, `status`, `checkout`, `branch`/`rm-branch`, `reset` and `merge`.

mod add;
mod branch;
mod checkout;
mod commit;
mod init;
mod log;
mod merge;
mod reset;
mod rm;
mod status;

/// Tracked names live in a flat namespace: a path operand contributes only
/// its final component.
pub(crate) fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
