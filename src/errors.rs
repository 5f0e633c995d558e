//! Error taxonomy for repository operations
//!
//! Every user-visible failure maps to exactly one variant, and every variant
//! renders exactly one stable message. Scripts wrapping the tool match on
//! these strings, so the text must not vary beyond the documented
//! substitutions (offending file/branch names and digests).

use thiserror::Error;

pub type JotResult<T> = Result<T, JotError>;

/// Failure kinds reported by the repository engine.
///
/// Domain errors abort the current operation before any mutation and are
/// printed verbatim; `Internal` wraps unexpected I/O or serialization
/// failures that indicate a broken repository rather than a misused command.
#[derive(Debug, Error)]
pub enum JotError {
    #[error("File does not exist.")]
    FileNotFound,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NoChanges,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("No such branch exists.")]
    NoSuchBranch,

    /// Unknown branch named by `merge` or `rm-branch`; deliberately worded
    /// differently than the `checkout` form above.
    #[error("A branch with that name does not exist.")]
    UnknownBranch,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("Found no commit with that message.")]
    NoMatchingCommit,

    #[error("Not in an initialized jot directory.")]
    NotInitialized,

    #[error("A jot version-control system already exists in the current directory.")]
    AlreadyInitialized,

    /// A blob digest referenced by a commit is missing from the store.
    /// Unreachable through the command surface unless the store was
    /// tampered with.
    #[error("Blob {0} not found.")]
    BlobNotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
