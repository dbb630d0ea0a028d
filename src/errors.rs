//! Domain error taxonomy
//!
//! Every user-facing failure of a command maps to one variant here; the
//! `Display` text is the exact message printed to the user. These are
//! reported outcomes, not crashes: `main` prints the message and exits
//! cleanly. Only I/O faults (plain `anyhow` errors without a `LitError`
//! in their chain) terminate with a non-zero status.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LitError {
    #[error("A lit version-control system already exists in the current directory.")]
    RepositoryExists,

    #[error("Not in an initialized lit directory.")]
    RepositoryMissing,

    #[error("File does not exist.")]
    FileMissing,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No commit with that id exists.")]
    CommitMissing,

    // Several commits sharing an abbreviated id must fail loudly, never
    // resolve to an arbitrary match.
    #[error("Ambiguous commit id prefix: {0}.")]
    AmbiguousId(String),

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchMissing,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Invalid branch name: {0}.")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("No changes added to the commit.")]
    NothingStaged,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedInTheWay,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("Incorrect operands.")]
    IncorrectOperands,
}
