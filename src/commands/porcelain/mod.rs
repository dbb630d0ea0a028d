//! User-facing commands
//!
//! - `init`: create an empty repository with its root commit
//! - `add` / `rm`: stage additions and removals
//! - `commit`: turn the staging area into a new commit
//! - `log` / `find`: history display and lookup
//! - `status`: branches and pending changes
//! - `branch`: create or delete branch pointers
//! - `checkout`: restore files or switch branches
//! - `reset`: move the current branch to an arbitrary commit
//! - `merge`: three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
