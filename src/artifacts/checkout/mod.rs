//! Checkout operations and the untracked-file guard
//!
//! Switching branches, resetting and merging all materialize a target
//! snapshot into the working directory. Untracked files are checked
//! before anything is written, so a blocked checkout leaves the working
//! directory untouched.

pub mod migration;
