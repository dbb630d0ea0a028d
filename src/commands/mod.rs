//! Command implementations
//!
//! Every user-facing command is a method on `Repository`, composed from
//! the areas (database, index, refs, workspace) and artifacts (checkout,
//! merge, history). Each command validates its preconditions first and
//! writes repository metadata as its final step, so a failed command
//! leaves both the working directory and the repository untouched.

pub mod porcelain;
