//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `database`: object database for storing blobs and commits
//! - `index`: staging area tracking pending additions and removals
//! - `refs`: branch table and HEAD management
//! - `repository`: high-level repository context and coordination
//! - `workspace`: working directory file system operations

pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
