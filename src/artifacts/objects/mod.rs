//! Object types and operations
//!
//! All repository content is stored as objects identified by SHA-1 hashes.
//! Two kinds exist on disk:
//!
//! - **Blob**: raw file content
//! - **Commit**: a full snapshot (filename -> blob id) plus parent links,
//!   message and timestamp
//!
//! Trees are not separate on-disk objects: a commit embeds its complete
//! snapshot, so a commit's id covers its tree as well.
//!
//! All objects serialize to the format `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
