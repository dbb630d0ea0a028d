//! Repository context
//!
//! One `Repository` value is constructed per command invocation; it wires
//! together the workspace, object database, branch table and staging
//! area. State is read from disk when a command starts and written back
//! as its last step, so there is no process-wide mutable state and the
//! metadata write lands after every object-store write.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::LitError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository marker directory
pub const LIT_DIR: &str = ".lit";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        let index = Index::new(path.join(LIT_DIR).join("index").into_boxed_path());
        let database = Database::new(path.join(LIT_DIR).join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(LIT_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn lit_path(&self) -> Box<Path> {
        self.path.join(LIT_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.lit_path().is_dir()
    }

    /// Every command except `init` must run inside a repository
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(LitError::RepositoryMissing.into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The commit id HEAD resolves to (always the current branch's tip)
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        self.refs.read_head()
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_oid = self.head_oid()?;
        self.database.load_commit(&head_oid)
    }
}
