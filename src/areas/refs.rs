//! Branch table and HEAD
//!
//! Branches are named, mutable pointers into the commit graph, stored one
//! per file under `.lit/refs/heads/`. `HEAD` is always a symbolic
//! reference to the current branch (`ref: refs/heads/<name>`); there is no
//! detached-HEAD state, so the checked-out commit id is always exactly the
//! current branch's pointer.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::LitError;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing the HEAD symref
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Branch table and HEAD manager rooted at the `.lit` directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    /// Point HEAD at a branch and make sure its ref file exists
    pub fn init(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.heads_path().as_ref())
            .context("Failed to create refs/heads directory")?;

        self.update_branch(branch_name, oid)?;
        self.set_current_branch(branch_name)
    }

    /// The branch HEAD currently points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = std::fs::read_to_string(self.head_path())
            .context("Failed to read HEAD reference")?;
        let content = content.trim();

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .ok_or_else(|| anyhow::anyhow!("HEAD is not a symbolic reference: {content}"))?;

        BranchName::try_parse(captures[1].to_string())
    }

    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.write_ref_file(
            &self.head_path(),
            &format!("ref: refs/heads/{branch_name}"),
        )
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).exists()
    }

    /// Commit id a branch points at, or None when the branch is absent
    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .context(format!("Failed to read branch ref {branch_name}"))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Look up a branch by the raw name a user typed
    ///
    /// Lookup arguments are opaque: a name that could never be created
    /// cannot exist, so it reads as absent rather than invalid.
    pub fn lookup_branch(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        match BranchName::try_parse(name.to_string()) {
            Ok(branch_name) => self.read_branch(&branch_name),
            Err(_) => Ok(None),
        }
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(LitError::BranchExists.into());
        }

        self.update_branch(branch_name, oid)
    }

    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_ref_file(&self.branch_path(branch_name), oid.as_ref())
    }

    /// Remove the pointer only; referenced commits stay in the graph
    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.branch_path(branch_name);

        if !branch_path.exists() {
            return Err(LitError::BranchMissing.into());
        }

        std::fs::remove_file(&branch_path)
            .context(format!("Failed to delete branch ref {branch_name}"))
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(heads_path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(heads_path.as_ref()).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    /// The current branch's commit id; the HEAD invariant makes this the
    /// checked-out commit
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current = self.current_branch()?;

        self.read_branch(&current)?
            .ok_or_else(|| anyhow::anyhow!("HEAD points at missing branch {current}"))
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let current = self.current_branch()?;
        self.update_branch(&current, oid)
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().context(format!(
            "Invalid ref file path {}",
            path.display()
        ))?)?;

        std::fs::write(path, content)
            .context(format!("Failed to write ref file {}", path.display()))
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path().join(branch_name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
