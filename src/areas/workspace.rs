//! Working directory operations
//!
//! The working tree is flat: only plain files directly in the repository
//! root are tracked. The `.lit` directory is invisible to every listing.

use crate::artifacts::objects::blob::Blob;
use crate::errors::LitError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

const IGNORED_PATHS: [&str; 3] = [".lit", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.path.join(file_name).is_file()
    }

    /// Read a working file into a blob; [`LitError::FileMissing`] when absent
    pub fn parse_blob(&self, file_name: &str) -> anyhow::Result<Blob> {
        let data = self.read_file(file_name)?;
        Ok(Blob::new(data))
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_name);

        if !file_path.is_file() {
            return Err(LitError::FileMissing.into());
        }

        let content = std::fs::read(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .context(format!("Unable to open file {}", file_path.display()))?;

        file.write_all(content)
            .context(format!("Unable to write file {}", file_path.display()))?;

        Ok(())
    }

    /// Delete a working file; a file already absent is not an error
    pub fn remove_file(&self, file_name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .context(format!("Unable to remove file {}", file_path.display()))?;
        }

        Ok(())
    }

    /// Plain files in the working directory root, sorted by name
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = std::fs::read_dir(self.path.as_ref())
            .context(format!(
                "Unable to list working directory {}",
                self.path.display()
            ))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if IGNORED_PATHS.contains(&name.as_str()) {
                    None
                } else {
                    Some(name)
                }
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }
}
