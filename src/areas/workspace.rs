//! Working directory file system operations
//!
//! Tracked names live in a flat namespace at the workspace root; the
//! reserved `.jot` metadata directory is always ignored.

use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reserved metadata directory
pub const JOT_DIR: &str = ".jot";

#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    pub fn new(path: PathBuf) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);

        let content = std::fs::read(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        std::fs::write(&file_path, content)
            .context(format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a file if present; deleting an absent file is a no-op
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .context(format!("Unable to remove file {}", file_path.display()))?;
        }

        Ok(())
    }

    /// List the visible files at the workspace root, name-sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut names = WalkDir::new(&self.path)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                (!name.starts_with(JOT_DIR)).then_some(name)
            })
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }
}
