//! File-writer collaborator
//!
//! The generator never touches the filesystem directly. It hands each
//! rendered unit to a [`FileWriter`], which either persists it or reports
//! why it could not.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

/// Destination for rendered output units
pub trait FileWriter {
    /// Persist `content` under `relative_name`
    fn write(&mut self, relative_name: &str, content: &str) -> io::Result<()>;
}

/// Writes units as files inside a single output directory
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    root: PathBuf,
}

impl DirectoryWriter {
    /// Create a writer rooted at `root`, creating the directory if missing
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Create a writer rooted at `root` after removing anything left there
    /// by a previous run
    pub fn purge(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if root.exists() {
            debug!(path = %root.display(), "Purging previous output directory");
            fs::remove_dir_all(&root)?;
        }
        Self::new(root)
    }

    /// The output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative_name: &str) -> io::Result<PathBuf> {
        let relative = Path::new(relative_name);
        let mut components = relative.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(relative)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a plain file name", relative_name),
            )),
        }
    }
}

impl FileWriter for DirectoryWriter {
    fn write(&mut self, relative_name: &str, content: &str) -> io::Result<()> {
        let path = self.resolve(relative_name)?;
        trace!(path = %path.display(), bytes = content.len(), "Writing unit");
        fs::write(path, content)
    }
}

/// Keeps units in memory, in write order
///
/// Writing the same name twice keeps both entries, mirroring how a later
/// file would overwrite an earlier one on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: Vec<(String, String)>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All written units as `(name, content)` pairs
    pub fn files(&self) -> &[(String, String)] {
        &self.files
    }

    /// Content most recently written under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, content)| content.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileWriter for MemoryWriter {
    fn write(&mut self, relative_name: &str, content: &str) -> io::Result<()> {
        self.files
            .push((relative_name.to_string(), content.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_writer_writes_file() {
        let dir = tempdir().unwrap();
        let mut writer = DirectoryWriter::new(dir.path().join("out")).unwrap();
        writer.write("Person.java", "class Person {}").unwrap();

        let written = fs::read_to_string(dir.path().join("out/Person.java")).unwrap();
        assert_eq!(written, "class Person {}");
    }

    #[test]
    fn test_directory_writer_rejects_nested_names() {
        let dir = tempdir().unwrap();
        let mut writer = DirectoryWriter::new(dir.path()).unwrap();

        for name in ["../escape.java", "a/b.java", "", "/abs.java"] {
            let err = writer.write(name, "x").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "name: {name:?}");
        }
    }

    #[test]
    fn test_purge_removes_previous_output() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("generated");
        let mut writer = DirectoryWriter::new(&root).unwrap();
        writer.write("Old.java", "old").unwrap();

        let writer = DirectoryWriter::purge(&root).unwrap();
        assert!(writer.root().exists());
        assert!(!root.join("Old.java").exists());
    }

    #[test]
    fn test_memory_writer_keeps_order() {
        let mut writer = MemoryWriter::new();
        writer.write("A.java", "a").unwrap();
        writer.write("B.java", "b").unwrap();
        writer.write("A.java", "a2").unwrap();

        assert_eq!(writer.len(), 3);
        assert_eq!(writer.files()[1].0, "B.java");
        assert_eq!(writer.get("A.java"), Some("a2"));
        assert_eq!(writer.get("C.java"), None);
    }
}
