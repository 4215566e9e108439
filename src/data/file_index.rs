// ============================================================
// Layer 4 — File Index
// ============================================================
// Scans a directory once for structure files and remembers
// their paths. The position of a path in this list IS the
// dataset index of that molecule.
//
//   data_dir/
//     ├── a.sdf        → index 0
//     ├── b.SDF        → index 1
//     ├── notes.txt    (ignored: wrong extension)
//     └── nested/      (ignored: not recursive)
//
// Paths are sorted so that an unchanged directory always
// produces the same index, whatever order the OS lists it in.
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::DatasetError;

/// Ordered list of discovered structure files.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    files: Vec<PathBuf>,
}

impl FileIndex {
    /// Scan `dir` (non-recursively) for files with `extension`.
    ///
    /// A missing directory gives an empty index, not an error.
    /// A path that exists but is not a directory is a config error.
    pub fn scan(dir: &Path, extension: &str) -> Result<Self, DatasetError> {
        if !dir.exists() {
            tracing::warn!(
                "Data directory '{}' does not exist, dataset will be empty",
                dir.display()
            );
            return Ok(Self::default());
        }
        if !dir.is_dir() {
            return Err(DatasetError::config(format!(
                "data_dir '{}' is not a directory",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
            let path = entry.map_err(|e| DatasetError::io(dir, e))?.path();

            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));

            if matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        tracing::info!(
            "Found {} .{} files in '{}'",
            files.len(),
            extension,
            dir.display()
        );
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_by_extension_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.sdf"), "").unwrap();
        fs::write(dir.path().join("a.SDF"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("sdf"), "").unwrap();

        let index = FileIndex::scan(dir.path(), "sdf").unwrap();
        let names: Vec<_> = (0..index.len())
            .map(|i| index.get(i).unwrap().file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.SDF", "b.sdf"]);
    }

    #[test]
    fn test_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.sdf"), "").unwrap();
        fs::create_dir(dir.path().join("folder.sdf")).unwrap();

        let index = FileIndex::scan(dir.path(), "sdf").unwrap();
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir   = tempfile::tempdir().unwrap();
        let index = FileIndex::scan(&dir.path().join("missing"), "sdf").unwrap();
        assert_eq!(index.len(), 0);
        assert!(index.get(0).is_none());
    }

    #[test]
    fn test_file_instead_of_directory_is_config_error() {
        let dir  = tempfile::tempdir().unwrap();
        let file = dir.path().join("mol.sdf");
        fs::write(&file, "").unwrap();

        let err = FileIndex::scan(&file, "sdf").unwrap_err();
        assert!(matches!(err, DatasetError::Config(_)));
    }
}
