//! Input directory enumeration.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result};

/// A file selected for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// Directory of the file relative to the input root (empty at the root).
    pub relative_dir: PathBuf,
}

impl SourceFile {
    /// File name for display, lossy for non-UTF-8 names.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name including extension.
    pub fn file_name(&self) -> Result<&str> {
        self.path
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_else(|| Error::NonUtf8Name(self.path.clone()))
    }

    /// File name without its extension.
    pub fn stem(&self) -> Result<&str> {
        self.path
            .file_stem()
            .and_then(OsStr::to_str)
            .ok_or_else(|| Error::NonUtf8Name(self.path.clone()))
    }
}

/// Collect files in `root` whose extension is exactly `extension`.
///
/// With `recursive`, files in the immediate subdirectories of `root` are
/// included too. Entries are sorted by file name so the order is stable.
pub fn collect_files(root: &Path, extension: &str, recursive: bool) -> Result<Vec<SourceFile>> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if recursive { 2 } else { 1 })
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| Error::Scan {
            dir: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(OsStr::to_str) != Some(extension) {
            continue;
        }

        let relative_dir = entry
            .path()
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        files.push(SourceFile {
            path: entry.into_path(),
            relative_dir,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn names(files: &[SourceFile]) -> Vec<String> {
        files.iter().map(SourceFile::display_name).collect()
    }

    #[test]
    fn test_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.dds", "a.dds", "c.png", "d.DDS", "e.dds.bak"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let files = collect_files(dir.path(), "dds", false).unwrap();
        assert_eq!(names(&files), ["a.dds", "b.dds"]);
        assert!(files.iter().all(|f| f.relative_dir.as_os_str().is_empty()));
    }

    #[test]
    fn test_one_level_of_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("a.dds"), b"").unwrap();
        fs::write(dir.path().join("sub/b.dds"), b"").unwrap();
        fs::write(dir.path().join("sub/deeper/c.dds"), b"").unwrap();

        assert_eq!(names(&collect_files(dir.path(), "dds", false).unwrap()), ["a.dds"]);

        let files = collect_files(dir.path(), "dds", true).unwrap();
        assert_eq!(names(&files), ["a.dds", "b.dds"]);
        assert_eq!(files[1].relative_dir, Path::new("sub"));
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_files(&dir.path().join("missing"), "dds", false);
        assert!(matches!(result, Err(Error::Scan { .. })));
    }

    #[test]
    fn test_stem() {
        let file = SourceFile {
            path: PathBuf::from("in/tex01-DDS_DXT1.png"),
            relative_dir: PathBuf::new(),
        };
        assert_eq!(file.stem().unwrap(), "tex01-DDS_DXT1");
        assert_eq!(file.file_name().unwrap(), "tex01-DDS_DXT1.png");
    }
}
