use crate::domain::ports::Storage;
use crate::utils::error::{ConvertError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Filesystem storage. Relative paths are taken from `base_path`; absolute
/// paths are used as they are.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.full_path(path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConvertError::InputNotFound {
                path: full_path.display().to_string(),
            },
            _ => ConvertError::InputReadError {
                path: full_path.display().to_string(),
                source: e,
            },
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("nested/out/config.xml", b"<root />").unwrap();

        let written = fs::read(dir.path().join("nested/out/config.xml")).unwrap();
        assert_eq!(written, b"<root />");
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_file("absent.ini").unwrap_err();
        match err {
            ConvertError::InputNotFound { path } => assert!(path.ends_with("absent.ini")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_input_is_an_input_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        // a directory exists but cannot be read as a file
        let err = storage.read_file(".").unwrap_err();
        assert!(matches!(err, ConvertError::InputReadError { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.ini");
        fs::write(&file, "k=v").unwrap();

        let storage = LocalStorage::new("/definitely/not/here");
        let data = storage.read_file(file.to_str().unwrap()).unwrap();
        assert_eq!(data, b"k=v");
    }
}
