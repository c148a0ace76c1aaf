use crate::core::Storage;
use crate::utils::error::{ExpandError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExpandError::InputNotFound {
                    path: full_path.display().to_string(),
                }
            } else {
                ExpandError::IoError(e)
            }
        })
    }

    // Does not create parent directories: writing into a missing output
    // directory is an error, and a failed run must not leave one behind.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        fs::write(&full_path, data).map_err(|e| ExpandError::OutputWriteError {
            path: full_path.display().to_string(),
            source: e,
        })
    }
}
