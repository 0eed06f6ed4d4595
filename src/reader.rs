use std::fs;
use std::path::Path;

use crate::error::{CodebuddyError, Result};

/// Source of file text for review.
pub trait FileReader {
    /// Read the whole file as text.
    ///
    /// # Errors
    /// Returns `NotFound`/`PermissionDenied` for filesystem failures and
    /// `Decode` when the bytes are not valid UTF-8.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Reads files as strict UTF-8. No size limit is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8FileReader;

impl FileReader for Utf8FileReader {
    fn read(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| CodebuddyError::from_io(path, e))?;
        String::from_utf8(bytes).map_err(|_| CodebuddyError::Decode {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
