//! File-backed data provider.
//!
//! Bytes are read with positioned reads on demand; only the rows being
//! rendered are ever in memory.

use super::DataProvider;
use crate::model::error::InputError;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Read-only view of a file.
///
/// The size is captured when the file is opened.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: File,
    size: u64,
}

impl FileSource {
    /// Open `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let size = file.metadata()?.len();
        tracing::debug!(path = %path.display(), size, "opened file source");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataProvider for FileSource {
    fn size(&self) -> u64 {
        self.size
    }

    fn read(&self, offset: u64, length: usize) -> Result<Vec<u8>, InputError> {
        if offset >= self.size {
            return Ok(Vec::new());
        }
        let available = (self.size - offset).min(length as u64) as usize;
        let mut buffer = vec![0u8; available];

        // `&File` implements `Read` and `Seek`.
        let mut file = &self.file;
        file.seek(SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < available {
            match file.read(&mut buffer[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        buffer.truncate(filled);
        Ok(buffer)
    }
}
