//! Document data providers.
//!
//! The layout engine never owns document bytes. It asks a [`DataProvider`]
//! for the document size and for the few rows it is about to render:
//! - [`FileSource`] reads a file on demand, so large files are never loaded
//! - [`MemoryData`] holds bytes in memory (stdin, tests)
//! - [`InputSource`] picks one of the above from the command line

use crate::model::error::InputError;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::read_stdin;

/// Synchronous random-access byte source.
pub trait DataProvider {
    /// Document length in bytes.
    fn size(&self) -> u64;

    /// Read up to `length` bytes starting at `offset`.
    ///
    /// Returns fewer bytes when the range extends past the end; an offset at
    /// or past the end yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` when the underlying storage fails.
    fn read(&self, offset: u64, length: usize) -> Result<Vec<u8>, InputError>;
}

/// Document held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryData {
    bytes: Vec<u8>,
}

impl MemoryData {
    /// Wrap `bytes`.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The whole document.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl DataProvider for MemoryData {
    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read(&self, offset: u64, length: usize) -> Result<Vec<u8>, InputError> {
        let Ok(start) = usize::try_from(offset) else {
            return Ok(Vec::new());
        };
        if start >= self.bytes.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(length).min(self.bytes.len());
        Ok(self.bytes[start..end].to_vec())
    }
}

/// Input selected on the command line.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// File read on demand.
    File(FileSource),
    /// Piped stdin, read to the end up front.
    Stdin(MemoryData),
}

impl InputSource {
    /// Short human-readable name for the status line.
    pub fn name(&self) -> String {
        match self {
            InputSource::File(file) => file.path().display().to_string(),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }
}

impl DataProvider for InputSource {
    fn size(&self) -> u64 {
        match self {
            InputSource::File(file) => file.size(),
            InputSource::Stdin(data) => data.size(),
        }
    }

    fn read(&self, offset: u64, length: usize) -> Result<Vec<u8>, InputError> {
        match self {
            InputSource::File(file) => file.read(offset, length),
            InputSource::Stdin(data) => data.read(offset, length),
        }
    }
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided: open it as a [`FileSource`]
/// 2. Else if stdin is piped: read it into [`MemoryData`]
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::open(path)?)),
        None => Ok(InputSource::Stdin(read_stdin()?)),
    }
}
