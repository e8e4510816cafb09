//! Stdin input for piped data.
//!
//! A hex viewer needs random access, so piped input is read to EOF before
//! the viewer starts.

use super::MemoryData;
use crate::model::error::InputError;
use std::io::{IsTerminal, Read};

/// Read all of stdin into memory.
///
/// # Errors
///
/// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
/// This prevents the viewer from blocking on keyboard input when the user
/// forgot to pipe data.
pub fn read_stdin() -> Result<MemoryData, InputError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::NoInput);
    }
    read_all(stdin.lock())
}

/// Read `reader` to EOF.
fn read_all(mut reader: impl Read) -> Result<MemoryData, InputError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    tracing::debug!(size = bytes.len(), "read piped input");
    Ok(MemoryData::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DataProvider;

    #[test]
    fn reads_everything_from_reader() {
        let data = read_all(&b"\x00\x01binary\xff"[..]).unwrap();
        assert_eq!(data.size(), 9);
        assert_eq!(data.read(8, 1).unwrap(), vec![0xff]);
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        let data = read_all(std::io::empty()).unwrap();
        assert_eq!(data.size(), 0);
    }
}
