use std::fs;
use std::path::Path;

use crate::WordListError;

/// Reads the raw bytes of a bundled word list document. A missing or
/// unreadable file is a [`WordListError::Load`].
pub fn load_document(path: impl AsRef<Path>) -> Result<Vec<u8>, WordListError> {
    Ok(fs::read(path)?)
}
