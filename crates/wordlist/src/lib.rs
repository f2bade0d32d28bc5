mod loader;
mod record;

pub use loader::load_document;
pub use record::{parse, Record};

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("failed to load word list document: {0}")]
    Load(#[from] std::io::Error),
    #[error("word list document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record {index} has an empty word field")]
    EmptyWord { index: usize },
}

/// Reads and parses a word list document in one go.
pub fn load(path: impl AsRef<std::path::Path>) -> Result<Vec<Record>, WordListError> {
    let bytes = load_document(path)?;
    parse(&bytes)
}
