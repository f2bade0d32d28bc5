use serde::Deserialize;

use crate::WordListError;

/// One entry of a word list document. Every field is required; a record
/// missing any of them fails the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub word: String,
    pub audio: String,
    pub phonetic: String,
    pub definition: String,
    #[serde(rename = "type")]
    pub word_type: String,
    /// Earlier word list revisions shipped this field as `difficultyLevel`.
    #[serde(alias = "difficultyLevel")]
    pub category: String,
    pub example: String,
}

/// Decodes a word list document into records, in document order.
///
/// All-or-nothing: structurally invalid input, a record with a missing
/// field, or a record with an empty word text fail the whole batch and
/// produce no records.
pub fn parse(bytes: &[u8]) -> Result<Vec<Record>, WordListError> {
    let records: Vec<Record> = serde_json::from_slice(bytes)?;
    for (index, record) in records.iter().enumerate() {
        if record.word.is_empty() {
            return Err(WordListError::EmptyWord { index });
        }
    }
    Ok(records)
}
