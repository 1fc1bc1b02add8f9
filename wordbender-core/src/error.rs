use thiserror::Error;
use wordbender_scanner::ScanError;

#[derive(Error, Debug)]
pub enum DialogueError {
    #[error("episode table missing expected \"{0}\" column")]
    MissingColumn(String),

    #[error("row {row}: column \"{column}\" is not a number: {value:?}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("episode table is empty")]
    EmptyListing,

    #[error("no dialogue column for character \"{0}\"")]
    UnknownCharacter(String),

    #[error("no words left to draw for \"{0}\"")]
    EmptyDialogue(String),

    #[error("fetch failed: {0}")]
    Scan(#[from] ScanError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DialogueError>;
