//! Error type shared by every stage of card generation.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can abort a flash card run.
#[derive(Error, Debug)]
pub enum FlashcardError {
    /// The word list file does not exist
    #[error("input file '{}' does not exist, you must inform a valid YAML or JSON file", .0.display())]
    InputNotFound(PathBuf),

    /// The word list file could not be parsed
    #[error("failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// A colour string was neither `#rrggbb`/`#rgb` nor `c,m,y,k`
    #[error("the '{0}' is not a valid color")]
    InvalidColor(String),

    /// A configuration value is out of range
    #[error("invalid configuration for '{group}': {message}")]
    Config { group: String, message: String },

    /// A custom font file could not be read or parsed
    #[error("failed to load font '{name}' from '{}': {message}", .path.display())]
    Font {
        name: String,
        path: PathBuf,
        message: String,
    },

    /// Neither a standard PDF font nor a registered font file
    #[error("unknown font '{0}', use a standard PDF font name or pass a font file")]
    UnknownFont(String),

    /// Not enough room to place the requested number of dots
    #[error("placed only {placed} of {wanted} dots before giving up")]
    PlacementExhausted { wanted: usize, placed: usize },

    /// The PDF could not be produced
    #[error("failed to render PDF: {0}")]
    Render(String),

    /// An I/O error occurred
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;
