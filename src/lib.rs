//! # flashcards – Glenn Doman flash card PDFs
//!
//! This crate turns a word list (YAML or JSON) into printable flash card PDFs,
//! one file per group and one card per page. The pipeline stages are:
//!
//! 1. **Configure** – merge run defaults with group overrides ([`config`])
//! 2. **Select** – drop blank, repeated and already-seen words ([`words`])
//! 3. **Layout** – fit and center words, or scatter dots ([`layout`], [`dots`])
//! 4. **Render** – emit PDF bytes via printpdf ([`render`])
//!
//! [`pipeline`] runs the stages over every group of a word list.

pub mod color;
pub mod config;
pub mod dots;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod layout_config;
pub mod pipeline;
pub mod render;
pub mod words;

// Re-exports for convenience
pub use config::{merge, CardConfig, GroupOverrides, WordGroup};
pub use error::{FlashcardError, Result};
pub use pipeline::{run, run_file, GroupReport, RunSummary};
