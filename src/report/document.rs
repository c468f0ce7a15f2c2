use chrono::{DateTime, Local};
use std::path::PathBuf;

/// One piece of content inside a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Wide fixed-width table, set in a smaller monospace font.
    Table(String),
    /// Fixed-width text.
    Text(String),
    /// `key : value` lines.
    KeyValues(Vec<(String, String)>),
    /// An image embedded from disk when the document is laid out.
    Image(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// The full report content, independent of pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Local>,
    pub sections: Vec<Section>,
}
