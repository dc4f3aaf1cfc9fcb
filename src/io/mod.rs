//! Reading and writing graph archives.
//!
//! Two document kinds are supported: a [`GraphSet`] holding independent
//! graphs, and a [`BatchDocument`] holding a batched graph together with its
//! [`BatchLayout`](crate::BatchLayout). Both serialize to JSON or TOML.

use std::fmt;
use std::path::Path;

pub mod error;

mod document;

pub use document::{
    BatchDocument, GraphSet, read_batch, read_document, read_graphs, write_batch, write_document,
    write_graphs,
};
pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Infers the format from a file extension, ignoring case.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Toml => write!(f, "TOML"),
        }
    }
}
