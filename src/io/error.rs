use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML document: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to encode TOML document: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("feature '{feature}' in {table} of graph {graph} holds NaN or infinite values, which JSON cannot represent")]
    NonFiniteFeature {
        graph: usize,
        table: String,
        feature: String,
    },

    #[error("cannot infer archive format from '{}'", .0.display())]
    UnknownFormat(PathBuf),
}

impl Error {
    pub fn unknown_format(path: impl Into<PathBuf>) -> Self {
        Self::UnknownFormat(path.into())
    }

    pub fn non_finite(graph: usize, table: impl Into<String>, feature: &str) -> Self {
        Self::NonFiniteFeature {
            graph,
            table: table.into(),
            feature: feature.to_string(),
        }
    }
}
