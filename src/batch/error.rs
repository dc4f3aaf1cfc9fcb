//! Error types for batching, unbatching and bucketing.
//!
//! Every precondition is checked before any tensor is touched, so each
//! variant names the input it is about: the graph index within the batch,
//! the table path (`node_data`, `graph_data`, `edge_data` or
//! `edge_data[<direction>]`) and the feature.

use crate::model::edge::EdgeLayout;
use crate::model::graph::Table;
use thiserror::Error;

/// Errors that can occur while batching or unbatching molecular graphs.
#[derive(Debug, Error)]
pub enum Error {
    /// Batching was asked to combine zero graphs.
    #[error("cannot batch an empty sequence of graphs")]
    EmptyInput,

    /// A graph entering the batcher lacks one of its three feature tables.
    #[error("graph {index} is missing its {table} table")]
    MalformedGraph {
        /// Position of the graph in the batch.
        index: usize,
        /// The absent table.
        table: Table,
    },

    /// A bond references an atom outside its graph.
    #[error("graph {index} has an invalid bond between atoms {i} and {j}: {detail}")]
    InvalidBond {
        index: usize,
        i: usize,
        j: usize,
        detail: String,
    },

    /// A feature present in the first graph is absent from a later one.
    #[error("graph {index} is missing feature '{feature}' in {table}")]
    MissingFeature {
        index: usize,
        table: String,
        feature: String,
    },

    /// A later graph carries a feature the first graph does not.
    #[error("graph {index} has feature '{feature}' in {table} that graph 0 does not")]
    UnexpectedFeature {
        index: usize,
        table: String,
        feature: String,
    },

    /// Edge data is flat in one graph and direction-keyed in another.
    #[error("graph {index} has {found} edge data but graph 0 has {expected} edge data")]
    EdgeLayoutMismatch {
        index: usize,
        expected: EdgeLayout,
        found: EdgeLayout,
    },

    /// A direction label present in the first graph is absent from a later one.
    #[error("graph {index} is missing edge direction '{direction}'")]
    MissingDirection { index: usize, direction: String },

    /// A later graph carries a direction label the first graph does not.
    #[error("graph {index} has edge direction '{direction}' that graph 0 does not")]
    UnexpectedDirection { index: usize, direction: String },

    /// A feature tensor has no entity axis.
    #[error("feature '{feature}' in {table} of graph {index} is a scalar; features need an entity axis")]
    ScalarFeature {
        index: usize,
        table: String,
        feature: String,
    },

    /// Per-entity dimensions of a feature differ from the first graph's.
    #[error(
        "feature '{feature}' in {table} of graph {index} has per-entity shape {found:?}, expected {expected:?}"
    )]
    IncompatibleShape {
        index: usize,
        table: String,
        feature: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A feature's row count disagrees with the entity count of its graph.
    #[error(
        "feature '{feature}' in {table} of graph {index} has {found} rows but the graph has {expected} entities"
    )]
    EntityCountMismatch {
        index: usize,
        table: String,
        feature: String,
        expected: usize,
        found: usize,
    },

    /// Unbatch counts do not add up to the combined graph's node count.
    #[error("unbatch counts sum to {actual} but the graph has {expected} nodes")]
    CountMismatch { expected: usize, actual: usize },

    /// A layout's edge ranges do not add up to the combined graph's bond count.
    #[error("layout covers {actual} bonds but the graph has {expected} bonds")]
    EdgeCountMismatch { expected: usize, actual: usize },

    /// A bond does not lie inside the node range of the segment it falls in.
    #[error("bond {bond} does not lie inside the node range of segment {segment}")]
    EdgeOutsideSegment { bond: usize, segment: usize },

    /// A layout segment does not start where the previous one ended.
    #[error("layout segment {segment} is not contiguous with the previous segment")]
    NonContiguousLayout { segment: usize },

    /// A feature of the combined graph does not match the layout's row total.
    #[error("feature '{feature}' in {table} has {found} rows but the layout covers {expected}")]
    FeatureLengthMismatch {
        table: String,
        feature: String,
        expected: usize,
        found: usize,
    },

    /// Data handed to a bucketor is not aligned with the bucketed keys.
    #[error("cannot bucket {found} rows with a bucketor built from {expected} keys")]
    BucketLengthMismatch { expected: usize, found: usize },

    /// A bucketing key cannot be ordered (for example NaN).
    #[error("bucketing key at position {index} cannot be ordered")]
    UnorderedKey { index: usize },

    /// Shape error reported by the tensor library.
    #[error("tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl Error {
    /// Creates a [`MissingFeature`](Error::MissingFeature) error.
    pub fn missing_feature(index: usize, table: impl Into<String>, feature: &str) -> Self {
        Self::MissingFeature {
            index,
            table: table.into(),
            feature: feature.to_string(),
        }
    }

    /// Creates an [`UnexpectedFeature`](Error::UnexpectedFeature) error.
    pub fn unexpected_feature(index: usize, table: impl Into<String>, feature: &str) -> Self {
        Self::UnexpectedFeature {
            index,
            table: table.into(),
            feature: feature.to_string(),
        }
    }

    /// Creates an [`InvalidBond`](Error::InvalidBond) error.
    pub fn invalid_bond(index: usize, i: usize, j: usize, details: impl Into<String>) -> Self {
        Self::InvalidBond {
            index,
            i,
            j,
            detail: details.into(),
        }
    }

    /// Creates a [`FeatureLengthMismatch`](Error::FeatureLengthMismatch) error.
    pub fn feature_length(
        table: impl Into<String>,
        feature: &str,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::FeatureLengthMismatch {
            table: table.into(),
            feature: feature.to_string(),
            expected,
            found,
        }
    }

    /// Index of the offending input graph, when the error is about one.
    pub fn graph_index(&self) -> Option<usize> {
        match self {
            Self::MalformedGraph { index, .. }
            | Self::InvalidBond { index, .. }
            | Self::MissingFeature { index, .. }
            | Self::UnexpectedFeature { index, .. }
            | Self::EdgeLayoutMismatch { index, .. }
            | Self::MissingDirection { index, .. }
            | Self::UnexpectedDirection { index, .. }
            | Self::ScalarFeature { index, .. }
            | Self::IncompatibleShape { index, .. }
            | Self::EntityCountMismatch { index, .. } => Some(*index),
            _ => None,
        }
    }
}
