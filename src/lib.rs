//! Batching and unbatching of feature-annotated molecular graphs for graph
//! neural network pipelines.
//!
//! A [`MolecularGraph`] carries atoms and bonds plus three tables of named
//! tensors: per-atom `node_data`, per-molecule `graph_data`, and per-bond
//! `edge_data` (either one flat table or one table per direction). Batching
//! forms the disjoint union of many graphs and stacks every feature along its
//! leading axis, so a model can process them in one pass. Unbatching splits
//! the combined graph back, either by per-graph atom counts or by the exact
//! [`BatchLayout`] recorded when batching.
//!
//! # Features
//!
//! - **Batching**: disjoint union with bond renumbering and row-wise feature
//!   concatenation, in input order
//! - **Unbatching**: recovery by node counts or by an explicit layout, with
//!   bond ranges derived from the bond list
//! - **Eager validation**: feature names, per-entity shapes, row counts and
//!   edge layouts are checked before any tensor work
//! - **Bucketing**: grouping of key-aligned arrays by discrete key
//! - **Archives**: JSON and TOML documents for graph sets and batches
//!
//! # Quick Start
//!
//! ```
//! use nagl_batch::{Atom, Bond, BondOrder, EdgeData, FeatureTable, MolecularGraph};
//! use nagl_batch::{BatchError, batch, unbatch};
//! use ndarray::arr1;
//!
//! fn molecule(n: usize, charge: f32) -> MolecularGraph {
//!     let bonds = (1..n).map(|i| Bond::new(i - 1, i, BondOrder::Single)).collect();
//!     MolecularGraph::new(vec![Atom::new(6, 0); n], bonds)
//!         .with_node_data(FeatureTable::new().with("charge", arr1(&vec![charge; n]).into_dyn()))
//!         .with_graph_data(FeatureTable::new().with("mass", arr1(&[12.0 * n as f32]).into_dyn()))
//!         .with_edge_data(EdgeData::Flat(
//!             FeatureTable::new().with("order", arr1(&vec![1.0f32; n - 1]).into_dyn()),
//!         ))
//! }
//!
//! let graphs = vec![molecule(2, 0.1), molecule(3, 0.2)];
//! let batched = batch(&graphs)?;
//! assert_eq!(batched.node_count(), 5);
//! assert_eq!(batched.edge_count(), 3);
//!
//! let parts = unbatch(&batched, &[2, 3])?;
//! assert_eq!(parts, graphs);
//! # Ok::<(), BatchError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`batch`] / [`batch_with`]: combine graphs, optionally returning the layout
//! - [`unbatch`] / [`unbatch_with`] / [`unbatch_with_layout`]: split them again
//! - [`bucket`]: group arrays by key
//! - [`io`]: JSON and TOML archives
//!
//! # Data Types
//!
//! - [`MolecularGraph`]: atoms, bonds and the three feature tables
//! - [`Atom`] / [`Bond`] / [`BondOrder`]: graph structure
//! - [`FeatureTable`]: insertion-ordered map of feature name to [`Tensor`]
//! - [`EdgeData`]: flat or direction-keyed edge tables
//! - [`BatchLayout`] / [`Segment`]: per-graph node, edge and graph-row ranges
//! - [`BatchConfig`] / [`GraphRows`]: how `graph_data` rows are counted

mod batch;
mod bucket;
mod model;

pub mod io;

pub use model::edge::{DirectedEdgeData, EdgeData, EdgeLayout, FORWARD, REVERSE};
pub use model::graph::{Atom, Bond, MolecularGraph, Table};
pub use model::table::{FeatureTable, OrderedMap};
pub use model::tensor::Tensor;
pub use model::types::{BondOrder, ParseBondOrderError};

pub use batch::{
    BatchConfig, BatchLayout, BatchedGraph, GraphRows, Segment, batch, batch_with, unbatch,
    unbatch_with, unbatch_with_layout,
};

pub use batch::Error as BatchError;

pub use bucket::{Bucketor, bucket};
