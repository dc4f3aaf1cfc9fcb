//! Data structures for feature-annotated molecular graphs.
//!
//! - [`tensor`] – the [`Tensor`](tensor::Tensor) alias and axis-0 helpers.
//! - [`table`] – insertion-ordered, name-keyed tables ([`FeatureTable`](table::FeatureTable)).
//! - [`edge`] – flat or direction-keyed edge features.
//! - [`graph`] – atoms, bonds and the [`MolecularGraph`](graph::MolecularGraph) itself.
//! - [`types`] – bond orders.

pub mod edge;
pub mod graph;
pub mod table;
pub mod tensor;
pub mod types;
