//! Batching and unbatching of feature-annotated molecular graphs.
//!
//! [`batch`] combines graphs into their disjoint union and concatenates
//! every feature table along the entity axis, in input order. [`unbatch`]
//! splits a combined graph back given the per-graph node counts, and
//! [`unbatch_with_layout`] does the same from the exact [`BatchLayout`]
//! returned by [`batch_with`].
//!
//! All preconditions are checked before any tensor is touched; a failing
//! call returns an [`Error`] naming the offending graph, table and feature
//! and produces no partial output.

mod batcher;
mod config;
mod error;
mod layout;
mod unbatcher;
mod validate;

pub use batcher::BatchedGraph;
pub use config::{BatchConfig, GraphRows};
pub use error::Error;
pub use layout::{BatchLayout, Segment};

use crate::model::graph::MolecularGraph;

/// Batches `graphs` with the default [`BatchConfig`].
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `graphs` is empty.
/// - [`Error::MalformedGraph`] if a graph lacks one of its three tables.
/// - [`Error::MissingFeature`] / [`Error::UnexpectedFeature`] if feature
///   names differ from graph 0's.
/// - [`Error::EdgeLayoutMismatch`] if graphs mix flat and direction-keyed
///   edge data.
/// - Shape and row-count errors as listed on [`Error`].
pub fn batch(graphs: &[MolecularGraph]) -> Result<MolecularGraph, Error> {
    batch_with(graphs, &BatchConfig::default()).map(|batched| batched.graph)
}

/// Batches `graphs` and returns the combined graph with its layout.
pub fn batch_with(
    graphs: &[MolecularGraph],
    config: &BatchConfig,
) -> Result<BatchedGraph, Error> {
    batcher::batch_graphs(graphs, config)
}

/// Splits `graph` into consecutive graphs of `counts[i]` nodes each, with
/// the default [`BatchConfig`].
///
/// # Errors
///
/// - [`Error::CountMismatch`] if `counts` does not sum to the node count.
/// - [`Error::EdgeOutsideSegment`] if a bond crosses a count boundary.
/// - [`Error::FeatureLengthMismatch`] if a feature's rows do not match the
///   derived layout.
pub fn unbatch(graph: &MolecularGraph, counts: &[usize]) -> Result<Vec<MolecularGraph>, Error> {
    unbatch_with(graph, counts, &BatchConfig::default())
}

/// Splits `graph` by node counts, partitioning graph rows per `config`.
pub fn unbatch_with(
    graph: &MolecularGraph,
    counts: &[usize],
    config: &BatchConfig,
) -> Result<Vec<MolecularGraph>, Error> {
    let layout = BatchLayout::from_node_counts(graph, counts, config.graph_rows)?;
    unbatch_with_layout(graph, &layout)
}

/// Splits `graph` along an explicit layout.
///
/// # Errors
///
/// - [`Error::CountMismatch`] / [`Error::EdgeCountMismatch`] if the layout
///   does not cover exactly the graph's atoms and bonds.
/// - [`Error::EdgeOutsideSegment`] if a bond leaves its segment.
/// - [`Error::FeatureLengthMismatch`] if a feature's rows do not match the
///   layout.
pub fn unbatch_with_layout(
    graph: &MolecularGraph,
    layout: &BatchLayout,
) -> Result<Vec<MolecularGraph>, Error> {
    unbatcher::unbatch_graph(graph, layout)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::model::edge::EdgeData;
    use crate::model::graph::{Atom, Bond};
    use crate::model::table::FeatureTable;
    use crate::model::types::BondOrder;
    use ndarray::Array1;
    use proptest::prelude::*;

    fn ring(n: usize, seed: f32) -> MolecularGraph {
        let bonds: Vec<Bond> = if n > 2 {
            (0..n).map(|i| Bond::new(i, (i + 1) % n, BondOrder::Aromatic)).collect()
        } else {
            (1..n).map(|i| Bond::new(i - 1, i, BondOrder::Single)).collect()
        };
        let m = bonds.len();
        MolecularGraph::new(vec![Atom::new(7, 0); n], bonds)
            .with_node_data(FeatureTable::new().with(
                "charge",
                Array1::from_shape_fn(n, |i| seed + i as f32).into_dyn(),
            ))
            .with_graph_data(FeatureTable::new().with("id", Array1::from_elem(1, seed).into_dyn()))
            .with_edge_data(EdgeData::Flat(FeatureTable::new().with(
                "length",
                Array1::from_shape_fn(m, |i| seed - i as f32).into_dyn(),
            )))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn unbatch_inverts_batch(sizes in prop::collection::vec(0usize..6, 1..6)) {
            let graphs: Vec<MolecularGraph> = sizes
                .iter()
                .enumerate()
                .map(|(k, &n)| ring(n, k as f32 * 10.0))
                .collect();

            let combined = batch(&graphs).unwrap();
            prop_assert_eq!(combined.node_count(), sizes.iter().sum::<usize>());

            let parts = unbatch(&combined, &sizes).unwrap();
            prop_assert_eq!(parts, graphs);
        }
    }
}
