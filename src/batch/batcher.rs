use super::config::BatchConfig;
use super::error::Error;
use super::layout::BatchLayout;
use super::validate;
use crate::model::edge::{EdgeData, directed_path};
use crate::model::graph::{MolecularGraph, Table};
use crate::model::table::FeatureTable;
use crate::model::tensor::concat_rows;

/// A batched graph together with the layout that partitions it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchedGraph {
    /// The disjoint union of the inputs with concatenated feature tables.
    pub graph: MolecularGraph,
    /// Where each input graph landed in `graph`.
    pub layout: BatchLayout,
}

pub(super) fn batch_graphs(
    graphs: &[MolecularGraph],
    config: &BatchConfig,
) -> Result<BatchedGraph, Error> {
    validate::check_batch(graphs, config)?;

    let mut layout = BatchLayout::default();
    let mut combined = MolecularGraph::new(
        Vec::with_capacity(graphs.iter().map(MolecularGraph::node_count).sum()),
        Vec::with_capacity(graphs.iter().map(MolecularGraph::edge_count).sum()),
    );

    for graph in graphs {
        let offset = combined.node_count();
        combined.atoms.extend_from_slice(&graph.atoms);
        combined
            .bonds
            .extend(graph.bonds.iter().map(|bond| bond.shifted_up(offset)));

        layout.push(
            graph.node_count(),
            graph.edge_count(),
            config.graph_rows.rows_for(graph),
        );
    }

    let node_tables = collect(graphs, Table::Node, |g| g.node_data.as_ref())?;
    combined.node_data = Some(concat_tables(Table::Node.as_str(), &node_tables)?);

    let graph_tables = collect(graphs, Table::Graph, |g| g.graph_data.as_ref())?;
    combined.graph_data = Some(concat_tables(Table::Graph.as_str(), &graph_tables)?);

    let edge_data = collect(graphs, Table::Edge, |g| g.edge_data.as_ref())?;
    combined.edge_data = Some(concat_edges(&edge_data)?);

    log::debug!(
        "batched {} graphs into {} nodes, {} edges, {} graph rows",
        graphs.len(),
        layout.total_nodes(),
        layout.total_edges(),
        layout.total_graph_rows()
    );

    Ok(BatchedGraph {
        graph: combined,
        layout,
    })
}

fn collect<'a, T>(
    graphs: &'a [MolecularGraph],
    table: Table,
    select: impl Fn(&'a MolecularGraph) -> Option<&'a T>,
) -> Result<Vec<&'a T>, Error> {
    graphs
        .iter()
        .enumerate()
        .map(|(index, g)| select(g).ok_or(Error::MalformedGraph { index, table }))
        .collect()
}

/// Concatenates each feature of the first table with the same feature of
/// every other table, in slice order.
fn concat_tables(path: &str, tables: &[&FeatureTable]) -> Result<FeatureTable, Error> {
    let Some(first) = tables.first() else {
        return Ok(FeatureTable::new());
    };

    first.try_map(|name, _| {
        let tensors = tables
            .iter()
            .enumerate()
            .map(|(index, table)| {
                table
                    .get(name)
                    .ok_or_else(|| Error::missing_feature(index, path, name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::trace!("concatenating {} tensors of '{}' in {}", tensors.len(), name, path);
        Ok(concat_rows(&tensors)?)
    })
}

/// Concatenates flat edge tables, or each direction's tables in turn.
///
/// `validate::check_batch` has already matched every layout and direction
/// set against graph 0.
fn concat_edges(edges: &[&EdgeData]) -> Result<EdgeData, Error> {
    let Some(first) = edges.first() else {
        return Ok(EdgeData::default());
    };

    match first {
        EdgeData::Flat(_) => {
            let tables: Vec<&FeatureTable> = edges
                .iter()
                .filter_map(|data| match data {
                    EdgeData::Flat(table) => Some(table),
                    EdgeData::Directed(_) => None,
                })
                .collect();
            debug_assert_eq!(tables.len(), edges.len());
            Ok(EdgeData::Flat(concat_tables(Table::Edge.as_str(), &tables)?))
        }
        EdgeData::Directed(directions) => {
            let concatenated = directions.try_map(|label, _| {
                let tables: Vec<&FeatureTable> = edges
                    .iter()
                    .filter_map(|data| match data {
                        EdgeData::Directed(dirs) => dirs.get(label),
                        EdgeData::Flat(_) => None,
                    })
                    .collect();
                debug_assert_eq!(tables.len(), edges.len());
                concat_tables(&directed_path(label), &tables)
            })?;
            Ok(EdgeData::Directed(concatenated))
        }
    }
}
