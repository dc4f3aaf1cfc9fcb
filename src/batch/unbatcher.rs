use super::error::Error;
use super::layout::{BatchLayout, Segment};
use crate::model::graph::{MolecularGraph, Table};
use crate::model::table::FeatureTable;
use crate::model::tensor::leading_dim;

pub(super) fn unbatch_graph(
    graph: &MolecularGraph,
    layout: &BatchLayout,
) -> Result<Vec<MolecularGraph>, Error> {
    layout.check_covers(graph)?;

    if let Some(table) = &graph.node_data {
        check_lengths(Table::Node.as_str(), table, layout.total_nodes())?;
    }
    if let Some(table) = &graph.graph_data {
        check_lengths(Table::Graph.as_str(), table, layout.total_graph_rows())?;
    }
    if let Some(edges) = &graph.edge_data {
        for (path, table) in edges.tables() {
            check_lengths(&path, table, layout.total_edges())?;
        }
    }

    let parts: Vec<MolecularGraph> = layout
        .segments()
        .iter()
        .map(|segment| extract(graph, segment))
        .collect();

    log::debug!(
        "unbatched {} nodes, {} edges into {} graphs",
        graph.node_count(),
        graph.edge_count(),
        parts.len()
    );

    Ok(parts)
}

/// Copies one segment out of `graph`, renumbering its bonds from zero.
fn extract(graph: &MolecularGraph, segment: &Segment) -> MolecularGraph {
    let offset = segment.nodes.start;
    let atoms = graph.atoms[segment.nodes.clone()].to_vec();
    let bonds = graph.bonds[segment.edges.clone()]
        .iter()
        .map(|bond| bond.shifted_down(offset))
        .collect();

    MolecularGraph {
        atoms,
        bonds,
        node_data: graph
            .node_data
            .as_ref()
            .map(|t| t.slice_rows(segment.nodes.clone())),
        graph_data: graph
            .graph_data
            .as_ref()
            .map(|t| t.slice_rows(segment.graphs.clone())),
        edge_data: graph
            .edge_data
            .as_ref()
            .map(|e| e.slice_rows(segment.edges.clone())),
    }
}

fn check_lengths(path: &str, table: &FeatureTable, expected: usize) -> Result<(), Error> {
    for (name, tensor) in table.iter() {
        match leading_dim(tensor) {
            Some(rows) if rows == expected => {}
            rows => {
                return Err(Error::feature_length(path, name, expected, rows.unwrap_or(0)));
            }
        }
    }
    Ok(())
}
