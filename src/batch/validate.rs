//! Precondition checks run before any tensor is concatenated.
//!
//! Graph 0 is the reference: every later graph must carry the same tables,
//! feature names, edge layout, direction labels and per-entity shapes.

use super::config::BatchConfig;
use super::error::Error;
use crate::model::edge::{EdgeData, directed_path};
use crate::model::graph::{MolecularGraph, Table};
use crate::model::table::{FeatureTable, OrderedMap};
use crate::model::tensor::{leading_dim, trailing_shape};

pub(super) fn check_batch(graphs: &[MolecularGraph], config: &BatchConfig) -> Result<(), Error> {
    let reference = graphs.first().ok_or(Error::EmptyInput)?;

    for (index, graph) in graphs.iter().enumerate() {
        check_structure(index, graph)?;
    }

    let (ref_nodes, ref_graphs, ref_edges) = tables(0, reference)?;
    for (index, graph) in graphs.iter().enumerate() {
        let (nodes, graph_table, edges) = tables(index, graph)?;

        check_names(index, Table::Node.as_str(), ref_nodes, nodes)?;
        check_rows(index, Table::Node.as_str(), ref_nodes, nodes, graph.node_count())?;

        let graph_rows = config.graph_rows.rows_for(graph);
        check_names(index, Table::Graph.as_str(), ref_graphs, graph_table)?;
        check_rows(index, Table::Graph.as_str(), ref_graphs, graph_table, graph_rows)?;

        check_edges(index, ref_edges, edges, graph.edge_count())?;
    }

    Ok(())
}

fn check_structure(index: usize, graph: &MolecularGraph) -> Result<(), Error> {
    if let Some(table) = Table::ALL.into_iter().find(|t| !graph.has_table(*t)) {
        return Err(Error::MalformedGraph { index, table });
    }

    let n_atoms = graph.node_count();
    for bond in &graph.bonds {
        if bond.i >= n_atoms || bond.j >= n_atoms {
            return Err(Error::invalid_bond(
                index,
                bond.i,
                bond.j,
                format!("atom index out of bounds (n_atoms = {})", n_atoms),
            ));
        }
    }
    Ok(())
}

fn tables(
    index: usize,
    graph: &MolecularGraph,
) -> Result<(&FeatureTable, &FeatureTable, &EdgeData), Error> {
    let missing = |table| Error::MalformedGraph { index, table };
    Ok((
        graph.node_data.as_ref().ok_or_else(|| missing(Table::Node))?,
        graph.graph_data.as_ref().ok_or_else(|| missing(Table::Graph))?,
        graph.edge_data.as_ref().ok_or_else(|| missing(Table::Edge))?,
    ))
}

fn check_edges(
    index: usize,
    reference: &EdgeData,
    edges: &EdgeData,
    n_bonds: usize,
) -> Result<(), Error> {
    match (reference, edges) {
        (EdgeData::Flat(ref_table), EdgeData::Flat(table)) => {
            let path = Table::Edge.as_str();
            check_names(index, path, ref_table, table)?;
            check_rows(index, path, ref_table, table, n_bonds)
        }
        (EdgeData::Directed(ref_dirs), EdgeData::Directed(dirs)) => {
            check_directions(index, ref_dirs, dirs)?;
            for (label, ref_table) in ref_dirs.iter() {
                let Some(table) = dirs.get(label) else {
                    return Err(Error::MissingDirection {
                        index,
                        direction: label.to_string(),
                    });
                };
                let path = directed_path(label);
                check_names(index, &path, ref_table, table)?;
                check_rows(index, &path, ref_table, table, n_bonds)?;
            }
            Ok(())
        }
        _ => Err(Error::EdgeLayoutMismatch {
            index,
            expected: reference.layout(),
            found: edges.layout(),
        }),
    }
}

fn check_directions(
    index: usize,
    reference: &OrderedMap<FeatureTable>,
    directions: &OrderedMap<FeatureTable>,
) -> Result<(), Error> {
    if let Some(label) = reference.names().find(|l| !directions.contains(l)) {
        return Err(Error::MissingDirection {
            index,
            direction: label.to_string(),
        });
    }
    if let Some(label) = directions.names().find(|l| !reference.contains(l)) {
        return Err(Error::UnexpectedDirection {
            index,
            direction: label.to_string(),
        });
    }
    Ok(())
}

fn check_names(
    index: usize,
    path: &str,
    reference: &FeatureTable,
    table: &FeatureTable,
) -> Result<(), Error> {
    if let Some(name) = reference.names().find(|n| !table.contains(n)) {
        return Err(Error::missing_feature(index, path, name));
    }
    if let Some(name) = table.names().find(|n| !reference.contains(n)) {
        return Err(Error::unexpected_feature(index, path, name));
    }
    Ok(())
}

/// Checks row counts and per-entity shapes of `table` against the
/// reference table. Assumes the names already match.
fn check_rows(
    index: usize,
    path: &str,
    reference: &FeatureTable,
    table: &FeatureTable,
    expected_rows: usize,
) -> Result<(), Error> {
    for (name, tensor) in table.iter() {
        let Some(rows) = leading_dim(tensor) else {
            return Err(Error::ScalarFeature {
                index,
                table: path.to_string(),
                feature: name.to_string(),
            });
        };
        if rows != expected_rows {
            return Err(Error::EntityCountMismatch {
                index,
                table: path.to_string(),
                feature: name.to_string(),
                expected: expected_rows,
                found: rows,
            });
        }
        if let Some(ref_tensor) = reference.get(name) {
            if trailing_shape(ref_tensor) != trailing_shape(tensor) {
                return Err(Error::IncompatibleShape {
                    index,
                    table: path.to_string(),
                    feature: name.to_string(),
                    expected: trailing_shape(ref_tensor).to_vec(),
                    found: trailing_shape(tensor).to_vec(),
                });
            }
        }
    }
    Ok(())
}
