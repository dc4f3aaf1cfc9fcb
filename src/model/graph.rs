use super::edge::EdgeData;
use super::table::FeatureTable;
use super::tensor::leading_dim;
use super::types::BondOrder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A graph node: one atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Atom {
    pub atomic_number: u8,
    #[serde(default)]
    pub formal_charge: i32,
}

impl Atom {
    pub fn new(atomic_number: u8, formal_charge: i32) -> Self {
        Self {
            atomic_number,
            formal_charge,
        }
    }
}

/// A graph edge: one bond, stored with `i <= j`.
///
/// Deserialized bonds are normalized the same way as [`Bond::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBond")]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

#[derive(Deserialize)]
struct RawBond {
    i: usize,
    j: usize,
    #[serde(default)]
    order: BondOrder,
}

impl From<RawBond> for Bond {
    fn from(raw: RawBond) -> Self {
        Bond::new(raw.i, raw.j, raw.order)
    }
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self {
                i: idx1,
                j: idx2,
                order,
            }
        } else {
            Self {
                i: idx2,
                j: idx1,
                order,
            }
        }
    }

    /// The same bond with both endpoints moved by `offset`.
    #[inline]
    pub(crate) fn shifted_up(&self, offset: usize) -> Self {
        Self {
            i: self.i + offset,
            j: self.j + offset,
            order: self.order,
        }
    }

    /// The same bond with both endpoints moved back by `offset`.
    ///
    /// The caller guarantees both endpoints are `>= offset`.
    #[inline]
    pub(crate) fn shifted_down(&self, offset: usize) -> Self {
        Self {
            i: self.i - offset,
            j: self.j - offset,
            order: self.order,
        }
    }
}

/// The three feature tables a graph may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Node,
    Graph,
    Edge,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Node, Table::Graph, Table::Edge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Node => "node_data",
            Table::Graph => "graph_data",
            Table::Edge => "edge_data",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A molecular graph with node-, graph- and edge-level feature tables.
///
/// Tables are optional so that graphs can be assembled incrementally by a
/// featurization stage; batching requires all three to be present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MolecularGraph {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_data: Option<FeatureTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_data: Option<FeatureTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_data: Option<EdgeData>,
}

impl MolecularGraph {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        Self {
            atoms,
            bonds,
            ..Self::default()
        }
    }

    pub fn with_node_data(mut self, table: FeatureTable) -> Self {
        self.node_data = Some(table);
        self
    }

    pub fn with_graph_data(mut self, table: FeatureTable) -> Self {
        self.graph_data = Some(table);
        self
    }

    pub fn with_edge_data(mut self, data: EdgeData) -> Self {
        self.edge_data = Some(data);
        self
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn has_table(&self, table: Table) -> bool {
        match table {
            Table::Node => self.node_data.is_some(),
            Table::Graph => self.graph_data.is_some(),
            Table::Edge => self.edge_data.is_some(),
        }
    }

    /// Number of graph-level rows this graph contributes to a batch.
    ///
    /// Taken from the first `graph_data` feature; a graph without graph
    /// features counts as one row.
    pub fn graph_rows(&self) -> usize {
        self.graph_data
            .as_ref()
            .and_then(|table| table.values().next())
            .and_then(leading_dim)
            .unwrap_or(1)
    }
}
