//! Explicit partition of a batched graph into its source graphs.

use super::config::GraphRows;
use super::error::Error;
use crate::model::graph::MolecularGraph;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Index ranges one source graph occupies in a batched graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Atom indices (rows of `node_data`).
    pub nodes: Range<usize>,
    /// Bond indices (rows of every edge table).
    pub edges: Range<usize>,
    /// Rows of `graph_data`.
    pub graphs: Range<usize>,
}

impl Segment {
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn graph_row_count(&self) -> usize {
        self.graphs.len()
    }
}

/// The ordered, contiguous segments of a batched graph.
///
/// Produced by the batcher alongside the combined graph, or rebuilt from
/// per-graph node counts with [`BatchLayout::from_node_counts`]. Segment `k`
/// starts where segment `k - 1` ends on every axis, and the first segment
/// starts at zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct BatchLayout {
    segments: Vec<Segment>,
}

impl BatchLayout {
    /// Builds a layout from explicit segments, checking contiguity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonContiguousLayout`] naming the first segment that
    /// does not start where the previous one ended, or whose ranges run
    /// backwards.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, Error> {
        let (mut nodes, mut edges, mut graphs) = (0, 0, 0);
        for (k, segment) in segments.iter().enumerate() {
            let contiguous = segment.nodes.start == nodes
                && segment.edges.start == edges
                && segment.graphs.start == graphs;
            let forward = segment.nodes.start <= segment.nodes.end
                && segment.edges.start <= segment.edges.end
                && segment.graphs.start <= segment.graphs.end;
            if !contiguous || !forward {
                return Err(Error::NonContiguousLayout { segment: k });
            }
            nodes = segment.nodes.end;
            edges = segment.edges.end;
            graphs = segment.graphs.end;
        }
        Ok(Self { segments })
    }

    /// Rebuilds the layout of `graph` from per-graph node counts.
    ///
    /// Bond ranges are recovered from the bond list: the bonds of segment
    /// `k` must directly follow those of segment `k - 1` and connect only
    /// atoms of segment `k`, which is how the batcher lays them out. Graph
    /// rows follow `graph_rows`.
    ///
    /// # Errors
    ///
    /// - [`Error::CountMismatch`] if the counts do not sum to the node count.
    /// - [`Error::EdgeOutsideSegment`] if a bond crosses a segment boundary
    ///   or appears out of segment order.
    pub fn from_node_counts(
        graph: &MolecularGraph,
        counts: &[usize],
        graph_rows: GraphRows,
    ) -> Result<Self, Error> {
        let total = counts
            .iter()
            .try_fold(0usize, |acc, &c| acc.checked_add(c))
            .unwrap_or(usize::MAX);
        if total != graph.node_count() {
            return Err(Error::CountMismatch {
                expected: graph.node_count(),
                actual: total,
            });
        }

        let mut layout = Self::default();
        let mut cursor = 0;
        for (k, &count) in counts.iter().enumerate() {
            let nodes = layout.total_nodes()..layout.total_nodes() + count;
            let first_bond = cursor;
            while let Some(bond) = graph.bonds.get(cursor) {
                let (lo, hi) = (bond.i.min(bond.j), bond.i.max(bond.j));
                if lo >= nodes.end {
                    break;
                }
                if lo < nodes.start || hi >= nodes.end {
                    return Err(Error::EdgeOutsideSegment {
                        bond: cursor,
                        segment: k,
                    });
                }
                cursor += 1;
            }
            let rows = match graph_rows {
                GraphRows::PerGraph => 1,
                GraphRows::PerNode => count,
            };
            layout.push(count, cursor - first_bond, rows);
        }

        if cursor < graph.edge_count() {
            return Err(Error::EdgeOutsideSegment {
                bond: cursor,
                segment: counts.len().saturating_sub(1),
            });
        }

        Ok(layout)
    }

    /// Appends a segment right after the current last one.
    pub(crate) fn push(&mut self, nodes: usize, edges: usize, graph_rows: usize) {
        let (n, e, g) = (
            self.total_nodes(),
            self.total_edges(),
            self.total_graph_rows(),
        );
        self.segments.push(Segment {
            nodes: n..n + nodes,
            edges: e..e + edges,
            graphs: g..g + graph_rows,
        });
    }

    /// Checks that this layout partitions exactly the atoms and bonds of
    /// `graph` and that every bond stays inside its segment.
    pub(crate) fn check_covers(&self, graph: &MolecularGraph) -> Result<(), Error> {
        if self.total_nodes() != graph.node_count() {
            return Err(Error::CountMismatch {
                expected: graph.node_count(),
                actual: self.total_nodes(),
            });
        }
        if self.total_edges() != graph.edge_count() {
            return Err(Error::EdgeCountMismatch {
                expected: graph.edge_count(),
                actual: self.total_edges(),
            });
        }
        for (k, segment) in self.segments.iter().enumerate() {
            for idx in segment.edges.clone() {
                let bond = &graph.bonds[idx];
                if !segment.nodes.contains(&bond.i) || !segment.nodes.contains(&bond.j) {
                    return Err(Error::EdgeOutsideSegment {
                        bond: idx,
                        segment: k,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn node_counts(&self) -> Vec<usize> {
        self.segments.iter().map(Segment::node_count).collect()
    }

    pub fn edge_counts(&self) -> Vec<usize> {
        self.segments.iter().map(Segment::edge_count).collect()
    }

    pub fn total_nodes(&self) -> usize {
        self.segments.last().map_or(0, |s| s.nodes.end)
    }

    pub fn total_edges(&self) -> usize {
        self.segments.last().map_or(0, |s| s.edges.end)
    }

    pub fn total_graph_rows(&self) -> usize {
        self.segments.last().map_or(0, |s| s.graphs.end)
    }
}

impl TryFrom<Vec<Segment>> for BatchLayout {
    type Error = Error;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<BatchLayout> for Vec<Segment> {
    fn from(layout: BatchLayout) -> Self {
        layout.segments
    }
}
