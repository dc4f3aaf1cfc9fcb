use super::table::{FeatureTable, OrderedMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Label of the forward edge direction.
pub const FORWARD: &str = "forward";
/// Label of the reverse edge direction.
pub const REVERSE: &str = "reverse";

/// Edge feature tables keyed by direction label.
pub type DirectedEdgeData = OrderedMap<FeatureTable>;

/// Edge-level features of a molecular graph.
///
/// The two layouts are structurally distinct but batch and unbatch the same
/// way: every tensor has one row per bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "data", rename_all = "snake_case")]
pub enum EdgeData {
    /// A single table shared by both directions.
    Flat(FeatureTable),
    /// One table per direction label.
    Directed(DirectedEdgeData),
}

/// Which variant an [`EdgeData`] value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLayout {
    Flat,
    Directed,
}

impl fmt::Display for EdgeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeLayout::Flat => write!(f, "flat"),
            EdgeLayout::Directed => write!(f, "direction-keyed"),
        }
    }
}

impl EdgeData {
    pub fn layout(&self) -> EdgeLayout {
        match self {
            EdgeData::Flat(_) => EdgeLayout::Flat,
            EdgeData::Directed(_) => EdgeLayout::Directed,
        }
    }

    /// Iterates `(table path, table)` pairs, e.g. `("edge_data", ..)` for a
    /// flat layout or `("edge_data[forward]", ..)` for a directed one.
    pub fn tables(&self) -> Vec<(String, &FeatureTable)> {
        match self {
            EdgeData::Flat(table) => vec![("edge_data".to_string(), table)],
            EdgeData::Directed(directions) => directions
                .iter()
                .map(|(label, table)| (directed_path(label), table))
                .collect(),
        }
    }

    /// Copies rows `range` out of every edge feature, keeping the layout.
    pub fn slice_rows(&self, range: Range<usize>) -> Self {
        match self {
            EdgeData::Flat(table) => EdgeData::Flat(table.slice_rows(range)),
            EdgeData::Directed(directions) => EdgeData::Directed(
                directions
                    .iter()
                    .map(|(label, table)| (label, table.slice_rows(range.clone())))
                    .collect(),
            ),
        }
    }
}

impl Default for EdgeData {
    fn default() -> Self {
        EdgeData::Flat(FeatureTable::new())
    }
}

pub(crate) fn directed_path(label: &str) -> String {
    format!("edge_data[{label}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn directed() -> EdgeData {
        let forward = FeatureTable::new().with("bond_order", arr1(&[1.0f32, 2.0]).into_dyn());
        let reverse = FeatureTable::new().with("bond_order", arr1(&[1.0f32, 2.0]).into_dyn());
        EdgeData::Directed(
            DirectedEdgeData::new()
                .with(FORWARD, forward)
                .with(REVERSE, reverse),
        )
    }

    #[test]
    fn layout_reports_variant() {
        assert_eq!(EdgeData::default().layout(), EdgeLayout::Flat);
        assert_eq!(directed().layout(), EdgeLayout::Directed);
    }

    #[test]
    fn tables_are_named_by_path() {
        let paths: Vec<String> = directed().tables().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["edge_data[forward]", "edge_data[reverse]"]);

        let flat = EdgeData::default();
        assert_eq!(flat.tables()[0].0, "edge_data");
    }

    #[test]
    fn slice_keeps_directions() {
        let sliced = directed().slice_rows(1..2);
        let EdgeData::Directed(directions) = sliced else {
            panic!("layout changed");
        };
        assert_eq!(directions.names().collect::<Vec<_>>(), vec![FORWARD, REVERSE]);
        assert_eq!(
            directions.get(REVERSE).and_then(|t| t.get("bond_order")),
            Some(&arr1(&[2.0f32]).into_dyn())
        );
    }

    #[test]
    fn json_is_adjacently_tagged() {
        let json = serde_json::to_value(EdgeData::default()).unwrap();
        assert_eq!(json["layout"], "flat");
        assert!(json["data"].is_object());
    }
}
