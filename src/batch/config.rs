use crate::model::graph::MolecularGraph;
use serde::{Deserialize, Serialize};

/// How `graph_data` rows relate to the graphs of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphRows {
    /// Each graph owns its own number of graph-level rows, normally one.
    /// Unbatching by counts assigns exactly one row per count.
    #[default]
    PerGraph,
    /// Graph-level features are broadcast to every node, so each graph has
    /// one graph row per atom and graph rows are partitioned like nodes.
    PerNode,
}

impl GraphRows {
    /// Number of `graph_data` rows `graph` contributes to a batch.
    pub fn rows_for(&self, graph: &MolecularGraph) -> usize {
        match self {
            GraphRows::PerGraph => graph.graph_rows(),
            GraphRows::PerNode => graph.node_count(),
        }
    }
}

/// Settings shared by [`batch_with`](super::batch_with) and
/// [`unbatch_with`](super::unbatch_with).
///
/// Deserializes from TOML with every field optional:
///
/// ```
/// use nagl_batch::{BatchConfig, GraphRows};
///
/// let config: BatchConfig = toml::from_str(r#"graph_rows = "per_node""#).unwrap();
/// assert_eq!(config.graph_rows, GraphRows::PerNode);
///
/// let config: BatchConfig = toml::from_str("").unwrap();
/// assert_eq!(config, BatchConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Row convention for `graph_data` features.
    pub graph_rows: GraphRows,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = BatchConfig::default();
        assert_eq!(config.graph_rows, GraphRows::PerGraph);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<BatchConfig, _> = toml::from_str("rows = \"per_node\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result: Result<BatchConfig, _> = toml::from_str("graph_rows = \"per_edge\"");
        assert!(result.is_err());
    }
}
