use super::{Format, error::Error};
use crate::batch::{BatchLayout, BatchedGraph};
use crate::model::graph::{MolecularGraph, Table};
use crate::model::table::FeatureTable;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::io::{Read, Write};

/// An archive of independent graphs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSet {
    #[serde(default)]
    pub graphs: Vec<MolecularGraph>,
}

impl From<Vec<MolecularGraph>> for GraphSet {
    fn from(graphs: Vec<MolecularGraph>) -> Self {
        Self { graphs }
    }
}

/// A batched graph stored with the layout needed to split it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDocument {
    pub graph: MolecularGraph,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<BatchLayout>,
}

impl From<BatchedGraph> for BatchDocument {
    fn from(batched: BatchedGraph) -> Self {
        Self {
            graph: batched.graph,
            layout: Some(batched.layout),
        }
    }
}

pub fn read_document<T, R>(mut reader: R, format: Format) -> Result<T, Error>
where
    T: DeserializeOwned,
    R: Read,
{
    match format {
        Format::Json => Ok(serde_json::from_reader(reader)?),
        Format::Toml => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            Ok(toml::from_str(&text)?)
        }
    }
}

/// Serializes `document` as-is; JSON output of non-finite floats is not
/// checked here, see [`write_graphs`] and [`write_batch`].
pub fn write_document<T, W>(
    mut writer: W,
    format: Format,
    document: &T,
    pretty: bool,
) -> Result<(), Error>
where
    T: Serialize,
    W: Write,
{
    match (format, pretty) {
        (Format::Json, true) => serde_json::to_writer_pretty(&mut writer, document)?,
        (Format::Json, false) => serde_json::to_writer(&mut writer, document)?,
        (Format::Toml, true) => writer.write_all(toml::to_string_pretty(document)?.as_bytes())?,
        (Format::Toml, false) => writer.write_all(toml::to_string(document)?.as_bytes())?,
    }
    if format == Format::Json {
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_graphs<R: Read>(reader: R, format: Format) -> Result<Vec<MolecularGraph>, Error> {
    read_document::<GraphSet, _>(reader, format).map(|set| set.graphs)
}

pub fn write_graphs<W: Write>(
    writer: W,
    format: Format,
    graphs: &[MolecularGraph],
    pretty: bool,
) -> Result<(), Error> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        graphs: &'a [MolecularGraph],
    }
    if format == Format::Json {
        for (index, graph) in graphs.iter().enumerate() {
            check_finite(index, graph)?;
        }
    }
    write_document(writer, format, &Borrowed { graphs }, pretty)
}

pub fn read_batch<R: Read>(reader: R, format: Format) -> Result<BatchDocument, Error> {
    read_document(reader, format)
}

pub fn write_batch<W: Write>(
    writer: W,
    format: Format,
    document: &BatchDocument,
    pretty: bool,
) -> Result<(), Error> {
    if format == Format::Json {
        check_finite(0, &document.graph)?;
    }
    write_document(writer, format, document, pretty)
}

/// JSON has no NaN or infinity; serde_json would write them as `null` and
/// the archive could not be read back.
fn check_finite(index: usize, graph: &MolecularGraph) -> Result<(), Error> {
    let mut tables: Vec<(String, &FeatureTable)> = Vec::new();
    if let Some(table) = &graph.node_data {
        tables.push((Table::Node.to_string(), table));
    }
    if let Some(table) = &graph.graph_data {
        tables.push((Table::Graph.to_string(), table));
    }
    if let Some(edges) = &graph.edge_data {
        tables.extend(edges.tables());
    }

    for (path, table) in tables {
        if let Some((name, _)) = table
            .iter()
            .find(|(_, tensor)| tensor.iter().any(|v| !v.is_finite()))
        {
            return Err(Error::non_finite(index, path, name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchConfig, batch_with};
    use crate::model::edge::{DirectedEdgeData, EdgeData, FORWARD, REVERSE};
    use crate::model::graph::{Atom, Bond};
    use crate::model::table::FeatureTable;
    use crate::model::types::BondOrder;
    use ndarray::arr1;

    fn water(tag: f32) -> MolecularGraph {
        let forward = FeatureTable::new().with("bond_order", arr1(&[tag, tag + 1.0]).into_dyn());
        let reverse = FeatureTable::new().with("bond_order", arr1(&[-tag, -tag - 1.0]).into_dyn());
        MolecularGraph::new(
            vec![Atom::new(8, 0), Atom::new(1, 0), Atom::new(1, 0)],
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(0, 2, BondOrder::Single),
            ],
        )
        .with_node_data(
            FeatureTable::new()
                .with("zeta", arr1(&[tag, 1.0, 2.0]).into_dyn())
                .with("alpha", arr1(&[0.0f32, 0.0, 0.0]).into_dyn()),
        )
        .with_graph_data(FeatureTable::new().with("mass", arr1(&[18.0]).into_dyn()))
        .with_edge_data(EdgeData::Directed(
            DirectedEdgeData::new()
                .with(FORWARD, forward)
                .with(REVERSE, reverse),
        ))
    }

    #[test]
    fn json_graph_set_round_trips() {
        let graphs = vec![water(1.0), water(2.0)];
        let mut buffer = Vec::new();
        write_graphs(&mut buffer, Format::Json, &graphs, true).unwrap();

        let back = read_graphs(buffer.as_slice(), Format::Json).unwrap();
        assert_eq!(back, graphs);
    }

    #[test]
    fn json_keeps_feature_order_and_edge_layout() {
        let mut buffer = Vec::new();
        write_graphs(&mut buffer, Format::Json, &[water(1.0)], false).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.find("\"zeta\"").unwrap() < text.find("\"alpha\"").unwrap());
        assert!(text.contains("\"layout\":\"directed\""));

        let back = read_graphs(buffer.as_slice(), Format::Json).unwrap();
        let names: Vec<&str> = back[0].node_data.as_ref().unwrap().names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn toml_batch_document_round_trips() {
        let batched = batch_with(&[water(1.0), water(2.0)], &BatchConfig::default()).unwrap();
        let document = BatchDocument::from(batched);

        let mut buffer = Vec::new();
        write_batch(&mut buffer, Format::Toml, &document, true).unwrap();
        let back = read_batch(buffer.as_slice(), Format::Toml).unwrap();

        assert_eq!(back, document);
        assert_eq!(back.layout.unwrap().node_counts(), vec![3, 3]);
    }

    #[test]
    fn batch_document_without_layout_is_accepted() {
        let json = serde_json::json!({ "graph": { "atoms": [], "bonds": [] } });
        let document = read_batch(json.to_string().as_bytes(), Format::Json).unwrap();
        assert!(document.layout.is_none());
        assert_eq!(document.graph.node_count(), 0);
    }

    #[test]
    fn non_finite_features_are_rejected_for_json() {
        let mut second = water(2.0);
        second
            .node_data
            .as_mut()
            .unwrap()
            .insert("zeta", arr1(&[f32::NAN, 1.0, 2.0]).into_dyn());
        let graphs = vec![water(1.0), second];

        let mut buffer = Vec::new();
        let err = write_graphs(&mut buffer, Format::Json, &graphs, false).unwrap_err();
        match err {
            Error::NonFiniteFeature {
                graph,
                table,
                feature,
            } => {
                assert_eq!(graph, 1);
                assert_eq!(table, "node_data");
                assert_eq!(feature, "zeta");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn infinite_edge_feature_is_named_by_direction() {
        let batched = batch_with(&[water(1.0), water(2.0)], &BatchConfig::default()).unwrap();
        let mut document = BatchDocument::from(batched);
        if let Some(EdgeData::Directed(dirs)) = document.graph.edge_data.as_mut() {
            dirs.get_mut(REVERSE)
                .unwrap()
                .insert("bond_order", arr1(&[0.0f32, f32::INFINITY, 0.0, 0.0]).into_dyn());
        }

        let err = write_batch(Vec::new(), Format::Json, &document, true).unwrap_err();
        assert!(matches!(
            err,
            Error::NonFiniteFeature { graph: 0, ref table, .. } if table == "edge_data[reverse]"
        ));
    }

    #[test]
    fn toml_keeps_nan_features() {
        let mut graph = water(1.0);
        graph
            .graph_data
            .as_mut()
            .unwrap()
            .insert("mass", arr1(&[f32::NAN]).into_dyn());

        let mut buffer = Vec::new();
        write_graphs(&mut buffer, Format::Toml, &[graph], true).unwrap();
        let back = read_graphs(buffer.as_slice(), Format::Toml).unwrap();
        let mass = back[0].graph_data.as_ref().unwrap().get("mass").unwrap();
        assert!(mass[[0]].is_nan());
    }

    #[test]
    fn reversed_bonds_are_normalized_on_read() {
        let json = serde_json::json!({
            "graphs": [{
                "atoms": [{ "atomic_number": 6 }, { "atomic_number": 8 }],
                "bonds": [{ "i": 1, "j": 0, "order": "double" }]
            }]
        });
        let graphs = read_graphs(json.to_string().as_bytes(), Format::Json).unwrap();
        assert_eq!(graphs[0].bonds, vec![Bond::new(0, 1, BondOrder::Double)]);
    }

    #[test]
    fn malformed_json_reports_json_error() {
        let err = read_graphs("{ \"graphs\": [".as_bytes(), Format::Json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn non_contiguous_layout_is_rejected_on_read() {
        let json = serde_json::json!({
            "graph": { "atoms": [], "bonds": [] },
            "layout": [
                { "nodes": { "start": 1, "end": 2 },
                  "edges": { "start": 0, "end": 0 },
                  "graphs": { "start": 0, "end": 1 } }
            ]
        });
        let err = read_batch(json.to_string().as_bytes(), Format::Json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
