use anyhow::{Context, Result, bail};

use nagl_batch::io::{self as archive, BatchDocument};
use nagl_batch::{BatchConfig, MolecularGraph, unbatch_with, unbatch_with_layout};

use crate::cli::UnbatchArgs;
use crate::config;
use crate::display::{Context as DisplayContext, Progress, print_archive_summary, print_layout};
use crate::io::{ensure_piped, input_format, label, output_format, reader, writer};

const TOTAL_STEPS: u8 = 3;
const USAGE: &str = "nbatch unbatch -i <BATCH> -o <GRAPHS>, or pipe archives through stdin and stdout.";

pub fn run_unbatch(args: UnbatchArgs, ctx: DisplayContext) -> Result<()> {
    ensure_piped(&args.io, USAGE)?;

    let settings = config::resolve(&args.io, args.graph_rows)?;
    let in_format = input_format(&args.io)?;
    let out_format = output_format(&args.io)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading batch");
    let input = reader(args.io.input.as_deref())?;
    let document = archive::read_batch(input, in_format).context("Failed to read batch archive")?;
    progress.complete_step(
        "Reading batch",
        &[format!(
            "{} atoms, {} bonds from {} ({})",
            document.graph.node_count(),
            document.graph.edge_count(),
            label(args.io.input.as_deref(), "stdin"),
            in_format
        )],
    );

    if let (true, Some(layout)) = (ctx.interactive, &document.layout) {
        print_layout(layout);
    }

    progress.step("Unbatching graph");
    let (graphs, source) = split(&document, args.counts.as_deref(), &settings.batch)?;
    progress.complete_step(
        "Unbatching graph",
        &[format!("{} graphs by {}", graphs.len(), source)],
    );

    if ctx.interactive {
        print_archive_summary("Recovered Graphs", &graphs);
    }

    progress.step("Writing graphs");
    let output = writer(args.io.output.as_deref())?;
    archive::write_graphs(output, out_format, &graphs, settings.output.pretty)
        .context("Failed to write graph archive")?;
    progress.complete_step(
        "Writing graphs",
        &[format!(
            "Write {} → {}",
            out_format,
            label(args.io.output.as_deref(), "stdout")
        )],
    );

    progress.finish("Unbatch complete");

    Ok(())
}

/// Splits by explicit counts when given, otherwise by the stored layout.
fn split(
    document: &BatchDocument,
    counts: Option<&[usize]>,
    config: &BatchConfig,
) -> Result<(Vec<MolecularGraph>, &'static str)> {
    if let Some(counts) = counts {
        let graphs = unbatch_with(&document.graph, counts, config)
            .context("Unbatching by node counts failed")?;
        return Ok((graphs, "node counts"));
    }

    let Some(layout) = &document.layout else {
        bail!("The batch archive has no stored layout. Pass --counts to split it.");
    };
    let graphs = unbatch_with_layout(&document.graph, layout)
        .context("Unbatching by stored layout failed")?;
    Ok((graphs, "stored layout"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nagl_batch::{Atom, Bond, BondOrder, EdgeData, FeatureTable, batch_with};
    use ndarray::arr1;

    fn pair(tag: f32) -> MolecularGraph {
        MolecularGraph::new(
            vec![Atom::new(6, 0), Atom::new(8, 0)],
            vec![Bond::new(0, 1, BondOrder::Double)],
        )
        .with_node_data(FeatureTable::new().with("charge", arr1(&[tag, -tag]).into_dyn()))
        .with_graph_data(FeatureTable::new().with("mass", arr1(&[28.0f32]).into_dyn()))
        .with_edge_data(EdgeData::Flat(
            FeatureTable::new().with("order", arr1(&[2.0f32]).into_dyn()),
        ))
    }

    #[test]
    fn stored_layout_is_used_without_counts() {
        let graphs = vec![pair(1.0), pair(2.0)];
        let document =
            BatchDocument::from(batch_with(&graphs, &BatchConfig::default()).unwrap());

        let (back, source) = split(&document, None, &BatchConfig::default()).unwrap();
        assert_eq!(back, graphs);
        assert_eq!(source, "stored layout");
    }

    #[test]
    fn counts_override_the_layout() {
        let graphs = vec![pair(1.0), pair(2.0)];
        let mut document =
            BatchDocument::from(batch_with(&graphs, &BatchConfig::default()).unwrap());
        document.layout = None;

        let (back, source) = split(&document, Some(&[2, 2][..]), &BatchConfig::default()).unwrap();
        assert_eq!(back, graphs);
        assert_eq!(source, "node counts");

        assert!(split(&document, None, &BatchConfig::default()).is_err());
    }
}
