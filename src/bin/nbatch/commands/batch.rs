use anyhow::{Context, Result};

use nagl_batch::batch_with;
use nagl_batch::io::{self as archive, BatchDocument};

use crate::cli::BatchArgs;
use crate::config;
use crate::display::{Context as DisplayContext, Progress, print_archive_summary, print_layout};
use crate::io::{ensure_piped, input_format, label, output_format, reader, writer};

const TOTAL_STEPS: u8 = 3;
const USAGE: &str = "nbatch batch -i <GRAPHS> -o <BATCH>, or pipe archives through stdin and stdout.";

pub fn run_batch(args: BatchArgs, ctx: DisplayContext) -> Result<()> {
    ensure_piped(&args.io, USAGE)?;

    let settings = config::resolve(&args.io, args.graph_rows)?;
    let in_format = input_format(&args.io)?;
    let out_format = output_format(&args.io)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading graphs");
    let input = reader(args.io.input.as_deref())?;
    let graphs = archive::read_graphs(input, in_format).context("Failed to read graph archive")?;
    progress.complete_step(
        "Reading graphs",
        &[format!(
            "{} graphs from {} ({})",
            graphs.len(),
            label(args.io.input.as_deref(), "stdin"),
            in_format
        )],
    );

    if ctx.interactive {
        print_archive_summary("Input Graphs", &graphs);
    }

    progress.step("Batching graphs");
    let batched = batch_with(&graphs, &settings.batch).context("Batching failed")?;
    progress.complete_step(
        "Batching graphs",
        &[
            format!(
                "{} atoms, {} bonds, {} graph rows",
                batched.layout.total_nodes(),
                batched.layout.total_edges(),
                batched.layout.total_graph_rows()
            ),
            format!("Graph rows: {:?}", settings.batch.graph_rows),
        ],
    );

    if ctx.interactive {
        print_layout(&batched.layout);
    }

    progress.step("Writing batch");
    let output = writer(args.io.output.as_deref())?;
    archive::write_batch(
        output,
        out_format,
        &BatchDocument::from(batched),
        settings.output.pretty,
    )
    .context("Failed to write batch archive")?;
    progress.complete_step(
        "Writing batch",
        &[format!(
            "Write {} → {}",
            out_format,
            label(args.io.output.as_deref(), "stdout")
        )],
    );

    progress.finish("Batch complete");

    Ok(())
}
