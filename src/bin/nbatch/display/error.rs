use std::io::{self, Write};

use anyhow::Error;

use nagl_batch::BatchError;
use nagl_batch::io::Error as ArchiveError;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// Hints for the most specific error type found in the chain.
fn hints_for(err: &Error) -> Vec<String> {
    if let Some(batch_err) = err.chain().find_map(|e| e.downcast_ref::<BatchError>()) {
        return batch_hints(batch_err);
    }
    if let Some(archive_err) = err.chain().find_map(|e| e.downcast_ref::<ArchiveError>()) {
        return archive_hints(archive_err);
    }
    if let Some(io_err) = err.chain().find_map(|e| e.downcast_ref::<io::Error>()) {
        return std_io_hints(io_err);
    }
    fallback_hints(err)
}

fn batch_hints(err: &BatchError) -> Vec<String> {
    let mut hints = Vec::new();
    if let Some(index) = err.graph_index() {
        hints.push(format!("Inspect graph {index} of the input archive"));
    }

    match err {
        BatchError::EmptyInput => {
            hints.push("The input archive contains no graphs".into());
        }
        BatchError::MalformedGraph { table, .. } => {
            hints.push(format!("Every graph needs a {table} table, even an empty one"));
        }
        BatchError::InvalidBond { .. } => {
            hints.push("Bond indices are local to each graph and start at 0".into());
        }
        BatchError::MissingFeature { .. } | BatchError::UnexpectedFeature { .. } => {
            hints.push("All graphs must carry the same feature names as graph 0".into());
        }
        BatchError::EdgeLayoutMismatch { .. }
        | BatchError::MissingDirection { .. }
        | BatchError::UnexpectedDirection { .. } => {
            hints.push("Edge data must be all flat or all direction-keyed".into());
            hints.push("Direction-keyed graphs must share the same direction labels".into());
        }
        BatchError::ScalarFeature { .. } | BatchError::IncompatibleShape { .. } => {
            hints.push("Features need a leading entity axis of matching trailing shape".into());
        }
        BatchError::EntityCountMismatch { .. } => {
            hints.push("Node features need one row per atom, edge features one per bond".into());
            hints.push("Use --graph-rows per-node if graph features are broadcast to atoms".into());
        }
        BatchError::CountMismatch { .. } | BatchError::EdgeCountMismatch { .. } => {
            hints.push("--counts must add up to the atom count of the batched graph".into());
            hints.push("Omit --counts to split by the layout stored with the batch".into());
        }
        BatchError::EdgeOutsideSegment { .. } | BatchError::NonContiguousLayout { .. } => {
            hints.push("The counts or stored layout do not match how the graph was batched".into());
        }
        BatchError::FeatureLengthMismatch { .. } => {
            hints.push("Check --graph-rows matches the setting used when batching".into());
        }
        BatchError::BucketLengthMismatch { .. }
        | BatchError::UnorderedKey { .. }
        | BatchError::Shape(_) => {}
    }
    hints
}

fn archive_hints(err: &ArchiveError) -> Vec<String> {
    match err {
        ArchiveError::Io { source } => std_io_hints(source),
        ArchiveError::Json(_) | ArchiveError::TomlDe(_) => vec![
            "The archive could not be decoded".into(),
            "Use --infmt if the file extension does not match its contents".into(),
        ],
        ArchiveError::TomlSer(_) => vec![
            "TOML cannot represent this document; try --outfmt json".into(),
        ],
        ArchiveError::NonFiniteFeature { graph, .. } => vec![
            format!("Inspect graph {graph} for NaN or infinite features"),
            "JSON cannot store NaN or infinity; use --outfmt toml".into(),
        ],
        ArchiveError::UnknownFormat(_) => vec![
            "Supported archive formats: json, toml".into(),
            "Use --infmt/--outfmt to name the format explicitly".into(),
        ],
    }
}

fn std_io_hints(err: &io::Error) -> Vec<String> {
    use io::ErrorKind;

    let hints: &[&str] = match err.kind() {
        ErrorKind::NotFound => &["Check the path spelling and ensure the file exists"],
        ErrorKind::PermissionDenied => &["Ensure you have read/write access as needed"],
        ErrorKind::BrokenPipe => &["Output consumer terminated early"],
        ErrorKind::UnexpectedEof => &["The file may be truncated or incomplete"],
        _ => &["Check file path, permissions, and disk space"],
    };
    hints.iter().map(|h| h.to_string()).collect()
}

fn fallback_hints(err: &Error) -> Vec<String> {
    let text = err.to_string().to_lowercase();
    if text.contains("stdin") || text.contains("terminal") {
        vec!["Provide input via -i/--input or pipe an archive to stdin".into()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn batch_errors_are_found_behind_context() {
        let err = Err::<(), _>(BatchError::CountMismatch {
            expected: 6,
            actual: 5,
        })
        .context("Unbatching failed")
        .unwrap_err();

        let hints = hints_for(&err);
        assert!(hints.iter().any(|h| h.contains("--counts")));
    }

    #[test]
    fn graph_index_is_mentioned() {
        let err = Error::from(BatchError::missing_feature(2, "node_data", "charge"));
        let hints = hints_for(&err);
        assert_eq!(hints[0], "Inspect graph 2 of the input archive");
    }

    #[test]
    fn unknown_format_lists_supported_formats() {
        let err = Error::from(ArchiveError::unknown_format("graphs.sdf"));
        assert!(hints_for(&err).iter().any(|h| h.contains("json, toml")));
    }

    #[test]
    fn non_finite_json_suggests_toml() {
        let err = Err::<(), _>(ArchiveError::non_finite(1, "graph_data", "mass"))
            .context("Failed to write output archive")
            .unwrap_err();
        let hints = hints_for(&err);
        assert_eq!(hints[0], "Inspect graph 1 for NaN or infinite features");
        assert!(hints.iter().any(|h| h.contains("--outfmt toml")));
    }
}
