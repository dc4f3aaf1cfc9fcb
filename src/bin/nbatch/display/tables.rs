use std::io::{self, Write};

use nagl_batch::{BatchLayout, MolecularGraph};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_LAYOUT_ROWS: usize = 10;

pub fn print_archive_summary(title: &str, graphs: &[MolecularGraph]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![
        ("Graphs", graphs.len().to_string()),
        (
            "Total Atoms",
            graphs.iter().map(MolecularGraph::node_count).sum::<usize>().to_string(),
        ),
        (
            "Total Bonds",
            graphs.iter().map(MolecularGraph::edge_count).sum::<usize>().to_string(),
        ),
    ];

    if let Some(first) = graphs.first() {
        if let Some(table) = &first.node_data {
            rows.push(("Node Features", join_names(table.names())));
        }
        if let Some(table) = &first.graph_data {
            rows.push(("Graph Features", join_names(table.names())));
        }
        if let Some(edges) = &first.edge_data {
            rows.push(("Edge Layout", edges.layout().to_string()));
        }
    }

    print_kv_table(&mut out, title, &rows);
}

pub fn print_layout(layout: &BatchLayout) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let widths = [6usize, 12, 12, 12];
    let line = |left: &str, mid: &str, right: &str| {
        let cells: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{INDENT}{left}{}{right}", cells.join(mid))
    };

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate("Batch Layout", SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", line("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{INDENT}│ {:>6} │ {:>12} │ {:>12} │ {:>12} │",
        "Graph", "Atoms", "Bonds", "Graph Rows"
    );
    let _ = writeln!(out, "{}", line("├", "┼", "┤"));

    for (k, segment) in layout.segments().iter().enumerate().take(MAX_LAYOUT_ROWS) {
        let _ = writeln!(
            out,
            "{INDENT}│ {:>6} │ {:>12} │ {:>12} │ {:>12} │",
            k,
            segment.node_count(),
            segment.edge_count(),
            segment.graph_row_count()
        );
    }
    if layout.len() > MAX_LAYOUT_ROWS {
        let _ = writeln!(
            out,
            "{INDENT}│ {:^w$} │",
            format!("… {} more", layout.len() - MAX_LAYOUT_ROWS),
            w = widths.iter().sum::<usize>() + 9
        );
    }

    let _ = writeln!(out, "{}", line("└", "┴", "┘"));
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + 6);
    let k_line = "─".repeat(key_w + 2);
    let v_line = "─".repeat(val_w + 2);

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{INDENT}┌{k_line}┬{v_line}┐");
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }
    let _ = writeln!(out, "{INDENT}└{k_line}┴{v_line}┘");
}
