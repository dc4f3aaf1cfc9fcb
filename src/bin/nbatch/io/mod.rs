mod resolve;

pub use resolve::{input_format, output_format};

use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::IoOptions;

/// Archives are never read from or written to an interactive terminal.
pub fn ensure_piped(io: &IoOptions, usage: &str) -> Result<()> {
    if io.input.is_none() && io::stdin().is_terminal() {
        bail!("No input archive specified and stdin is a terminal.\n\nUsage: {usage}");
    }
    if io.output.is_none() && io::stdout().is_terminal() {
        bail!("No output archive specified and stdout is a terminal.\n\nUsage: {usage}");
    }
    Ok(())
}

/// The archive at `path`, or stdin.
pub fn reader(path: Option<&Path>) -> Result<Box<dyn Read>> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdin().lock()));
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open input archive: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// A buffered sink for `path`, or stdout.
pub fn writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output archive: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// File name shown in progress lines; `stream` when reading stdin or writing stdout.
pub fn label(path: Option<&Path>, stream: &str) -> String {
    path.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| stream.to_string())
}
