use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nagl_batch::io::Format;

#[derive(Parser)]
#[command(
    name = "nbatch",
    about = "Batch and unbatch feature-annotated molecular graphs",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Combine a graph archive into one batched graph
    #[command(visible_alias = "b")]
    Batch(BatchArgs),

    /// Split a batched graph back into its source graphs
    #[command(visible_alias = "u")]
    Unbatch(UnbatchArgs),
}

impl Command {
    pub fn io(&self) -> &IoOptions {
        match self {
            Command::Batch(args) => &args.io,
            Command::Unbatch(args) => &args.io,
        }
    }
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Input archive (stdin if omitted, requires --infmt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output archive (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Input format (inferred from the extension by default)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<ArchiveFormat>,

    /// Output format (inferred from the extension, JSON for stdout)
    #[arg(long = "outfmt", value_name = "FORMAT")]
    pub output_format: Option<ArchiveFormat>,

    /// Write compact output instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Settings file (TOML) with [batch] and [output] sections
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// How graph-level rows relate to graphs (overrides the settings file)
    #[arg(long = "graph-rows", value_name = "POLICY")]
    pub graph_rows: Option<GraphRows>,
}

#[derive(Args)]
pub struct UnbatchArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Atoms per graph, comma separated (uses the stored layout if omitted)
    #[arg(long, value_name = "N,N,...", value_delimiter = ',')]
    pub counts: Option<Vec<usize>>,

    /// How graph-level rows relate to graphs when splitting by counts
    #[arg(long = "graph-rows", value_name = "POLICY")]
    pub graph_rows: Option<GraphRows>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ArchiveFormat {
    Json,
    Toml,
}

impl From<ArchiveFormat> for Format {
    fn from(value: ArchiveFormat) -> Self {
        match value {
            ArchiveFormat::Json => Format::Json,
            ArchiveFormat::Toml => Format::Toml,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GraphRows {
    /// One graph row per graph
    PerGraph,
    /// One graph row per atom
    PerNode,
}

impl From<GraphRows> for nagl_batch::GraphRows {
    fn from(value: GraphRows) -> Self {
        match value {
            GraphRows::PerGraph => nagl_batch::GraphRows::PerGraph,
            GraphRows::PerNode => nagl_batch::GraphRows::PerNode,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn counts_are_comma_separated() {
        let cli = Cli::try_parse_from(["nbatch", "unbatch", "-i", "b.json", "--counts", "2,3,1"])
            .unwrap();
        let Command::Unbatch(args) = cli.command else {
            panic!("expected unbatch");
        };
        assert_eq!(args.counts, Some(vec![2, 3, 1]));
        assert_eq!(args.io.input.as_deref(), Some(std::path::Path::new("b.json")));
    }

    #[test]
    fn graph_rows_flag_parses_kebab_case() {
        let cli = Cli::try_parse_from(["nbatch", "batch", "--graph-rows", "per-node", "-q"])
            .unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert!(matches!(args.graph_rows, Some(GraphRows::PerNode)));
        assert!(args.io.quiet);
    }
}
