use anyhow::{Result, bail};

use nagl_batch::io::{self as archive, Format};

use crate::cli::IoOptions;

pub fn input_format(io: &IoOptions) -> Result<Format> {
    if let Some(fmt) = io.input_format {
        return Ok(fmt.into());
    }

    if let Some(path) = &io.input {
        return Format::from_path(path)
            .ok_or_else(|| archive::Error::unknown_format(path).into());
    }

    bail!("Reading from stdin requires --infmt");
}

/// Picks the output format; stdout defaults to JSON.
pub fn output_format(io: &IoOptions) -> Result<Format> {
    if let Some(fmt) = io.output_format {
        return Ok(fmt.into());
    }

    match &io.output {
        Some(path) => Format::from_path(path)
            .ok_or_else(|| archive::Error::unknown_format(path).into()),
        None => Ok(Format::Json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ArchiveFormat, Cli, Command};
    use clap::Parser;

    fn io_of(args: &[&str]) -> IoOptions {
        match Cli::try_parse_from(args).unwrap().command {
            Command::Batch(args) => args.io,
            Command::Unbatch(args) => args.io,
        }
    }

    #[test]
    fn formats_follow_extensions() {
        let io = io_of(&["nbatch", "batch", "-i", "in.toml", "-o", "out.JSON"]);
        assert_eq!(input_format(&io).unwrap(), Format::Toml);
        assert_eq!(output_format(&io).unwrap(), Format::Json);
    }

    #[test]
    fn explicit_formats_win() {
        let io = io_of(&[
            "nbatch", "batch", "-i", "in.dat", "--infmt", "json", "--outfmt", "toml",
        ]);
        assert!(matches!(io.input_format, Some(ArchiveFormat::Json)));
        assert_eq!(input_format(&io).unwrap(), Format::Json);
        assert_eq!(output_format(&io).unwrap(), Format::Toml);
    }

    #[test]
    fn unknown_extension_is_an_archive_error() {
        let io = io_of(&["nbatch", "unbatch", "-i", "in.sdf"]);
        let err = input_format(&io).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<archive::Error>(),
            Some(archive::Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn stdin_needs_an_explicit_format() {
        let io = io_of(&["nbatch", "batch"]);
        assert!(input_format(&io).is_err());
        assert_eq!(output_format(&io).unwrap(), Format::Json);
    }
}
