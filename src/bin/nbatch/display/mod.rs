mod error;
mod progress;
mod tables;

pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_archive_summary, print_layout};

use std::io::IsTerminal;

/// Whether spinners and tables are drawn on stderr.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn new(quiet: bool) -> Self {
        Self {
            interactive: !quiet && std::io::stderr().is_terminal(),
        }
    }
}
