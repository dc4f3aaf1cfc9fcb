mod batch;
mod unbatch;

use batch::run_batch;
use unbatch::run_unbatch;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Batch(args) => run_batch(args, ctx),
        Command::Unbatch(args) => run_unbatch(args, ctx),
    }
}
