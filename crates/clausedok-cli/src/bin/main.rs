//! clausedok CLI binary entry point
//!
//! Thin wrapper around the library's `run_cli()`.

use anyhow::Result;
use clausedok_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
