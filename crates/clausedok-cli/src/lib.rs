//! clausedok CLI - Command-line interface library
//!
//! Commands:
//! - `placeholders`: list template placeholder names
//! - `locate`: find runs containing a piece of text
//! - `add` / `remove`: insert or take out a clause from a catalog
//! - `fill`: replace placeholders with values
//!
//! # Binary Usage
//!
//! ```bash
//! clausedok placeholders agreement.json --format json
//! clausedok add agreement.json --catalog clauses.json --clause conf -o out.json
//! clausedok remove out.json --catalog clauses.json --clause conf
//! clausedok fill agreement.json --set "client name=Ann" --set date=2026-03-01
//! ```

pub mod app;

pub use app::{
    add_command, fill_command, load_clause, load_settings, locate_command, placeholders_command,
    remove_command,
};
pub use app::{run_cli, OutputFormat};
