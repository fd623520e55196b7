//! wealthgrabber: view Wealthsimple accounts, activities and holdings.
//!
//! Each subcommand fetches one record kind through `wealthgrabber-core`,
//! renders it with the formatter picked by `--format`, and prints the result
//! in one piece. Diagnostics and prompts go to stderr.

mod args;
mod commands;
pub mod config;
pub mod error;
mod handlers;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
pub use error::{Error, Result};
