//! Command line shell for the panel editor.

pub mod cli;
pub mod error;
pub mod script;

pub use cli::{Cli, Commands, run};
pub use error::{CliError, Result};
