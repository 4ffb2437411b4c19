//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print the results.
//! No business logic lives here.

pub mod completions;
pub mod compliance;
pub mod config;
pub mod hook;
pub mod init;
pub mod merge;
pub mod release;
