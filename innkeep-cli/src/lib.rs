//! Library exports for innkeep-cli.
//!
//! The command tree is exported so integration tests and documentation
//! tooling can build it without running the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;
