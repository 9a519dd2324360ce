//! wmdiff-cli library
//!
//! Exposes the argument types, logging setup and command implementations of
//! the `wmdiff` binary so they can be tested without spawning a process.

// Make commands module available for internal tests only
#[doc(hidden)]
pub mod commands;

pub mod cli;
pub mod logging;

pub use cli::{Cli, Commands, OutputFormat};

#[cfg(test)]
mod tests;
