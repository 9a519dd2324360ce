//! CLI commands

pub mod branches;
pub mod local;
mod output;
mod types;

pub use types::RunOptions;
