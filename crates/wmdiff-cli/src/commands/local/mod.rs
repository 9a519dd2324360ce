//! Local module: Compare a repository reference against exported folders

mod run;

pub use run::run;
pub use run::local_snapshot;
