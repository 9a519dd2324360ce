//! Branches module: Compare two references of one repository

mod run;

pub use run::run;
pub use run::snapshot;
