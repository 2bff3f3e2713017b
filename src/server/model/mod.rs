//! Domain models of a backup run.
//!
//! - `snapshot` - The normalized guild state that ends up in the archive
//! - `backup` - Command target, pipeline stages and the final report
//! - `progress` - The live status shown to the user while the backup runs

pub mod backup;
pub mod progress;
pub mod snapshot;
