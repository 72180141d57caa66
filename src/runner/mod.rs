//! External converter execution
//!
//! The [`ConverterRunner`] trait is the seam between the batch orchestrator and the
//! FBX2glTF process. [`CliConverterRunner`] spawns the real executable and streams
//! its output line by line; tests plug in scripted runners instead.

mod cli;
mod traits;

pub use cli::CliConverterRunner;
pub use traits::{ConverterRunner, RunOutcome};
