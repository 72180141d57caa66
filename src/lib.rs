//! # fbx2gltf-batch
//!
//! Batch driver for the FBX2glTF converter.
//!
//! The crate turns a list of `.fbx` files, an output directory and one set of
//! conversion options into a sequence of FBX2glTF invocations. Files are converted
//! one at a time, converter output is streamed as events while it runs, and the
//! run ends with a summary of which files converted.
//!
//! ## Design Philosophy
//!
//! - **Never fails mid-batch** - launch errors and nonzero exits become failed
//!   results; the remaining files are still converted
//! - **Permissive options** - malformed option values are dropped, FBX2glTF's own
//!   argument parser is the validator
//! - **Event-driven** - hosts subscribe to log lines and the final summary
//!
//! ## Quick Start
//!
//! ```no_run
//! use fbx2gltf_batch::{BatchConverter, BatchRequest, Config, ConversionOptions, Event};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = BatchConverter::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = converter.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let options = ConversionOptions { binary: true, ..Default::default() };
//!     let request = BatchRequest::new(["scene.fbx", "props.fbx"])
//!         .output_dir("exports")
//!         .options(options);
//!
//!     let summary = converter.run_batch(request).await;
//!     println!("{}/{} converted", summary.converted, summary.total);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// FBX2glTF argument construction
pub mod args;
/// Configuration types
pub mod config;
/// Batch orchestration
pub mod converter;
/// Input file discovery
pub mod discovery;
/// Error types
pub mod error;
/// Conversion options
pub mod options;
/// External converter execution
pub mod runner;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use converter::BatchConverter;
pub use error::{Error, Result};
pub use options::{
    AnimFramerate, ComputeNormals, ConversionOptions, DracoBits, DracoOptions, LongIndices,
    MaterialMode,
};
pub use runner::{CliConverterRunner, ConverterRunner, RunOutcome};
pub use types::{BatchRequest, BatchSummary, ConversionRequest, ConversionResult, Event};
