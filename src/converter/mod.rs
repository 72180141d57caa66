//! Batch conversion: the orchestrator that drives FBX2glTF over a list of files.
//!
//! The `BatchConverter` struct and its methods are organized by concern:
//! - [`locate`] - Converter executable and default output directory resolution
//! - `batch` - Sequential per-file execution and result aggregation

mod batch;
pub mod locate;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use crate::config::Config;
use crate::error::Result;
use crate::runner::{CliConverterRunner, ConverterRunner};
use crate::types::Event;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Batch converter instance (cloneable - all fields are Arc-wrapped)
///
/// Runs are strictly sequential: one converter process at a time, files in input
/// order. Progress is published as [`Event`]s to every subscriber.
#[derive(Clone)]
pub struct BatchConverter {
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Runner used for every conversion (trait object for pluggable implementations)
    pub(crate) runner: Arc<dyn ConverterRunner>,
}

impl BatchConverter {
    /// Create a converter that runs the FBX2glTF executable
    ///
    /// The executable is resolved once, here (see [`locate::resolve_converter`]).
    /// A missing executable is not an error at this point: every file of a batch
    /// will then fail with a logged launch error.
    pub fn new(config: Config) -> Result<Self> {
        let program = locate::resolve_converter(&config);
        let runner: Arc<dyn ConverterRunner> = Arc::new(CliConverterRunner::new(program));
        Self::with_runner(config, runner)
    }

    /// Create a converter with a custom runner
    pub fn with_runner(config: Config, runner: Arc<dyn ConverterRunner>) -> Result<Self> {
        config.validate()?;

        let (event_tx, _rx) = broadcast::channel(config.event_buffer_size);

        tracing::info!(
            runner = runner.name(),
            program = ?runner.program(),
            "Converter runner initialized"
        );

        Ok(Self {
            event_tx,
            config: Arc::new(config),
            runner,
        })
    }

    /// Subscribe to batch events
    ///
    /// Multiple subscribers are supported. Each subscriber receives all events
    /// emitted after it subscribed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fbx2gltf_batch::{BatchConverter, BatchRequest, Config, Event};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let converter = BatchConverter::new(Config::default())?;
    ///
    ///     let mut events = converter.subscribe();
    ///     tokio::spawn(async move {
    ///         while let Ok(event) = events.recv().await {
    ///             if let Event::Log { line } = event {
    ///                 println!("{line}");
    ///             }
    ///         }
    ///     });
    ///
    ///     let summary = converter
    ///         .run_batch(BatchRequest::new(["model.fbx"]).output_dir("/out"))
    ///         .await;
    ///     println!("{}/{} converted", summary.converted, summary.total);
    ///     Ok(())
    /// }
    /// ```
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the converter executable this instance invokes
    pub fn converter_path(&self) -> &Path {
        self.runner.program()
    }

    /// Publish a log line (ignored when nobody is subscribed)
    pub(crate) fn log(&self, line: impl Into<String>) {
        self.event_tx.send(Event::log(line)).ok();
    }
}
