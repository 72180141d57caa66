//! Traits and types for running the external converter

use crate::types::Event;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use tokio::sync::broadcast;

/// Result of one converter invocation
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Process exit code
    ///
    /// `None` when the process never started or was terminated by a signal;
    /// both count as failure.
    pub exit_code: Option<i32>,
}

impl RunOutcome {
    /// The process ran to completion with `code`
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    /// The process could not be started, or produced no exit code
    pub fn no_exit_code() -> Self {
        Self { exit_code: None }
    }

    /// Whether the conversion succeeded (exit code 0)
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for running the converter once
///
/// Implementations must never fail: a launch error or a crash of the external
/// process is reported as a log event plus a [`RunOutcome`] without exit code.
#[async_trait]
pub trait ConverterRunner: Send + Sync {
    /// Run the converter with `args` and wait for it to exit
    ///
    /// Output is forwarded to `events` as [`Event::Log`] lines while the process
    /// runs, not after it exits.
    async fn run(&self, args: &[OsString], events: &broadcast::Sender<Event>) -> RunOutcome;

    /// Executable being invoked, used for the invocation log line
    fn program(&self) -> &Path;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
