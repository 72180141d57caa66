//! Core types for fbx2gltf-batch

use crate::args;
use crate::options::ConversionOptions;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A batch as submitted by the host: files, target directory and shared options
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Input `.fbx` files, converted in this order
    #[serde(default)]
    pub input_files: Vec<PathBuf>,

    /// Output directory; `None`, empty or blank means "use the default directory"
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Options applied to every file
    #[serde(default)]
    pub options: ConversionOptions,
}

impl BatchRequest {
    /// Create a request for `input_files` with default options and no output directory
    pub fn new(input_files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            input_files: input_files.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the conversion options
    pub fn options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// The output directory, if one was actually chosen
    ///
    /// An empty or whitespace-only path counts as unset.
    pub fn chosen_output_dir(&self) -> Option<&Path> {
        self.output_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().to_string_lossy().trim().is_empty())
    }
}

/// One file's conversion, with the output directory already resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Input `.fbx` file (existence is checked by the converter, not here)
    pub input: PathBuf,
    /// Directory the converter writes into
    pub output_dir: PathBuf,
}

impl ConversionRequest {
    /// Create a per-file request
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Converter arguments for this file
    pub fn args(&self, options: &ConversionOptions) -> Vec<OsString> {
        args::build_args(&self.input, &self.output_dir, options)
    }

    /// Path the converter writes to, derived without running anything
    pub fn output_path(&self, binary: bool) -> PathBuf {
        args::output_path(&self.input, &self.output_dir, binary)
    }

    /// Build the result record once the exit status is known
    pub fn result(&self, binary: bool, ok: bool) -> ConversionResult {
        let output_path = self.output_path(binary);
        let output_name = output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        ConversionResult {
            ok,
            output_path,
            output_name,
            input: self.input.clone(),
        }
    }
}

/// Outcome of converting a single file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    /// Whether the converter exited with code 0
    pub ok: bool,
    /// Where the output was (or would have been) written
    pub output_path: PathBuf,
    /// File name component of `output_path`
    pub output_name: String,
    /// The input file as given in the request
    pub input: PathBuf,
}

/// Aggregate outcome of a batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// True iff the batch was non-empty and every file converted
    pub ok: bool,
    /// Number of files that converted successfully
    pub converted: usize,
    /// Number of files in the batch
    pub total: usize,
    /// Per-file results in input order
    pub results: Vec<ConversionResult>,
}

impl BatchSummary {
    /// Summary for a batch that had nothing to convert
    pub fn empty() -> Self {
        Self::from_results(Vec::new())
    }

    /// Aggregate per-file results
    pub fn from_results(results: Vec<ConversionResult>) -> Self {
        let converted = results.iter().filter(|r| r.ok).count();
        let total = results.len();
        Self {
            ok: total > 0 && converted == total,
            converted,
            total,
            results,
        }
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.total.saturating_sub(self.converted)
    }
}

/// Events emitted to subscribers while a batch runs
///
/// Within a batch, events arrive in emission order and one file's events never
/// interleave with the next file's. Every batch ends with exactly one
/// [`Event::Finished`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A line for the log display (orchestrator notices and converter output)
    Log {
        /// Log text without trailing newline
        line: String,
    },

    /// The batch is complete
    Finished {
        /// Final summary
        summary: BatchSummary,
    },
}

impl Event {
    /// Shorthand for [`Event::Log`]
    pub fn log(line: impl Into<String>) -> Self {
        Event::Log { line: line.into() }
    }
}
