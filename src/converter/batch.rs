//! Sequential batch execution and result aggregation.

use super::{BatchConverter, locate};
use crate::args::format_command;
use crate::options::ConversionOptions;
use crate::types::{BatchRequest, BatchSummary, ConversionRequest, ConversionResult, Event};
use std::path::PathBuf;
use tracing::{info, warn};

impl BatchConverter {
    /// Convert every file in `request`, one after another
    ///
    /// Each file is converted even if earlier ones failed. Progress is published
    /// as [`Event::Log`] lines and the run always ends with one
    /// [`Event::Finished`] carrying the returned summary.
    ///
    /// This never returns an error: launch failures and nonzero exits are
    /// recorded as failed [`ConversionResult`]s. An empty request yields an
    /// unsuccessful summary without invoking the converter.
    pub async fn run_batch(&self, request: BatchRequest) -> BatchSummary {
        if request.input_files.is_empty() {
            info!("batch requested without input files");
            self.log("No input files selected.");
            return self.finish(BatchSummary::empty());
        }

        let output_dir = self.resolve_output_dir(&request);
        let program = self
            .runner
            .program()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.runner.program().display().to_string());

        info!(
            files = request.input_files.len(),
            output_dir = ?output_dir,
            "starting batch"
        );

        let mut results = Vec::with_capacity(request.input_files.len());
        for input in &request.input_files {
            let conversion = ConversionRequest::new(input.clone(), output_dir.clone());
            let result = self
                .convert_one(&conversion, &request.options, &program)
                .await;
            results.push(result);
        }

        let summary = BatchSummary::from_results(results);
        info!(
            converted = summary.converted,
            total = summary.total,
            "batch finished"
        );
        self.finish(summary)
    }

    fn resolve_output_dir(&self, request: &BatchRequest) -> PathBuf {
        if let Some(dir) = request.chosen_output_dir() {
            return dir.to_path_buf();
        }

        let dir = locate::default_output_dir(&self.config);
        info!(output_dir = ?dir, "no output directory selected, using default");
        self.log(format!(
            "No output directory selected, using default directory: {}",
            dir.display()
        ));
        dir
    }

    async fn convert_one(
        &self,
        conversion: &ConversionRequest,
        options: &ConversionOptions,
        program: &str,
    ) -> ConversionResult {
        let args = conversion.args(options);
        self.log(format!("Running: {}", format_command(program, &args)));

        let outcome = self.runner.run(&args, &self.event_tx).await;
        let result = conversion.result(options.binary, outcome.success());

        let input_name = conversion
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| conversion.input.display().to_string());

        match outcome.exit_code {
            Some(0) => {
                info!(input = ?conversion.input, output = ?result.output_path, "conversion finished");
                self.log(format!("Done: {} (exit 0)", input_name));
            }
            Some(code) => {
                warn!(input = ?conversion.input, exit_code = code, "conversion failed");
                self.log(format!("Failed: {} (exit {})", input_name, code));
            }
            None => {
                warn!(input = ?conversion.input, "conversion failed without exit code");
                self.log(format!("Failed: {} (no exit code)", input_name));
            }
        }

        result
    }

    fn finish(&self, summary: BatchSummary) -> BatchSummary {
        self.event_tx
            .send(Event::Finished {
                summary: summary.clone(),
            })
            .ok();
        summary
    }
}
