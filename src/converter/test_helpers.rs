//! Shared test helpers for batch converter tests.

use crate::config::Config;
use crate::converter::BatchConverter;
use crate::runner::{ConverterRunner, RunOutcome};
use crate::types::Event;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Runner that replays scripted outcomes instead of spawning a process
///
/// Each call pops the next outcome (exit 0 once the script runs out), emits the
/// scripted output lines and records the arguments it was called with.
pub(crate) struct ScriptedRunner {
    program: PathBuf,
    outcomes: Mutex<VecDeque<RunOutcome>>,
    output: Vec<String>,
    calls: Mutex<Vec<Vec<OsString>>>,
}

impl ScriptedRunner {
    pub(crate) fn new(outcomes: impl IntoIterator<Item = RunOutcome>) -> Self {
        Self {
            program: PathBuf::from("/opt/fbx2gltf/FBX2glTF"),
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            output: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Lines printed by every scripted run
    pub(crate) fn with_output(mut self, lines: &[&str]) -> Self {
        self.output = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|args| {
                args.iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect()
            })
            .collect()
    }
}

#[async_trait]
impl ConverterRunner for ScriptedRunner {
    async fn run(&self, args: &[OsString], events: &broadcast::Sender<Event>) -> RunOutcome {
        self.calls.lock().unwrap().push(args.to_vec());
        for line in &self.output {
            events.send(Event::log(line.clone())).ok();
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RunOutcome::exited(0))
    }

    fn program(&self) -> &Path {
        &self.program
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Converter wired to `runner`, with `/default` as the fallback output directory
pub(crate) fn converter_with(runner: Arc<ScriptedRunner>) -> BatchConverter {
    let config = Config {
        default_output_dir: Some(PathBuf::from("/default")),
        ..Default::default()
    };
    BatchConverter::with_runner(config, runner).unwrap()
}

/// Collect every event currently buffered for `rx`
pub(crate) fn drain_events(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Only the log lines of `events`
pub(crate) fn log_lines(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Log { line } => Some(line.clone()),
            Event::Finished { .. } => None,
        })
        .collect()
}
