//! CLI-based runner using the external FBX2glTF binary

use super::traits::{ConverterRunner, RunOutcome};
use crate::types::Event;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Runner that spawns the FBX2glTF executable
///
/// The child gets no stdin. Its stdout and stderr are drained concurrently and
/// every line is sent as an [`Event::Log`] as soon as it is read. There is no
/// timeout: a converter that never exits blocks the caller.
///
/// # Examples
///
/// ```no_run
/// use fbx2gltf_batch::runner::{CliConverterRunner, ConverterRunner};
/// use std::ffi::OsString;
/// use std::path::PathBuf;
///
/// # #[tokio::main]
/// # async fn main() {
/// let runner = CliConverterRunner::new(PathBuf::from("/opt/fbx2gltf/FBX2glTF"));
/// let (events, _rx) = tokio::sync::broadcast::channel(100);
///
/// let args: Vec<OsString> = vec!["--input".into(), "model.fbx".into()];
/// let outcome = runner.run(&args, &events).await;
/// println!("exit code: {:?}", outcome.exit_code);
/// # }
/// ```
pub struct CliConverterRunner {
    program: PathBuf,
}

impl CliConverterRunner {
    /// Create a runner for the executable at `program`
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

#[async_trait]
impl ConverterRunner for CliConverterRunner {
    async fn run(&self, args: &[OsString], events: &broadcast::Sender<Event>) -> RunOutcome {
        let spawned = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!(program = ?self.program, error = %e, "failed to launch converter");
                events.send(Event::log(format!("Error: {}", e))).ok();
                return RunOutcome::no_exit_code();
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        tokio::join!(
            forward_lines(stdout, events, "stdout"),
            forward_lines(stderr, events, "stderr"),
        );

        match child.wait().await {
            Ok(status) => {
                debug!(program = ?self.program, ?status, "converter exited");
                RunOutcome {
                    exit_code: status.code(),
                }
            }
            Err(e) => {
                warn!(program = ?self.program, error = %e, "failed to wait for converter");
                events.send(Event::log(format!("Error: {}", e))).ok();
                RunOutcome::no_exit_code()
            }
        }
    }

    fn program(&self) -> &Path {
        &self.program
    }

    fn name(&self) -> &'static str {
        "cli-fbx2gltf"
    }
}

/// Send each line of `stream` as a log event until EOF
///
/// Output is decoded lossily; the converter may print paths in the local code page.
async fn forward_lines<R>(stream: Option<R>, events: &broadcast::Sender<Event>, name: &str)
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return;
    };
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                events.send(Event::log(line)).ok();
            }
            Err(e) => {
                debug!(stream = name, error = %e, "stopped reading converter output");
                break;
            }
        }
    }
}
