//! Common test utilities for fbx2gltf-batch integration tests

#![allow(dead_code)]

use fbx2gltf_batch::{BatchConverter, Config, Event};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;
use tokio::sync::broadcast;

/// Stand-in for FBX2glTF
///
/// Parses `--input`/`--output`/`--binary`, prints one line on each stream, writes
/// its argument list to `<output>.args` and creates `<output>.glb|.gltf`.
/// Inputs whose name contains `broken` exit with code 3 without writing output.
const FAKE_CONVERTER: &str = r#"#!/bin/sh
input=""
output=""
ext="gltf"
for arg in "$@"; do
  case "$prev" in
    --input) input="$arg" ;;
    --output) output="$arg" ;;
  esac
  [ "$arg" = "--binary" ] && ext="glb"
  prev="$arg"
done
printf '%s\n' "$@" > "$output.args"
echo "Loading $input"
echo "warning: fake converter" >&2
case "$input" in
  *broken*) echo "error: cannot parse $input" >&2; exit 3 ;;
esac
: > "$output.$ext"
exit 0
"#;

/// Path to the fake converter script, written once per test binary
///
/// Writing the script once keeps it from being executed while another test
/// still holds it open for writing.
pub fn fake_converter() -> &'static Path {
    static SCRIPT: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_dir, path) = SCRIPT.get_or_init(|| {
        let dir = tempfile::tempdir().expect("create script dir");
        let path = dir.path().join("FBX2glTF");
        fs::write(&path, FAKE_CONVERTER).expect("write fake converter");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("make fake converter executable");
        (dir, path)
    });
    path
}

/// Converter wired to the fake script
pub fn fake_batch_converter(default_output_dir: Option<PathBuf>) -> BatchConverter {
    let config = Config {
        converter_path: Some(fake_converter().to_path_buf()),
        search_path: false,
        default_output_dir,
        ..Default::default()
    };
    BatchConverter::new(config).expect("create converter")
}

/// Create empty input files named `names` inside `dir`
pub fn touch_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, b"").expect("create input");
            path
        })
        .collect()
}

/// Arguments the fake converter received for the output base `base`
pub fn recorded_args(base: &Path) -> Vec<String> {
    let mut file = base.as_os_str().to_owned();
    file.push(".args");
    fs::read_to_string(PathBuf::from(file))
        .expect("read recorded args")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Collect every event currently buffered for `rx`
pub fn drain_events(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Only the log lines of `events`
pub fn log_lines(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Log { line } => Some(line.clone()),
            Event::Finished { .. } => None,
        })
        .collect()
}
