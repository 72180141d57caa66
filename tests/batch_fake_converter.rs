//! End-to-end batch tests against a scripted stand-in for FBX2glTF
//!
//! These run the real [`BatchConverter`] and [`CliConverterRunner`] path: process
//! spawning, output streaming and exit status handling. The fake converter is a
//! POSIX shell script, so the tests are Unix-only.

#![cfg(unix)]
// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{drain_events, fake_batch_converter, log_lines, recorded_args, touch_inputs};
use fbx2gltf_batch::{
    BatchConverter, BatchRequest, Config, ConversionOptions, DracoBits, DracoOptions, Event,
    MaterialMode, discovery,
};
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_binary_batch_writes_glb_files() {
    let inputs_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let inputs = touch_inputs(inputs_dir.path(), &["ship.fbx", "crate.fbx"]);

    let converter = fake_batch_converter(None);
    let summary = converter
        .run_batch(
            BatchRequest::new(inputs.clone())
                .output_dir(out_dir.path())
                .options(ConversionOptions {
                    binary: true,
                    ..Default::default()
                }),
        )
        .await;

    assert!(summary.ok, "{summary:?}");
    assert_eq!((summary.converted, summary.total), (2, 2));
    for result in &summary.results {
        assert!(result.output_path.exists(), "{:?}", result.output_path);
        assert_eq!(result.output_path.extension().unwrap(), "glb");
    }
    assert_eq!(summary.results[0].output_name, "ship.glb");
    assert_eq!(summary.results[1].output_name, "crate.glb");

    assert_eq!(
        recorded_args(&out_dir.path().join("ship")),
        vec![
            "--input".to_string(),
            inputs[0].display().to_string(),
            "--output".to_string(),
            out_dir.path().join("ship").display().to_string(),
            "--binary".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failing_file_does_not_stop_the_batch() {
    let inputs_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let inputs = touch_inputs(inputs_dir.path(), &["a.fbx", "broken.fbx", "c.fbx"]);

    let converter = fake_batch_converter(None);
    let mut rx = converter.subscribe();
    let summary = converter
        .run_batch(BatchRequest::new(inputs).output_dir(out_dir.path()))
        .await;

    assert!(!summary.ok);
    assert_eq!((summary.converted, summary.total), (2, 3));
    let oks: Vec<bool> = summary.results.iter().map(|r| r.ok).collect();
    assert_eq!(oks, vec![true, false, true]);
    assert!(!out_dir.path().join("broken.gltf").exists());
    assert!(out_dir.path().join("c.gltf").exists());

    let lines = log_lines(&drain_events(&mut rx));
    assert!(lines.contains(&"Failed: broken.fbx (exit 3)".to_string()), "{lines:?}");
    assert!(lines.contains(&"Done: c.fbx (exit 0)".to_string()), "{lines:?}");
}

#[tokio::test]
async fn test_converter_output_is_streamed_between_markers() {
    let inputs_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let inputs = touch_inputs(inputs_dir.path(), &["model.fbx"]);

    let converter = fake_batch_converter(None);
    let mut rx = converter.subscribe();
    let summary = converter
        .run_batch(BatchRequest::new(inputs.clone()).output_dir(out_dir.path()))
        .await;

    let events = drain_events(&mut rx);
    let lines = log_lines(&events);
    assert_eq!(lines.len(), 4, "{lines:?}");
    assert!(lines[0].starts_with("Running: FBX2glTF --input "), "{lines:?}");
    let mut middle = lines[1..3].to_vec();
    middle.sort();
    assert_eq!(
        middle,
        vec![
            format!("Loading {}", inputs[0].display()),
            "warning: fake converter".to_string(),
        ]
    );
    assert_eq!(lines[3], "Done: model.fbx (exit 0)");
    assert_eq!(events.last(), Some(&Event::Finished { summary }));
}

#[tokio::test]
async fn test_default_output_dir_is_used_and_announced() {
    let inputs_dir = TempDir::new().unwrap();
    let default_dir = TempDir::new().unwrap();
    let inputs = touch_inputs(inputs_dir.path(), &["a.fbx", "b.fbx"]);

    let converter = fake_batch_converter(Some(default_dir.path().to_path_buf()));
    let mut rx = converter.subscribe();
    let summary = converter
        .run_batch(BatchRequest::new(inputs).output_dir("   "))
        .await;

    assert!(summary.ok);
    assert!(default_dir.path().join("a.gltf").exists());
    assert!(default_dir.path().join("b.gltf").exists());

    let lines = log_lines(&drain_events(&mut rx));
    let notices = lines
        .iter()
        .filter(|l| l.starts_with("No output directory selected"))
        .count();
    assert_eq!(notices, 1, "{lines:?}");
    assert_eq!(
        lines[0],
        format!(
            "No output directory selected, using default directory: {}",
            default_dir.path().display()
        )
    );
}

#[tokio::test]
async fn test_full_option_set_reaches_the_converter() {
    let inputs_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let inputs = touch_inputs(inputs_dir.path(), &["rig.fbx"]);

    let options = ConversionOptions {
        embed: true,
        material: Some(MaterialMode::Unlit),
        flip_v: Some(false),
        user_properties: true,
        draco: true,
        draco_options: DracoOptions {
            compression_level: Some(7),
            bits: DracoBits {
                position: Some(14),
                normals: Some(10),
                ..Default::default()
            },
        },
        keep_attributes: vec!["position".into(), "uv0".into()],
        ..Default::default()
    };

    let converter = fake_batch_converter(None);
    let summary = converter
        .run_batch(
            BatchRequest::new(inputs)
                .output_dir(out_dir.path())
                .options(options),
        )
        .await;
    assert!(summary.ok);

    let args = recorded_args(&out_dir.path().join("rig"));
    assert_eq!(
        args[4..],
        [
            "--embed",
            "--khr-materials-unlit",
            "--no-flip-v",
            "--user-properties",
            "--draco",
            "--draco-compression-level",
            "7",
            "--draco-bits-for-position",
            "14",
            "--draco-bits-for-normals",
            "10",
            "--keep-attribute",
            "position",
            "--keep-attribute",
            "uv0",
        ]
    );
}

#[tokio::test]
async fn test_paths_with_spaces_are_passed_as_single_arguments() {
    let inputs_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("Exported Models");
    std::fs::create_dir(&out).unwrap();
    let inputs = touch_inputs(inputs_dir.path(), &["space ship.fbx"]);

    let converter = fake_batch_converter(None);
    let summary = converter
        .run_batch(BatchRequest::new(inputs).output_dir(&out))
        .await;

    assert!(summary.ok);
    assert_eq!(summary.results[0].output_path, out.join("space ship.gltf"));
    assert!(out.join("space ship.gltf").exists());
}

#[tokio::test]
async fn test_missing_converter_fails_every_file() {
    let out_dir = TempDir::new().unwrap();
    let config = Config {
        converter_path: Some(PathBuf::from("/nonexistent/FBX2glTF")),
        search_path: false,
        ..Default::default()
    };
    let converter = BatchConverter::new(config).unwrap();
    let mut rx = converter.subscribe();

    let summary = converter
        .run_batch(BatchRequest::new(["a.fbx", "b.fbx"]).output_dir(out_dir.path()))
        .await;

    assert!(!summary.ok);
    assert_eq!((summary.converted, summary.total), (0, 2));

    let lines = log_lines(&drain_events(&mut rx));
    assert_eq!(lines.iter().filter(|l| l.starts_with("Error: ")).count(), 2);
    assert!(lines.contains(&"Failed: a.fbx (no exit code)".to_string()));
    assert!(lines.contains(&"Failed: b.fbx (no exit code)".to_string()));
}

#[tokio::test]
async fn test_discovered_directory_converts_in_sorted_order() {
    let inputs_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    touch_inputs(inputs_dir.path(), &["b.fbx", "a.fbx", "readme.txt"]);

    let inputs = discovery::collect_input_files(&[inputs_dir.path()], false).unwrap();
    let converter = fake_batch_converter(None);
    let summary = converter
        .run_batch(BatchRequest::new(inputs).output_dir(out_dir.path()))
        .await;

    let names: Vec<&str> = summary
        .results
        .iter()
        .map(|r| r.output_name.as_str())
        .collect();
    assert_eq!(names, vec!["a.gltf", "b.gltf"]);
    assert!(summary.ok);
}
