//! FBX2glTF command-line construction
//!
//! [`build_args`] turns one input file, the batch output directory and the shared
//! [`ConversionOptions`] into the exact token list passed to the converter. It is
//! pure: no filesystem access, same input, same tokens.
//!
//! Token order is fixed so invocations are reproducible in logs and tests:
//! input/output first, then container, verbosity, materials, UV flips, index and
//! normal policies, animation, user properties, Draco, kept attributes and the
//! temp directory.

use crate::options::{ConversionOptions, MaterialMode};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Extension FBX2glTF appends in binary container mode
pub const BINARY_EXTENSION: &str = "glb";
/// Extension FBX2glTF appends in text container mode
pub const TEXT_EXTENSION: &str = "gltf";

/// Output base for `input`: `output_dir` joined with the input's file stem
///
/// No extension is added; the converter picks one from the container mode.
pub fn output_base(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(input.file_stem().unwrap_or_default())
}

/// Full path of the file the converter writes for `input`
///
/// Derivable without running anything, so failed conversions can still report
/// where their output would have gone.
pub fn output_path(input: &Path, output_dir: &Path, binary: bool) -> PathBuf {
    let extension = if binary {
        BINARY_EXTENSION
    } else {
        TEXT_EXTENSION
    };
    let mut path = output_base(input, output_dir).into_os_string();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Build the FBX2glTF argument list for a single input file
///
/// Malformed or out-of-range option values have already been normalized to
/// `None` by [`ConversionOptions`] decoding, so every rule here is a plain
/// presence check and nothing can fail.
///
/// # Examples
///
/// ```
/// use fbx2gltf_batch::args::build_args;
/// use fbx2gltf_batch::options::ConversionOptions;
/// use std::path::Path;
///
/// let options = ConversionOptions { binary: true, ..Default::default() };
/// let args = build_args(Path::new("model.fbx"), Path::new("/out"), &options);
///
/// assert_eq!(args, ["--input", "model.fbx", "--output", "/out/model", "--binary"]);
/// ```
pub fn build_args(input: &Path, output_dir: &Path, options: &ConversionOptions) -> Vec<OsString> {
    let mut args = ArgList::default();

    args.pair("--input", input);
    args.pair("--output", output_base(input, output_dir));

    if options.binary {
        args.flag("--binary");
    } else if options.embed {
        args.flag("--embed");
    }

    if options.verbose {
        args.flag("--verbose");
    }

    match options.material {
        Some(MaterialMode::Pbr) => args.flag("--pbr-metallic-roughness"),
        Some(MaterialMode::Unlit) => args.flag("--khr-materials-unlit"),
        None => {}
    }

    match options.flip_u {
        Some(true) => args.flag("--flip-u"),
        Some(false) => args.flag("--no-flip-u"),
        None => {}
    }
    match options.flip_v {
        Some(true) => args.flag("--flip-v"),
        Some(false) => args.flag("--no-flip-v"),
        None => {}
    }

    if let Some(long_indices) = options.long_indices {
        args.pair("--long-indices", long_indices.as_str());
    }
    if let Some(compute_normals) = options.compute_normals {
        args.pair("--compute-normals", compute_normals.as_str());
    }
    if let Some(framerate) = options.anim_framerate {
        args.pair("--anim-framerate", framerate.as_str());
    }

    if options.user_properties {
        args.flag("--user-properties");
    }

    if options.draco {
        let draco = &options.draco_options;
        args.flag("--draco");
        if let Some(level) = draco.compression_level {
            args.pair("--draco-compression-level", level.to_string());
        }
        let bits = [
            ("--draco-bits-for-position", draco.bits.position),
            ("--draco-bits-for-uv", draco.bits.uv),
            ("--draco-bits-for-normals", draco.bits.normals),
            ("--draco-bits-for-colors", draco.bits.colors),
            ("--draco-bits-for-other", draco.bits.other),
        ];
        for (flag, value) in bits {
            if let Some(value) = value {
                args.pair(flag, value.to_string());
            }
        }
    }

    for attribute in &options.keep_attributes {
        args.pair("--keep-attribute", attribute);
    }

    if let Some(dir) = options.fbx_temp_dir.as_deref().filter(|d| !d.is_empty()) {
        args.pair("--fbx-temp-dir", dir);
    }

    args.0
}

/// Render an invocation for the log, quoting tokens that contain whitespace
pub fn format_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = String::from(program);
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        line.push(' ');
        if arg.chars().any(char::is_whitespace) {
            line.push('"');
            line.push_str(&arg);
            line.push('"');
        } else {
            line.push_str(&arg);
        }
    }
    line
}

#[derive(Default)]
struct ArgList(Vec<OsString>);

impl ArgList {
    fn flag(&mut self, flag: &str) {
        self.0.push(flag.into());
    }

    fn pair(&mut self, flag: &str, value: impl AsRef<OsStr>) {
        self.0.push(flag.into());
        self.0.push(value.as_ref().to_os_string());
    }
}
