//! Command-line host for fbx2gltf-batch
//!
//! Collects input files, builds the option record from flags (optionally on top of
//! a JSON options file), runs the batch and prints converter output as it arrives.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use fbx2gltf_batch::{
    AnimFramerate, BatchConverter, BatchRequest, BatchSummary, ComputeNormals, Config,
    ConversionOptions, ConversionResult, Event, LongIndices, MaterialMode, discovery,
};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fbx2gltf-batch",
    version,
    about = "Convert FBX files to glTF/GLB with FBX2glTF, one file at a time"
)]
struct Cli {
    /// Input .fbx files or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Search input directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Output directory (default: directory of this executable)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to the FBX2glTF executable
    #[arg(long)]
    converter: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with conversion options; flags below override it
    #[arg(long = "options")]
    options_file: Option<PathBuf>,

    /// Write binary .glb files
    #[arg(long, conflicts_with = "gltf")]
    binary: bool,

    /// Write .gltf files with separate resources
    #[arg(long)]
    gltf: bool,

    /// Embed resources in .gltf output
    #[arg(long)]
    embed: bool,

    /// Ask FBX2glTF for verbose output
    #[arg(long)]
    verbose: bool,

    /// Material model
    #[arg(long, value_enum)]
    material: Option<MaterialArg>,

    /// Flip the U texture coordinate
    #[arg(long, conflicts_with = "no_flip_u")]
    flip_u: bool,

    /// Do not flip the U texture coordinate
    #[arg(long)]
    no_flip_u: bool,

    /// Flip the V texture coordinate
    #[arg(long, conflicts_with = "no_flip_v")]
    flip_v: bool,

    /// Do not flip the V texture coordinate
    #[arg(long)]
    no_flip_v: bool,

    /// When to use 32-bit indices
    #[arg(long, value_enum)]
    long_indices: Option<LongIndicesArg>,

    /// When to recompute normals
    #[arg(long, value_enum)]
    compute_normals: Option<ComputeNormalsArg>,

    /// Animation baking frame rate
    #[arg(long, value_enum)]
    anim_framerate: Option<AnimFramerateArg>,

    /// Export FBX user properties as glTF extras
    #[arg(long)]
    user_properties: bool,

    /// Enable Draco mesh compression
    #[arg(long)]
    draco: bool,

    /// Draco compression level
    #[arg(long)]
    draco_compression_level: Option<i64>,

    /// Draco bits for positions
    #[arg(long)]
    draco_bits_position: Option<i64>,

    /// Draco bits for texture coordinates
    #[arg(long)]
    draco_bits_uv: Option<i64>,

    /// Draco bits for normals
    #[arg(long)]
    draco_bits_normals: Option<i64>,

    /// Draco bits for vertex colors
    #[arg(long)]
    draco_bits_colors: Option<i64>,

    /// Draco bits for other attributes
    #[arg(long)]
    draco_bits_other: Option<i64>,

    /// Vertex attribute to keep (repeatable)
    #[arg(long = "keep-attribute", action = ArgAction::Append)]
    keep_attributes: Vec<String>,

    /// Scratch directory for FBX unpacking
    #[arg(long)]
    fbx_temp_dir: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr (converter verbosity is --verbose)
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MaterialArg {
    Pbr,
    Unlit,
}

#[derive(Clone, Copy, ValueEnum)]
enum LongIndicesArg {
    Never,
    Auto,
    Always,
}

#[derive(Clone, Copy, ValueEnum)]
enum ComputeNormalsArg {
    Never,
    Broken,
    Missing,
    Always,
}

#[derive(Clone, Copy, ValueEnum)]
enum AnimFramerateArg {
    Bake24,
    Bake30,
    Bake60,
}

impl From<MaterialArg> for MaterialMode {
    fn from(arg: MaterialArg) -> Self {
        match arg {
            MaterialArg::Pbr => MaterialMode::Pbr,
            MaterialArg::Unlit => MaterialMode::Unlit,
        }
    }
}

impl From<LongIndicesArg> for LongIndices {
    fn from(arg: LongIndicesArg) -> Self {
        match arg {
            LongIndicesArg::Never => LongIndices::Never,
            LongIndicesArg::Auto => LongIndices::Auto,
            LongIndicesArg::Always => LongIndices::Always,
        }
    }
}

impl From<ComputeNormalsArg> for ComputeNormals {
    fn from(arg: ComputeNormalsArg) -> Self {
        match arg {
            ComputeNormalsArg::Never => ComputeNormals::Never,
            ComputeNormalsArg::Broken => ComputeNormals::Broken,
            ComputeNormalsArg::Missing => ComputeNormals::Missing,
            ComputeNormalsArg::Always => ComputeNormals::Always,
        }
    }
}

impl From<AnimFramerateArg> for AnimFramerate {
    fn from(arg: AnimFramerateArg) -> Self {
        match arg {
            AnimFramerateArg::Bake24 => AnimFramerate::Bake24,
            AnimFramerateArg::Bake30 => AnimFramerate::Bake30,
            AnimFramerateArg::Bake60 => AnimFramerate::Bake60,
        }
    }
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("loading config {:?}", path))?,
            None => Config::default(),
        };
        if let Some(converter) = &self.converter {
            config.converter_path = Some(converter.clone());
        }
        Ok(config)
    }

    fn options(&self) -> Result<ConversionOptions> {
        let mut options = match &self.options_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading options {:?}", path))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing options {:?}", path))?
            }
            None => ConversionOptions::default(),
        };

        if self.binary {
            options.binary = true;
        }
        if self.gltf {
            options.binary = false;
        }
        options.embed |= self.embed;
        options.verbose |= self.verbose;
        if let Some(material) = self.material {
            options.material = Some(material.into());
        }
        if self.flip_u || self.no_flip_u {
            options.flip_u = Some(self.flip_u);
        }
        if self.flip_v || self.no_flip_v {
            options.flip_v = Some(self.flip_v);
        }
        if let Some(value) = self.long_indices {
            options.long_indices = Some(value.into());
        }
        if let Some(value) = self.compute_normals {
            options.compute_normals = Some(value.into());
        }
        if let Some(value) = self.anim_framerate {
            options.anim_framerate = Some(value.into());
        }
        options.user_properties |= self.user_properties;

        options.draco |= self.draco;
        let draco = &mut options.draco_options;
        draco.compression_level = self.draco_compression_level.or(draco.compression_level);
        draco.bits.position = self.draco_bits_position.or(draco.bits.position);
        draco.bits.uv = self.draco_bits_uv.or(draco.bits.uv);
        draco.bits.normals = self.draco_bits_normals.or(draco.bits.normals);
        draco.bits.colors = self.draco_bits_colors.or(draco.bits.colors);
        draco.bits.other = self.draco_bits_other.or(draco.bits.other);

        if !self.keep_attributes.is_empty() {
            options.keep_attributes = self.keep_attributes.clone();
        }
        if let Some(dir) = &self.fbx_temp_dir {
            options.fbx_temp_dir = Some(dir.clone());
        }

        Ok(options)
    }
}

#[tokio::main]
async fn main() {
    let outcome = run(Cli::parse()).await;
    if let Err(err) = &outcome {
        eprintln!("Error: {err:#}");
    }
    let code = exit_code(&outcome);
    if code != 0 {
        process::exit(code);
    }
}

/// 0 when every file converted, 1 when any failed, 2 when the batch never ran
fn exit_code(outcome: &Result<BatchSummary>) -> i32 {
    match outcome {
        Ok(summary) if summary.ok => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

/// Result shown after the summary: the first success, else the first file
fn featured_result(summary: &BatchSummary) -> Option<&ConversionResult> {
    summary
        .results
        .iter()
        .find(|r| r.ok)
        .or_else(|| summary.results.first())
}

async fn run(cli: Cli) -> Result<BatchSummary> {
    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config()?;
    let options = cli.options()?;
    let input_files = discovery::collect_input_files(&cli.inputs, cli.recursive)
        .context("collecting input files")?;

    let converter = BatchConverter::new(config).context("initializing converter")?;

    let mut events = converter.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(Event::Log { line }) => println!("{line}"),
                Ok(Event::Finished { .. }) => break,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "log display fell behind, lines dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut request = BatchRequest::new(input_files).options(options);
    request.output_dir = cli.output_dir.clone();

    let summary = converter.run_batch(request).await;
    printer.await.context("log printer task")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Summary: {}/{} succeeded.",
            summary.converted, summary.total
        );
        if let Some(result) = featured_result(&summary) {
            println!("Output: {}", result.output_path.display());
        }
    }

    Ok(summary)
}
