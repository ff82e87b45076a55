use clap::{Parser, ValueEnum};
use patchscale::io::{load_rgb_image, save_rgb_image};
use patchscale::{BorderPolicy, UpscaleConfig, UpscaleError, Upscaler};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

const DEFAULT_OUTPUT: &str = "upscaled.png";

#[derive(Parser, Debug)]
#[command(author, version, about = "Self-similarity image upscaler")]
struct Cli {
    /// Input image path.
    #[arg(short = 'i', value_name = "PATH")]
    input: Option<PathBuf>,
    /// Output image path; the format follows the extension.
    #[arg(short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,
    /// Context (patch) diameter in pixels; must be odd.
    #[arg(short = 'c', value_name = "INT")]
    context_diameter: Option<usize>,
    /// Number of best candidates averaged per block.
    #[arg(long = "topK", value_name = "INT")]
    top_k: Option<usize>,
    /// Raw ring weights `w0;w1;...`, one per ring (diameter / 2 + 1 entries).
    #[arg(long = "context-weights", value_name = "W0;W1;...", value_parser = parse_weights)]
    context_weights: Option<RawWeights>,
    /// Search window half extent in full-resolution pixels.
    #[arg(long = "area-size", value_name = "INT")]
    area_size: Option<usize>,
    /// Integer upscale factor.
    #[arg(long = "scale", value_name = "INT")]
    scale: Option<usize>,
    /// Local color correction strength in [0, 1].
    #[arg(long = "colorPreservation", value_name = "FLOAT")]
    color_preservation: Option<f64>,
    /// Skip candidates whose center color differs by at least this much.
    #[arg(long = "stop", value_name = "INT")]
    stop: Option<u32>,
    /// How to fill the border band that the patch search cannot reach.
    #[arg(long, value_enum)]
    border: Option<BorderArg>,
    /// Run on the calling thread only.
    #[arg(long)]
    sequential: bool,
    /// JSON file with base settings; explicit flags override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable library tracing output (progress and timings).
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct RawWeights(Vec<u32>);

fn parse_weights(text: &str) -> Result<RawWeights, String> {
    text.split(';')
        .filter(|token| !token.trim().is_empty())
        .map(|token| {
            token
                .trim()
                .parse::<u32>()
                .map_err(|err| format!("invalid context weight {token:?}: {err}"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RawWeights)
}

#[derive(Clone, Copy, Debug, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
enum BorderArg {
    Nearest,
    None,
}

impl From<BorderArg> for BorderPolicy {
    fn from(value: BorderArg) -> Self {
        match value {
            BorderArg::Nearest => BorderPolicy::Nearest,
            BorderArg::None => BorderPolicy::Leave,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    context_diameter: Option<usize>,
    top_k: Option<usize>,
    context_weights: Option<Vec<u32>>,
    area_size: Option<usize>,
    scale: Option<usize>,
    color_preservation: Option<f64>,
    stop: Option<u32>,
    border: Option<BorderArg>,
    parallel: Option<bool>,
}

#[derive(Debug)]
struct RunPlan {
    input: PathBuf,
    output: PathBuf,
    config: UpscaleConfig,
}

fn config_error(msg: impl std::fmt::Display) -> Box<dyn Error> {
    format!("config error: {msg}").into()
}

/// Layers defaults, the optional JSON file, and explicit flags.
fn resolve(cli: Cli, file: FileConfig) -> Result<RunPlan, Box<dyn Error>> {
    let defaults = UpscaleConfig::default();
    let config = UpscaleConfig {
        context_diameter: cli
            .context_diameter
            .or(file.context_diameter)
            .unwrap_or(defaults.context_diameter),
        top_k: cli.top_k.or(file.top_k).unwrap_or(defaults.top_k),
        context_weights: cli
            .context_weights
            .map(|w| w.0)
            .or(file.context_weights)
            .or(defaults.context_weights),
        area_size: cli.area_size.or(file.area_size).unwrap_or(defaults.area_size),
        scale: cli.scale.or(file.scale).unwrap_or(defaults.scale),
        color_preservation: cli
            .color_preservation
            .or(file.color_preservation)
            .unwrap_or(defaults.color_preservation),
        stop_threshold: cli.stop.or(file.stop).unwrap_or(defaults.stop_threshold),
        border: cli
            .border
            .or(file.border)
            .map(BorderPolicy::from)
            .unwrap_or(defaults.border),
        parallel: !cli.sequential && file.parallel.unwrap_or(defaults.parallel),
    };

    let input = cli
        .input
        .or(file.input)
        .ok_or_else(|| config_error("an input image is required (-i <path>)"))?;
    let output = cli
        .output
        .or(file.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    Ok(RunPlan {
        input,
        output,
        config,
    })
}

fn init_tracing(trace: bool) -> Result<(), Box<dyn Error>> {
    let mut filter = EnvFilter::from_default_env().add_directive("patchscale_cli=info".parse()?);
    if trace {
        filter = filter.add_directive("patchscale=info".parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }
    init_tracing(cli.trace)?;

    let file = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|err| config_error(format!("{}: {err}", path.display())))?;
            serde_json::from_str(&text).map_err(config_error)?
        }
        None => FileConfig::default(),
    };
    let plan = resolve(cli, file)?;

    let upscaler = Upscaler::new(plan.config).map_err(|err: UpscaleError| {
        if err.is_config_error() {
            config_error(err)
        } else {
            err.into()
        }
    })?;

    let cfg = upscaler.config();
    info!(
        context_diameter = cfg.context_diameter,
        top_k = cfg.top_k,
        area_size = cfg.area_size,
        scale = cfg.scale,
        color_preservation = cfg.color_preservation,
        stop = cfg.stop_threshold,
        border = ?cfg.border,
        "processing with params"
    );
    for (ring, weight) in upscaler.plan().weights().as_slice().iter().enumerate() {
        info!(ring, weight, "context weight");
    }

    let image = load_rgb_image(&plan.input)?;
    info!(
        width = image.width(),
        height = image.height(),
        input = %plan.input.display(),
        "calculating"
    );
    let upscaled = upscaler.upscale(image.view())?;
    save_rgb_image(&upscaled, &plan.output)?;
    info!(
        width = upscaled.width(),
        height = upscaled.height(),
        output = %plan.output.display(),
        "written"
    );

    Ok(())
}
