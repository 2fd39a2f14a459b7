use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use image::imageops::FilterType;
use image_top_colors_wasm::{
    CANVAS_SIZE, DEFAULT_NUM_COLORS, ExtractConfig, RankedColor, checked_num_colors,
    rank_colors_bytes_with,
};
use log::{error, info};
use serde_json::{Value, json};

/// Resampling filter applied before counting.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Print the most frequent colors of one or more images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors to report per image
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_NUM_COLORS as i64,
        allow_negative_numbers = true
    )]
    num_colors: i64,

    /// Side length of the square canvas images are resampled to
    #[arg(long, default_value_t = CANVAS_SIZE)]
    canvas: u32,

    /// Resampling filter
    #[arg(long, value_enum, default_value_t = Filter::CatmullRom)]
    filter: Filter,

    /// Emit JSON instead of one color per line
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn process(path: &Path, num_colors: usize, config: &ExtractConfig) -> Result<Vec<RankedColor>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let ranked = rank_colors_bytes_with(&bytes, num_colors, config)
        .with_context(|| format!("extracting colors from {}", path.display()))?;
    info!("{}: {} colors", path.display(), ranked.len());
    Ok(ranked)
}

/// JSON entry for one input file.
fn json_report(path: &Path, ranked: &[RankedColor]) -> Value {
    let colors: Vec<_> = ranked
        .iter()
        .map(|r| json!({ "hex": r.hex(), "count": r.count }))
        .collect();
    json!({ "file": path.display().to_string(), "colors": colors })
}

/// Process every input, writing results to `out`.
///
/// Returns `Ok(false)` when at least one input failed; the others are still reported.
fn run(args: &Args, out: &mut impl Write) -> Result<bool> {
    let num_colors = checked_num_colors(args.num_colors)?;
    let config = ExtractConfig::default()
        .with_canvas(args.canvas, args.canvas)
        .with_filter(args.filter.into());
    config.validate()?;

    let mut all_ok = true;
    let mut reports = Vec::new();

    for input in &args.inputs {
        match process(input, num_colors, &config) {
            Ok(ranked) if args.json => reports.push(json_report(input, &ranked)),
            Ok(ranked) => {
                writeln!(out, "{}", input.display())?;
                for r in &ranked {
                    writeln!(out, "{}", r.hex())?;
                }
            }
            Err(e) => {
                error!("{e:#}");
                all_ok = false;
            }
        }
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
    }

    Ok(all_ok)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let all_ok = run(&args, &mut io::stdout().lock())?;
    Ok(if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
