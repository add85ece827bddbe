#![deny(unsafe_code)]
//! CLI binary for the fluid dot-grid engine.
//!
//! Subcommands:
//! - `render`: run the dot grid for N frames, write a PNG
//! - `list`: print noise types and color modes
//! - `defaults`: print the default settings (or their schema) as JSON

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use fluid_core::{ColorMode, DotGrid, Engine, NoiseKind, Settings, Srgb};
use glam::DVec2;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fluid", about = "Animated noise dot-grid renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dot grid for N frames and write the last one as a PNG.
    Render(RenderArgs),
    /// List noise types and color modes.
    List,
    /// Print the default settings as JSON.
    Defaults {
        /// Print the settings schema instead of values.
        #[arg(long)]
        schema: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Noise type (perlin, simplex, worley, manhattan, fractionalBrownian, white).
    #[arg(short, long)]
    noise: Option<String>,

    /// Dots per side of the grid.
    #[arg(short, long)]
    dimensions: Option<usize>,

    /// Spacing between dots in world units.
    #[arg(long)]
    size: Option<f64>,

    /// Frames to animate; the last one is written.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Seed for the noise generators. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Pixels per world unit.
    #[arg(long, default_value_t = 8.0)]
    scale: f64,

    /// Pointer position in world units, as X,Y.
    #[arg(long, value_parser = parse_cursor, allow_hyphen_values = true)]
    cursor: Option<DVec2>,

    /// Settings patch as a JSON object with store keys (e.g. '{"dotMax": 6}').
    #[arg(long, default_value = "{}")]
    settings: String,

    /// Canvas background color.
    #[arg(long, default_value = "#000000")]
    background: String,

    /// Output file path.
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
}

fn parse_cursor(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    let cursor = DVec2::new(coord(x)?, coord(y)?);
    if cursor.is_finite() {
        Ok(cursor)
    } else {
        Err(format!("cursor must be finite, got '{s}'"))
    }
}

/// Defaults, then the `--settings` patch with the individual flags layered
/// over it. The merged patch is validated once.
fn build_settings(args: &RenderArgs) -> Result<Settings, CliError> {
    let patch: Value = serde_json::from_str(&args.settings)
        .map_err(|e| CliError::Input(format!("invalid --settings JSON: {e}")))?;
    let Value::Object(mut patch) = patch else {
        return Err(CliError::Input("--settings must be a JSON object".into()));
    };

    if let Some(noise) = &args.noise {
        patch.insert("noiseType".into(), json!(noise));
    }
    if let Some(dimensions) = args.dimensions {
        patch.insert("dimensions".into(), json!(dimensions));
    }
    if let Some(size) = args.size {
        patch.insert("size".into(), json!(size));
    }
    if let Some(seed) = args.seed {
        patch.insert("seed".into(), json!(seed));
    }
    let base = args.seed.map_or_else(Settings::default, Settings::with_seed);
    Ok(base.merged(&Value::Object(patch))?)
}

fn render(args: RenderArgs, json_mode: bool) -> Result<(), CliError> {
    let settings = build_settings(&args)?;
    let background = Srgb::from_hex(&args.background)
        .map_err(|e| CliError::Input(format!("invalid --background: {e}")))?;
    let viewport = fluid_raster::canvas_extent(&settings, args.scale)?;
    tracing::info!(
        noise = %settings.noise_type,
        dimensions = settings.dimensions,
        seed = settings.seed,
        side = viewport.side,
        "rendering"
    );

    let mut grid = DotGrid::new(settings)?;
    for _ in 1..args.frames {
        grid.frame(args.cursor);
        grid.step()?;
    }
    let buffer = fluid_raster::rasterize(grid.frame(args.cursor), &viewport, background);
    fluid_raster::snapshot::write_png(buffer, viewport.side, viewport.side, &args.output)?;

    let settings = grid.settings();
    if json_mode {
        let info = json!({
            "noise": settings.noise_type.name(),
            "dimensions": settings.dimensions,
            "frames": args.frames,
            "seed": settings.seed,
            "time": grid.time(),
            "meanIntensity": grid.field().mean(),
            "side": viewport.side,
            "output": args.output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} ({d}x{d}, {} frames, seed {}) -> {} ({}px)",
            settings.noise_type,
            args.frames,
            settings.seed,
            args.output.display(),
            viewport.side,
            d = settings.dimensions,
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let noises = NoiseKind::list_names();
            let color_modes = ColorMode::list_names();
            if cli.json {
                let info = json!({
                    "noiseTypes": noises,
                    "colorModes": color_modes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Noise types:");
                for name in noises {
                    println!("  {name}");
                }
                println!("Color modes:");
                println!("  {}", color_modes.join(", "));
            }
        }
        Command::Defaults { schema } => {
            let value = if schema {
                Settings::param_schema()
            } else {
                Settings::default().to_json()
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Render(args) => render(args, cli.json)?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_args(extra: &[&str]) -> RenderArgs {
        let mut argv = vec!["fluid", "render"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Render(args) => args,
            _ => unreachable!("parsed a render command"),
        }
    }

    #[test]
    fn parse_cursor_accepts_pairs() {
        assert_eq!(parse_cursor("1.5, -2").unwrap(), DVec2::new(1.5, -2.0));
        assert!(parse_cursor("3").is_err());
        assert!(parse_cursor("a,b").is_err());
        assert!(parse_cursor("inf,0").is_err());
    }

    #[test]
    fn negative_cursor_parses_as_a_value() {
        let args = render_args(&["--cursor", "-4,7"]);
        assert_eq!(args.cursor, Some(DVec2::new(-4.0, 7.0)));
    }

    #[test]
    fn flags_override_settings_patch() {
        let args = render_args(&[
            "--seed",
            "9",
            "--noise",
            "worley",
            "--dimensions",
            "12",
            "--settings",
            r#"{"noiseType": "white", "dimensions": 40, "dotMax": 6, "seed": 1}"#,
        ]);
        let settings = build_settings(&args).unwrap();
        assert_eq!(settings.noise_type, NoiseKind::Worley);
        assert_eq!(settings.dimensions, 12);
        assert_eq!(settings.dot_max, 6.0);
        assert_eq!(settings.seed, 9);
    }

    #[test]
    fn flags_replace_invalid_patch_values() {
        let args = render_args(&["--settings", r#"{"dimensions": 400}"#, "--dimensions", "12"]);
        assert_eq!(build_settings(&args).unwrap().dimensions, 12);
        let args = render_args(&["--settings", r#"{"dimensions": 400}"#]);
        assert_eq!(build_settings(&args).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn bad_settings_json_is_an_input_error() {
        let args = render_args(&["--settings", "{nope"]);
        assert_eq!(build_settings(&args).unwrap_err().exit_code(), 12);
        let args = render_args(&["--settings", "[1, 2]"]);
        assert_eq!(build_settings(&args).unwrap_err().exit_code(), 12);
    }

    #[test]
    fn unknown_noise_is_an_engine_error() {
        let args = render_args(&["--noise", "pink"]);
        assert_eq!(build_settings(&args).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn zero_frames_is_rejected_by_clap() {
        assert!(Cli::try_parse_from(["fluid", "render", "--frames", "0"]).is_err());
    }
}
