#![deny(unsafe_code)]
//! CLI binary for the flowfield animation engine.
//!
//! Subcommands:
//! - `render <curve>` — run N frames headlessly, write a PNG snapshot
//! - `list` — print available curves and color modes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{ColorMode, Curve, FrameTiming, GradientStop, ParamStore, Rgb, SurfaceSize};
use flowfield_fields::FieldKind;
use flowfield_sim::{App, Raster};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Flow-field particle animation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a curve for N frames and write a PNG snapshot of the result.
    Render {
        /// Curve name (e.g. "Vortex", "Sweeping Right").
        curve: String,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: u32,

        /// Number of animation frames to run.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// PRNG seed for deterministic respawns.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Animation speed in [0, 1].
        #[arg(long, default_value_t = 0.5)]
        speed: f64,

        /// Number of particles.
        #[arg(short, long, default_value_t = 10_000)]
        particles: usize,

        /// Color mode ("Hue Cycle", "Custom Gradient", "Flat").
        #[arg(long, default_value = "Custom Gradient")]
        color_mode: String,

        /// Gradient map as a JSON array of [hex, weight] pairs.
        #[arg(long, default_value = r#"[["000000", 1.0]]"#)]
        color_map: String,

        /// Background color as a 6-digit hex triplet.
        #[arg(long, default_value = "ffffff")]
        background: String,

        /// Per-frame fade opacity in [0, 255]; lower values leave longer trails.
        #[arg(long, default_value_t = 13)]
        opacity: u8,

        /// Simulated frame rate.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List available curves and color modes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let curves = FieldKind::list_curves();
            let modes: Vec<&str> = ColorMode::ALL.into_iter().map(ColorMode::name).collect();
            if cli.json {
                let info = serde_json::json!({
                    "curves": curves,
                    "color_modes": modes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Curves:");
                for name in curves {
                    println!("  {name}");
                }
                println!("Color modes:");
                println!("  {}", modes.join(", "));
            }
        }
        Command::Render {
            curve,
            width,
            height,
            frames,
            seed,
            speed,
            particles,
            color_mode,
            color_map,
            background,
            opacity,
            fps,
            output,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(CliError::Input(format!("invalid --fps {fps}")));
            }
            let stops: Vec<GradientStop> = serde_json::from_str(&color_map)
                .map_err(|e| CliError::Input(format!("invalid --color-map JSON: {e}")))?;

            let mut store = ParamStore::new();
            store.set_curve(Curve::from_name(&curve)?);
            store.set_speed(speed)?;
            store.set_num_particles(particles)?;
            store.set_color_mode(ColorMode::from_name(&color_mode)?);
            store.set_color_map(stops)?;
            store.set_background(
                Rgb::from_hex(&background).map_err(|e| CliError::Input(e.to_string()))?,
            );
            store.set_draw_opacity(opacity);

            let surface = SurfaceSize::new(width as f64, height as f64)?;
            let mut app = App::new(store, surface, seed);
            let mut raster = Raster::new(width, height)?;
            raster.apply(&app.initial_clear());

            let delta = 1.0 / fps;
            for frame in 0..frames {
                let timing = FrameTiming::new(frame as f64 * delta, delta);
                raster.apply(&app.frame(timing)?);
            }

            raster.write_png(&output)?;

            if cli.json {
                let info = serde_json::json!({
                    "curve": curve,
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "particles": particles,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {curve} ({width}x{height}, {frames} frames, {particles} particles, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
