#![deny(unsafe_code)]
//! CLI binary for the particle-field engine.
//!
//! Subcommands:
//! - `render <image>`: sample an image, animate N frames, write the last frame as PNG
//! - `inspect <image>`: report how an image samples into a field

mod config;
mod error;
mod framepace;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use error::CliError;
use framepace::{BudgetClock, Framepacer};
use log::info;
use particle_field_core::{Canvas, Controller, Engine, PointerCell, Rgb};
use particle_field_io::{frame_path, load_image, write_png};
use particle_field_sim::ParticleField;

#[derive(Parser)]
#[command(name = "particle-field", about = "Image particle field animator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct FieldArgs {
    /// Source image; transparent pixels produce no particles.
    image: PathBuf,

    /// Field width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Field height in pixels.
    #[arg(short = 'H', long, default_value_t = 800)]
    height: usize,

    /// PRNG seed for initial particle positions.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file with field params.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field params as a JSON object; keys override --config.
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Animate the field and write the final frame as a PNG.
    Render {
        #[command(flatten)]
        field: FieldArgs,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 120)]
        ticks: u64,

        /// Fixed pointer position in field coordinates, as "x,y".
        #[arg(long)]
        pointer: Option<String>,

        /// Background colour as hex; transparent when omitted.
        #[arg(long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Also write every frame into this directory.
        #[arg(long)]
        frames_dir: Option<PathBuf>,

        /// Limit the animation to this many frames per second.
        #[arg(long, default_value_t = 0)]
        fps: u32,
    },
    /// Report how the image samples into a field.
    Inspect {
        #[command(flatten)]
        field: FieldArgs,
    },
}

fn build_field(args: &FieldArgs) -> Result<ParticleField, CliError> {
    let params = config::load_params(args.config.as_deref(), &args.params)?;
    let image = load_image(&args.image)?;
    Ok(ParticleField::from_json(
        args.width,
        args.height,
        &image,
        &params,
        args.seed,
    )?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Inspect { field } => {
            let f = build_field(&field)?;
            if cli.json {
                let info = serde_json::json!({
                    "image": field.image.display().to_string(),
                    "width": f.width(),
                    "height": f.height(),
                    "particles": f.len(),
                    "offset": [f.offset().x, f.offset().y],
                    "params": f.params(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("particles: {}", f.len());
                println!("field:     {}x{}", f.width(), f.height());
                println!("offset:    ({}, {})", f.offset().x, f.offset().y);
                println!("params:    {}", f.params());
            }
        }
        Command::Render {
            field,
            ticks,
            pointer,
            background,
            output,
            frames_dir,
            fps,
        } => {
            let background = background.as_deref().map(Rgb::from_hex).transpose()?;
            let pointer_cell = PointerCell::new();
            if let Some(spec) = pointer.as_deref() {
                pointer_cell.set(config::parse_pointer(spec)?);
            }

            let f = build_field(&field)?;
            let particles = f.len();
            let mut canvas = Canvas::new(f.width(), f.height(), background)?;
            let mut controller = Controller::new(f, pointer_cell);

            match &frames_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir)
                        .map_err(|e| CliError::Io(format!("{}: {e}", dir.display())))?;
                    let mut pacer = Framepacer::new(fps);
                    for frame in 0..ticks {
                        pacer.pace();
                        controller.tick(&mut canvas);
                        write_png(&canvas, &frame_path(dir, frame))?;
                    }
                }
                None => {
                    let mut clock = BudgetClock::new(ticks, fps, controller.cancellation_token());
                    controller.run(&mut clock, &mut canvas);
                }
            }
            controller.teardown();
            info!(
                "rendered {} frames, mean displacement {:.3}",
                controller.frames(),
                controller.engine().mean_displacement()
            );

            write_png(&canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "image": field.image.display().to_string(),
                    "width": field.width,
                    "height": field.height,
                    "particles": particles,
                    "ticks": controller.frames(),
                    "seed": field.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({particles} particles, {} frames, seed {}) -> {}",
                    field.image.display(),
                    controller.frames(),
                    field.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

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

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field_core::Surface;

    fn write_test_png(dir: &std::path::Path) -> PathBuf {
        let mut canvas = Canvas::new(6, 6, None).unwrap();
        canvas.fill_rect(1.0, 1.0, 4.0, Rgb::new(200, 100, 50));
        let path = dir.join("source.png");
        write_png(&canvas, &path).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn render_writes_settled_image() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_png(dir.path());
        let out = dir.path().join("out.png");
        let cli = parse(&[
            "particle-field",
            "render",
            src.to_str().unwrap(),
            "-W",
            "12",
            "-H",
            "12",
            "--params",
            r#"{"stride": 1}"#,
            "--ticks",
            "150",
            "-o",
            out.to_str().unwrap(),
        ]);
        run(cli).unwrap();

        let img = particle_field_io::load_image(&out).unwrap();
        // 4x4 block centred: offset (3, 3) + source (1..5) -> 4..8.
        assert_eq!(img.pixel(4, 4), Some([200, 100, 50, 255]));
        assert_eq!(img.pixel(7, 7), Some([200, 100, 50, 255]));
        assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn render_with_frames_dir_writes_each_frame() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_png(dir.path());
        let frames = dir.path().join("frames");
        let cli = parse(&[
            "particle-field",
            "render",
            src.to_str().unwrap(),
            "-W",
            "10",
            "-H",
            "10",
            "--ticks",
            "3",
            "--frames-dir",
            frames.to_str().unwrap(),
            "-o",
            dir.path().join("last.png").to_str().unwrap(),
        ]);
        run(cli).unwrap();
        for i in 0..3 {
            assert!(frame_path(&frames, i).exists(), "frame {i} missing");
        }
        assert!(!frame_path(&frames, 3).exists());
    }

    #[test]
    fn render_rejects_bad_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_png(dir.path());
        let cli = parse(&[
            "particle-field",
            "render",
            src.to_str().unwrap(),
            "--pointer",
            "nowhere",
        ]);
        let err = run(cli).err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn zero_width_is_field_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_png(dir.path());
        let cli = parse(&["particle-field", "inspect", src.to_str().unwrap(), "-W", "0"]);
        assert_eq!(run(cli).err().unwrap().exit_code(), 10);
    }

    #[test]
    fn missing_image_is_io_error() {
        let cli = parse(&["particle-field", "inspect", "/definitely/not/here.png"]);
        assert_eq!(run(cli).err().unwrap().exit_code(), 11);
    }
}
