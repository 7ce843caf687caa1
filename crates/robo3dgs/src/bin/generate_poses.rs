use clap::Parser;
use std::{fs::File, io::BufWriter, path::PathBuf, process::ExitCode};

use robo3dgs::poses::{generate_keyframes, write_images_txt, TrajectoryConfig};

/// Generate a COLMAP `images.txt` for a camera sweeping over a scene.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// where to write `images.txt`, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// first position along y
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    start_y: f64,

    /// end of the sweep along y, exclusive
    #[arg(long, default_value_t = 3.0, allow_hyphen_values = true)]
    end_y: f64,

    /// distance between two positions
    #[arg(long, default_value_t = 0.1)]
    step_y: f64,

    /// camera height
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    height: f64,

    /// tilt from the vertical, in degrees
    #[arg(long, default_value_t = 80.0)]
    tilt_deg: f64,

    /// headings taken at each position
    #[arg(long, default_value_t = 8)]
    rotations_per_position: u32,

    /// camera id written on every line
    #[arg(long, default_value_t = 1)]
    camera_id: u32,

    /// image file extension
    #[arg(long, default_value = "jpg")]
    image_extension: String,
}

impl From<Args> for TrajectoryConfig {
    fn from(args: Args) -> Self {
        TrajectoryConfig {
            start_y: args.start_y,
            end_y: args.end_y,
            step_y: args.step_y,
            height: args.height,
            tilt_deg: args.tilt_deg,
            rotations_per_position: args.rotations_per_position,
            camera_id: args.camera_id,
            image_extension: args.image_extension,
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let output = args.output.clone();
    let keyframes = generate_keyframes(&args.into())?;

    match output {
        Some(path) => {
            write_images_txt(BufWriter::new(File::create(&path)?), &keyframes)?;
            log::info!("wrote {} keyframes to {}", keyframes.len(), path.display());
        }
        None => write_images_txt(std::io::stdout().lock(), &keyframes)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
