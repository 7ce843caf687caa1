use clap::Parser;
use std::{path::PathBuf, process::ExitCode};

use robo3dgs::{
    colmap::{CameraModel, ProcessExecutor},
    config::Robo3dgsConfig,
    convert::{convert, ConvertOptions},
};

/// Run COLMAP on an experiment with a known pose set.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// the experiment directory holding `images/` and the manual pose set
    #[arg(short, long = "source_path", visible_alias = "source-path")]
    source_path: PathBuf,

    /// COLMAP camera model used when poses are estimated
    #[arg(long, default_value = "OPENCV")]
    camera: CameraModel,

    /// remove `sparse/` and `database.db` of a previous run first
    #[arg(long)]
    debug: bool,

    /// JSON file with the tool settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Robo3dgsConfig::load(args.config.as_deref())?;

    let options = ConvertOptions {
        source_path: args.source_path,
        camera: args.camera,
        debug: args.debug,
    };

    let report = convert(&options, &config.colmap, &mut ProcessExecutor)?;
    log::info!("done after {} stages", report.stages.len());

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
