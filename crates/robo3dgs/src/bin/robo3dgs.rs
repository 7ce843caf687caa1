use clap::Parser;
use std::{path::PathBuf, process::ExitCode};

use robo3dgs::{
    colmap::ProcessExecutor,
    config::Robo3dgsConfig,
    driver::{Driver, DriverOptions, TrainingOutcome},
};

/// Prepare an experiment with COLMAP and train Gaussian Splatting on it.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// the experiment directory holding `input/` and the manual pose set
    #[arg(short, long = "source_path", visible_alias = "source-path")]
    source_path: PathBuf,

    /// estimate the poses with COLMAP instead of using the manual pose set
    #[arg(long = "use_original", visible_aliases = ["use-original", "ignore-known-poses"])]
    use_original: bool,

    /// train on an already preprocessed experiment
    #[arg(long)]
    skip_preprocessing: bool,

    /// JSON file with the tool settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Robo3dgsConfig::load(args.config.as_deref())?;

    let options = DriverOptions {
        source_path: args.source_path,
        use_original: args.use_original,
        skip_preprocessing: args.skip_preprocessing,
    };

    let report = Driver::new(config).run(&options, &mut ProcessExecutor)?;

    if let TrainingOutcome::Terminated(status) = report.training {
        log::warn!(
            "training ended with {}, partial results are in {}",
            status,
            report.layout.root().display()
        );
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

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::Args;

    #[test]
    fn command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn manual_poses_by_default() -> Result<(), clap::Error> {
        let args = Args::try_parse_from(["robo3dgs", "-s", "experiment"])?;
        assert_eq!(args.source_path.to_str(), Some("experiment"));
        assert!(!args.use_original);
        assert!(!args.skip_preprocessing);
        assert!(args.config.is_none());
        Ok(())
    }

    #[test]
    fn source_path_spellings() -> Result<(), clap::Error> {
        for flag in ["--source_path", "--source-path"] {
            let args = Args::try_parse_from(["robo3dgs", flag, "experiment"])?;
            assert_eq!(args.source_path.to_str(), Some("experiment"));
        }
        assert!(Args::try_parse_from(["robo3dgs"]).is_err());
        Ok(())
    }

    #[test]
    fn use_original_aliases() -> Result<(), clap::Error> {
        for flag in ["--use_original", "--use-original", "--ignore-known-poses"] {
            let args = Args::try_parse_from(["robo3dgs", "-s", "experiment", flag])?;
            assert!(args.use_original, "{flag}");
        }
        Ok(())
    }

    #[test]
    fn skip_preprocessing_spelling() -> Result<(), clap::Error> {
        let args = Args::try_parse_from(["robo3dgs", "-s", "e", "--skip-preprocessing"])?;
        assert!(args.skip_preprocessing);

        let err = Args::try_parse_from(["robo3dgs", "-s", "e", "--sikp-preprocessing"]);
        assert!(err.is_err());
        Ok(())
    }
}
