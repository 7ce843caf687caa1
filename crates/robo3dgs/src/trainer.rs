use std::path::PathBuf;

use robo3dgs_colmap::{ExperimentLayout, StageCommand};
use serde::{Deserialize, Serialize};

/// How the Gaussian Splatting trainer is started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerOptions {
    /// The python interpreter.
    pub python: PathBuf,
    /// Path to `train.py` of the Gaussian Splatting checkout.
    pub train_script: PathBuf,
    /// Extra arguments appended after the source and model paths.
    pub extra_args: Vec<String>,
}

impl Default for TrainerOptions {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python"),
            train_script: PathBuf::from("./gaussian-splatting/train.py"),
            extra_args: Vec::new(),
        }
    }
}

impl TrainerOptions {
    /// The trainer invocation for `layout`.
    ///
    /// The experiment root is both the source (`-s`) and the model output (`-m`).
    pub fn command(&self, layout: &ExperimentLayout) -> StageCommand {
        let command = StageCommand::new(&self.python)
            .arg(&self.train_script)
            .opt("-s", layout.root())
            .opt("-m", layout.root());

        self.extra_args
            .iter()
            .fold(command, |command, arg| command.arg(arg))
    }
}

#[cfg(test)]
mod tests {
    use robo3dgs_colmap::ExperimentLayout;

    use super::TrainerOptions;

    #[test]
    fn trainer_command() {
        let layout = ExperimentLayout::from_absolute("/data/experiment");
        let command = TrainerOptions::default().command(&layout);
        assert_eq!(
            command.to_string(),
            "python ./gaussian-splatting/train.py -s /data/experiment -m /data/experiment"
        );
    }

    #[test]
    fn trainer_extra_args() {
        let layout = ExperimentLayout::from_absolute("/data/experiment");
        let options = TrainerOptions {
            python: "python3".into(),
            extra_args: vec!["--iterations".into(), "7000".into()],
            ..Default::default()
        };
        let command = options.command(&layout);
        assert_eq!(command.program().to_str(), Some("python3"));
        assert_eq!(command.value_of("--iterations"), Some("7000".as_ref()));
    }
}
