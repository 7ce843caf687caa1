use std::path::PathBuf;

use robo3dgs_colmap::{
    ColmapPipeline, ExperimentLayout, PipelineReport, PoseMode, StageExecutor, StageStatus,
};
use robo3dgs_image::{prepare_images, Orientation};

use crate::{config::Robo3dgsConfig, error::DriverError};

/// Flags of one driver run.
#[derive(Debug, Clone, Default)]
pub struct DriverOptions {
    /// The experiment directory, relative or absolute.
    pub source_path: PathBuf,
    /// Estimate the poses with COLMAP instead of using the manual pose set.
    pub use_original: bool,
    /// Go straight to training on an already preprocessed experiment.
    pub skip_preprocessing: bool,
}

impl DriverOptions {
    /// The pose mode selected by the flags.
    pub fn pose_mode(&self) -> PoseMode {
        if self.use_original {
            PoseMode::EstimatePoses
        } else {
            PoseMode::KnownPoses
        }
    }

    /// How `input/` is carried over to `images/`.
    ///
    /// Estimated poses need the importer's upside down frames turned over, manual
    /// pose sets already match their images.
    pub fn orientation(&self) -> Orientation {
        match self.pose_mode() {
            PoseMode::EstimatePoses => Orientation::Rotate180,
            PoseMode::KnownPoses => Orientation::AsIs,
        }
    }
}

/// How the trainer ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// The trainer exited with code 0.
    Completed,
    /// The trainer exited with a failure, its partial output is left in place.
    Terminated(StageStatus),
}

/// Summary of a driver run.
#[derive(Debug, Clone)]
pub struct DriverReport {
    /// The resolved experiment.
    pub layout: ExperimentLayout,
    /// Number of images written to `images/`, `None` when preprocessing was skipped.
    pub prepared_images: Option<usize>,
    /// The COLMAP run, `None` when preprocessing was skipped.
    pub pipeline: Option<PipelineReport>,
    /// How the trainer ended.
    pub training: TrainingOutcome,
}

/// Runs image preparation, COLMAP and the trainer on an experiment.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: Robo3dgsConfig,
}

impl Driver {
    /// Create a driver with the tool settings of `config`.
    pub fn new(config: Robo3dgsConfig) -> Self {
        Self { config }
    }

    /// Run the whole procedure on `options.source_path`.
    ///
    /// Unless preprocessing is skipped, the experiment must be clean and, with
    /// known poses, carry a complete pose set. Both are checked before anything is
    /// written or executed.
    ///
    /// # Errors
    ///
    /// Any precondition violation, image preparation failure or COLMAP stage
    /// failure. A trainer exiting with a failure is reported as
    /// [`TrainingOutcome::Terminated`] instead.
    pub fn run<E>(
        &self,
        options: &DriverOptions,
        executor: &mut E,
    ) -> Result<DriverReport, DriverError>
    where
        E: StageExecutor + ?Sized,
    {
        let layout = ExperimentLayout::resolve(&options.source_path)?;
        log::info!("experiment at {}", layout.root().display());

        let (prepared_images, pipeline) = if options.skip_preprocessing {
            log::info!("skipping preprocessing");
            (None, None)
        } else {
            let (count, report) = self.preprocess(&layout, options, executor)?;
            (Some(count), Some(report))
        };

        let training = self.train(&layout, executor)?;

        Ok(DriverReport {
            layout,
            prepared_images,
            pipeline,
            training,
        })
    }

    fn preprocess<E>(
        &self,
        layout: &ExperimentLayout,
        options: &DriverOptions,
        executor: &mut E,
    ) -> Result<(usize, PipelineReport), DriverError>
    where
        E: StageExecutor + ?Sized,
    {
        layout.ensure_clean()?;

        let mode = options.pose_mode();
        match mode {
            PoseMode::KnownPoses => {
                let pose_dir = layout.pose_dir()?;
                log::info!("using manual camera poses from {}", pose_dir.display());
            }
            PoseMode::EstimatePoses => log::info!("estimating camera poses with COLMAP"),
        }

        let count = prepare_images(
            layout.input_dir(),
            layout.images_dir(),
            options.orientation(),
            &self.config.images,
        )?;

        let pipeline = ColmapPipeline::new(layout.clone(), self.config.colmap.clone(), mode);
        let report = pipeline.run(executor)?;

        Ok((count, report))
    }

    fn train<E>(
        &self,
        layout: &ExperimentLayout,
        executor: &mut E,
    ) -> Result<TrainingOutcome, DriverError>
    where
        E: StageExecutor + ?Sized,
    {
        let command = self.config.trainer.command(layout);
        log::info!("starting the 3DGS procedure: {}", command);

        let status = executor.run(&command)?;
        if status.success() {
            log::info!(
                "3DGS procedure finished, model written to {}",
                layout.root().display()
            );
            Ok(TrainingOutcome::Completed)
        } else {
            log::warn!(
                "3DGS splatting procedure terminated with {}, attempting to recover results",
                status
            );
            Ok(TrainingOutcome::Terminated(status))
        }
    }
}
