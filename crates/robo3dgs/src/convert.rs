use std::path::PathBuf;

use robo3dgs_colmap::{
    CameraModel, ColmapOptions, ColmapPipeline, ExperimentLayout, PipelineReport, PoseMode,
    StageExecutor,
};

use crate::error::DriverError;

/// Flags of one converter run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// The experiment directory, relative or absolute.
    pub source_path: PathBuf,
    /// Camera model used when the poses are estimated.
    pub camera: CameraModel,
    /// Remove a previous reconstruction before running.
    pub debug: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source_path: PathBuf::new(),
            camera: CameraModel::OpenCv,
            debug: false,
        }
    }
}

/// Run the known-pose COLMAP pipeline on an experiment whose `images/` are in place.
///
/// With `debug`, `sparse/` and `database.db` are removed first. Unlike the driver no
/// cleanliness check is made.
pub fn convert<E>(
    options: &ConvertOptions,
    colmap: &ColmapOptions,
    executor: &mut E,
) -> Result<PipelineReport, DriverError>
where
    E: StageExecutor + ?Sized,
{
    let layout = ExperimentLayout::resolve(&options.source_path)?;

    if options.debug {
        let removed = layout.clear_reconstruction()?;
        log::debug!("cleared {} entries of the previous run", removed.len());
    }

    let colmap = ColmapOptions {
        camera_model: options.camera,
        ..colmap.clone()
    };

    let pipeline = ColmapPipeline::new(layout, colmap, PoseMode::KnownPoses);
    Ok(pipeline.run(executor)?)
}
