use std::fmt;

use crate::{
    camera::CameraModel,
    command::{self, StageCommand},
    error::PipelineError,
    executor::{StageExecutor, StageStatus},
    layout::ExperimentLayout,
    options::ColmapOptions,
};

/// How camera poses enter the reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoseMode {
    /// Poses come from the manual pose set and points are triangulated.
    #[default]
    KnownPoses,
    /// Poses and structure are estimated by incremental mapping.
    EstimatePoses,
}

/// An external step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `colmap feature_extractor`
    FeatureExtraction,
    /// `colmap exhaustive_matcher`
    FeatureMatching,
    /// `colmap point_triangulator`
    PointTriangulation,
    /// `colmap mapper`
    Mapping,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FeatureExtraction => "feature extraction",
            Stage::FeatureMatching => "feature matching",
            Stage::PointTriangulation => "point triangulation",
            Stage::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// State of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has run yet.
    Idle,
    /// The stage is being executed.
    Running(Stage),
    /// Every stage succeeded.
    Done,
    /// The stage failed and nothing after it was run.
    Aborted(Stage),
}

/// Input driving the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// Begin the run.
    Start,
    /// The running stage exited with code 0.
    Succeeded,
    /// The running stage exited with a non-zero status.
    Failed,
}

/// `(from, event, mode, to)`; a `None` mode applies to both modes.
///
/// `Failed` is not listed: it moves any `Running(stage)` to `Aborted(stage)`.
const TRANSITIONS: &[(PipelineState, StageEvent, Option<PoseMode>, PipelineState)] = &[
    (
        PipelineState::Idle,
        StageEvent::Start,
        None,
        PipelineState::Running(Stage::FeatureExtraction),
    ),
    (
        PipelineState::Running(Stage::FeatureExtraction),
        StageEvent::Succeeded,
        None,
        PipelineState::Running(Stage::FeatureMatching),
    ),
    (
        PipelineState::Running(Stage::FeatureMatching),
        StageEvent::Succeeded,
        Some(PoseMode::KnownPoses),
        PipelineState::Running(Stage::PointTriangulation),
    ),
    (
        PipelineState::Running(Stage::FeatureMatching),
        StageEvent::Succeeded,
        Some(PoseMode::EstimatePoses),
        PipelineState::Running(Stage::Mapping),
    ),
    (
        PipelineState::Running(Stage::PointTriangulation),
        StageEvent::Succeeded,
        Some(PoseMode::KnownPoses),
        PipelineState::Done,
    ),
    (
        PipelineState::Running(Stage::Mapping),
        StageEvent::Succeeded,
        Some(PoseMode::EstimatePoses),
        PipelineState::Done,
    ),
];

impl PipelineState {
    /// The state reached from `self` on `event` in `mode`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidTransition`] if the table has no entry, e.g. any event
    /// after [`PipelineState::Done`] or [`PipelineState::Aborted`].
    pub fn next(self, event: StageEvent, mode: PoseMode) -> Result<PipelineState, PipelineError> {
        if let (PipelineState::Running(stage), StageEvent::Failed) = (self, event) {
            return Ok(PipelineState::Aborted(stage));
        }

        TRANSITIONS
            .iter()
            .find(|(from, on, only, _)| {
                *from == self && *on == event && only.map_or(true, |m| m == mode)
            })
            .map(|(_, _, _, to)| *to)
            .ok_or(PipelineError::InvalidTransition { state: self, event })
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Aborted(_))
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// The stages that ran, in order.
    pub stages: Vec<Stage>,
    /// The terminal state, always [`PipelineState::Done`].
    pub state: PipelineState,
}

/// The COLMAP preprocessing of one experiment.
#[derive(Debug, Clone)]
pub struct ColmapPipeline {
    layout: ExperimentLayout,
    options: ColmapOptions,
    mode: PoseMode,
}

impl ColmapPipeline {
    /// Create a pipeline over `layout`.
    pub fn new(layout: ExperimentLayout, options: ColmapOptions, mode: PoseMode) -> Self {
        Self {
            layout,
            options,
            mode,
        }
    }

    /// Build the command line of `stage`.
    pub fn command(&self, stage: Stage) -> Result<StageCommand, PipelineError> {
        let command = match stage {
            Stage::FeatureExtraction => match self.mode {
                PoseMode::KnownPoses => command::feature_extractor(
                    &self.options,
                    &self.layout,
                    CameraModel::SimplePinhole,
                    false,
                ),
                PoseMode::EstimatePoses => command::feature_extractor(
                    &self.options,
                    &self.layout,
                    self.options.camera_model,
                    true,
                ),
            },
            Stage::FeatureMatching => command::exhaustive_matcher(&self.options, &self.layout),
            Stage::PointTriangulation => {
                let pose_dir = self.layout.pose_dir()?;
                command::point_triangulator(&self.options, &self.layout, &pose_dir)
            }
            Stage::Mapping => command::mapper(&self.options, &self.layout),
        };
        Ok(command)
    }

    /// Create the directory `stage` writes its model into, if it has one.
    fn create_output_dir(&self, stage: Stage) -> Result<(), PipelineError> {
        match stage {
            Stage::PointTriangulation => std::fs::create_dir_all(self.layout.sparse_model_dir())?,
            Stage::Mapping => std::fs::create_dir_all(self.layout.sparse_dir())?,
            Stage::FeatureExtraction | Stage::FeatureMatching => {}
        }
        Ok(())
    }

    /// Run every stage with `executor`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// [`PipelineError::StageFailed`] for the first stage with a non-zero exit. Nothing
    /// written by the earlier stages is cleaned up.
    pub fn run<E>(&self, executor: &mut E) -> Result<PipelineReport, PipelineError>
    where
        E: StageExecutor + ?Sized,
    {
        // the pose set is an input of the last stage, check it before anything runs
        if self.mode == PoseMode::KnownPoses {
            self.layout.pose_dir()?;
        }

        let mut stages = Vec::new();
        let mut state = PipelineState::Idle.next(StageEvent::Start, self.mode)?;

        while let PipelineState::Running(stage) = state {
            let command = self.command(stage)?;
            self.create_output_dir(stage)?;
            log::info!("{}: {}", stage, command);

            let status: StageStatus = executor.run(&command)?;
            stages.push(stage);

            if status.success() {
                state = state.next(StageEvent::Succeeded, self.mode)?;
            } else {
                state = state.next(StageEvent::Failed, self.mode)?;
                log::error!("{} failed with {}, aborting", stage, status);
                debug_assert_eq!(state, PipelineState::Aborted(stage));
                return Err(PipelineError::StageFailed { stage, status });
            }
        }

        log::info!(
            "sparse reconstruction written to {}",
            self.layout.sparse_dir().display()
        );

        Ok(PipelineReport { stages, state })
    }
}

#[cfg(test)]
mod tests {
    use super::{PipelineState, PoseMode, Stage, StageEvent};
    use crate::error::PipelineError;

    fn walk(mode: PoseMode) -> Result<Vec<PipelineState>, PipelineError> {
        let mut states = vec![PipelineState::Idle];
        let mut state = PipelineState::Idle.next(StageEvent::Start, mode)?;
        while !state.is_terminal() {
            states.push(state);
            state = state.next(StageEvent::Succeeded, mode)?;
        }
        states.push(state);
        Ok(states)
    }

    #[test]
    fn known_poses_path() -> Result<(), PipelineError> {
        assert_eq!(
            walk(PoseMode::KnownPoses)?,
            vec![
                PipelineState::Idle,
                PipelineState::Running(Stage::FeatureExtraction),
                PipelineState::Running(Stage::FeatureMatching),
                PipelineState::Running(Stage::PointTriangulation),
                PipelineState::Done,
            ]
        );
        Ok(())
    }

    #[test]
    fn estimate_poses_path() -> Result<(), PipelineError> {
        assert_eq!(
            walk(PoseMode::EstimatePoses)?,
            vec![
                PipelineState::Idle,
                PipelineState::Running(Stage::FeatureExtraction),
                PipelineState::Running(Stage::FeatureMatching),
                PipelineState::Running(Stage::Mapping),
                PipelineState::Done,
            ]
        );
        Ok(())
    }

    #[test]
    fn failure_aborts_any_stage() -> Result<(), PipelineError> {
        for stage in [
            Stage::FeatureExtraction,
            Stage::FeatureMatching,
            Stage::PointTriangulation,
            Stage::Mapping,
        ] {
            let state =
                PipelineState::Running(stage).next(StageEvent::Failed, PoseMode::KnownPoses)?;
            assert_eq!(state, PipelineState::Aborted(stage));
            assert!(state.is_terminal());
        }
        Ok(())
    }

    #[test]
    fn invalid_transitions() {
        let mode = PoseMode::KnownPoses;
        assert!(PipelineState::Idle
            .next(StageEvent::Succeeded, mode)
            .is_err());
        assert!(PipelineState::Idle.next(StageEvent::Failed, mode).is_err());
        assert!(PipelineState::Done.next(StageEvent::Start, mode).is_err());
        assert!(PipelineState::Aborted(Stage::FeatureMatching)
            .next(StageEvent::Succeeded, mode)
            .is_err());
        // triangulation only belongs to the known-pose path
        assert!(matches!(
            PipelineState::Running(Stage::PointTriangulation)
                .next(StageEvent::Succeeded, PoseMode::EstimatePoses),
            Err(PipelineError::InvalidTransition { .. })
        ));
    }
}
