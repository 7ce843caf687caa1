use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
};

use crate::{camera::CameraModel, layout::ExperimentLayout, options::ColmapOptions};

/// A program invocation: the executable and its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl StageCommand {
    /// Create a command for `program` without arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Append a `--flag value` pair.
    pub fn opt(self, flag: &str, value: impl AsRef<OsStr>) -> Self {
        self.arg(flag).arg(value)
    }

    /// The executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The arguments passed to the executable.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The value following `flag` in the argument list, if present.
    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .windows(2)
            .find(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_os_str())
    }
}

impl fmt::Display for StageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

fn gpu_flag(use_gpu: bool) -> &'static str {
    if use_gpu {
        "1"
    } else {
        "0"
    }
}

/// `colmap feature_extractor`: detect SIFT features of every image into the database.
///
/// With `single_camera` set all images share one set of intrinsics.
pub fn feature_extractor(
    options: &ColmapOptions,
    layout: &ExperimentLayout,
    camera_model: CameraModel,
    single_camera: bool,
) -> StageCommand {
    let command = StageCommand::new(&options.colmap_binary)
        .arg("feature_extractor")
        .opt("--database_path", layout.database_path())
        .opt("--image_path", layout.images_dir())
        .opt("--ImageReader.camera_model", camera_model.as_str());

    let command = if single_camera {
        command.opt("--ImageReader.single_camera", "1")
    } else {
        command
    };

    command.opt("--SiftExtraction.use_gpu", gpu_flag(options.use_gpu))
}

/// `colmap exhaustive_matcher`: match the features of every image pair in the database.
pub fn exhaustive_matcher(options: &ColmapOptions, layout: &ExperimentLayout) -> StageCommand {
    StageCommand::new(&options.colmap_binary)
        .arg("exhaustive_matcher")
        .opt("--database_path", layout.database_path())
        .opt("--SiftMatching.use_gpu", gpu_flag(options.use_gpu))
}

/// `colmap point_triangulator`: triangulate points for the known poses in `pose_dir`.
pub fn point_triangulator(
    options: &ColmapOptions,
    layout: &ExperimentLayout,
    pose_dir: &Path,
) -> StageCommand {
    StageCommand::new(&options.colmap_binary)
        .arg("point_triangulator")
        .opt("--database_path", layout.database_path())
        .opt("--image_path", layout.images_dir())
        .opt("--input_path", pose_dir)
        .opt("--output_path", layout.sparse_model_dir())
}

/// `colmap mapper`: estimate poses and structure incrementally.
///
/// COLMAP writes one numbered model per reconstructed component below `sparse/`.
pub fn mapper(options: &ColmapOptions, layout: &ExperimentLayout) -> StageCommand {
    StageCommand::new(&options.colmap_binary)
        .arg("mapper")
        .opt("--database_path", layout.database_path())
        .opt("--image_path", layout.images_dir())
        .opt("--output_path", layout.sparse_dir())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{exhaustive_matcher, feature_extractor, mapper, point_triangulator, StageCommand};
    use crate::{camera::CameraModel, layout::ExperimentLayout, options::ColmapOptions};

    fn layout() -> ExperimentLayout {
        ExperimentLayout::from_absolute("/data/experiment")
    }

    #[test]
    fn display_joins_arguments() {
        let command = StageCommand::new("colmap").arg("mapper").opt("--image_path", "/x");
        assert_eq!(command.to_string(), "colmap mapper --image_path /x");
        assert_eq!(
            command.value_of("--image_path").and_then(|v| v.to_str()),
            Some("/x")
        );
        assert_eq!(command.value_of("--output_path"), None);
    }

    #[test]
    fn feature_extractor_arguments() {
        let command = feature_extractor(
            &ColmapOptions::default(),
            &layout(),
            CameraModel::SimplePinhole,
            false,
        );
        assert_eq!(
            command.to_string(),
            "colmap feature_extractor \
             --database_path /data/experiment/database.db \
             --image_path /data/experiment/images \
             --ImageReader.camera_model SIMPLE_PINHOLE \
             --SiftExtraction.use_gpu 1"
        );
    }

    #[test]
    fn feature_extractor_single_camera_without_gpu() {
        let options = ColmapOptions {
            use_gpu: false,
            ..Default::default()
        };
        let command = feature_extractor(&options, &layout(), CameraModel::OpenCv, true);
        assert_eq!(
            command.value_of("--ImageReader.camera_model"),
            Some("OPENCV".as_ref())
        );
        assert_eq!(
            command.value_of("--ImageReader.single_camera"),
            Some("1".as_ref())
        );
        assert_eq!(
            command.value_of("--SiftExtraction.use_gpu"),
            Some("0".as_ref())
        );
    }

    #[test]
    fn matcher_and_triangulator_arguments() {
        let options = ColmapOptions {
            colmap_binary: PathBuf::from("/opt/colmap/bin/colmap"),
            ..Default::default()
        };
        let matcher = exhaustive_matcher(&options, &layout());
        assert_eq!(
            matcher.to_string(),
            "/opt/colmap/bin/colmap exhaustive_matcher \
             --database_path /data/experiment/database.db \
             --SiftMatching.use_gpu 1"
        );

        let pose_dir = PathBuf::from("/data/experiment/manual");
        let triangulator = point_triangulator(&options, &layout(), &pose_dir);
        assert_eq!(
            triangulator.to_string(),
            "/opt/colmap/bin/colmap point_triangulator \
             --database_path /data/experiment/database.db \
             --image_path /data/experiment/images \
             --input_path /data/experiment/manual \
             --output_path /data/experiment/sparse/0"
        );
    }

    #[test]
    fn mapper_writes_below_sparse() {
        let command = mapper(&ColmapOptions::default(), &layout());
        assert_eq!(command.args()[0], "mapper");
        assert_eq!(
            command.value_of("--output_path"),
            Some("/data/experiment/sparse".as_ref())
        );
    }
}
