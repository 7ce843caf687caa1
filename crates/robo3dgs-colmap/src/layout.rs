use std::path::{Path, PathBuf};

use crate::error::LayoutError;

/// Files making up a manual pose set, in COLMAP's text model format.
pub const POSE_FILES: [&str; 3] = ["cameras.txt", "images.txt", "points3D.txt"];

/// Paths of an experiment directory.
///
/// ```text
/// experiment/
///   input/           original images
///   manual/          cameras.txt, images.txt, points3D.txt (or config/)
///   images/          prepared images
///   database.db      COLMAP feature database
///   sparse/0/        cameras.bin, images.bin, points3D.bin
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentLayout {
    root: PathBuf,
}

impl ExperimentLayout {
    /// Resolve `source` to an absolute experiment root.
    ///
    /// The downstream trainer locates the experiment by absolute path, so every path
    /// handed to external tools derives from the resolved root.
    pub fn resolve(source: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let source = source.as_ref();
        if !source.is_dir() {
            return Err(LayoutError::MissingRoot(source.to_path_buf()));
        }
        let root = source.canonicalize()?;
        Ok(Self { root })
    }

    /// Use `root` as is, without touching the file system.
    pub fn from_absolute(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The experiment root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the original images.
    pub fn input_dir(&self) -> PathBuf {
        self.root.join("input")
    }

    /// Directory holding the images COLMAP and the trainer read.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Directory the Gaussian Splatting converter uses for undistortion input.
    pub fn distorted_dir(&self) -> PathBuf {
        self.root.join("distorted")
    }

    /// The COLMAP feature database.
    pub fn database_path(&self) -> PathBuf {
        self.root.join("database.db")
    }

    /// Parent directory of the sparse models.
    pub fn sparse_dir(&self) -> PathBuf {
        self.root.join("sparse")
    }

    /// The sparse model the trainer reads.
    pub fn sparse_model_dir(&self) -> PathBuf {
        self.sparse_dir().join("0")
    }

    /// Entries that must not exist before preprocessing, in the order they are reported.
    pub fn state_entries(&self) -> [PathBuf; 4] {
        [
            self.sparse_dir(),
            self.images_dir(),
            self.distorted_dir(),
            self.database_path(),
        ]
    }

    /// The reconstruction state entries already present in the experiment.
    pub fn dirty_entries(&self) -> Vec<PathBuf> {
        self.state_entries()
            .into_iter()
            .filter(|path| is_present(path))
            .collect()
    }

    /// Fail if any reconstruction state is already present.
    ///
    /// Running into an existing `sparse/`, `images/`, `distorted/` or `database.db` would
    /// mix the new reconstruction with the old one.
    pub fn ensure_clean(&self) -> Result<(), LayoutError> {
        let entries = self.dirty_entries();
        if entries.is_empty() {
            Ok(())
        } else {
            Err(LayoutError::NotClean {
                root: self.root.clone(),
                entries,
            })
        }
    }

    /// Locate the manual pose set, preferring `manual/` over `config/`.
    ///
    /// The files are only checked for presence, their content is left to COLMAP.
    pub fn pose_dir(&self) -> Result<PathBuf, LayoutError> {
        let manual = self.root.join("manual");
        let config = self.root.join("config");

        let dir = if manual.is_dir() {
            manual
        } else if config.is_dir() {
            config
        } else {
            return Err(LayoutError::MissingPoseSet(manual));
        };

        for file in POSE_FILES {
            let path = dir.join(file);
            if !path.is_file() {
                return Err(LayoutError::MissingPoseFile(path));
            }
        }

        Ok(dir)
    }

    /// Remove `sparse/` and `database.db` so the pipeline can be re-run.
    ///
    /// # Returns
    ///
    /// The entries that were removed. Missing entries are skipped.
    pub fn clear_reconstruction(&self) -> Result<Vec<PathBuf>, LayoutError> {
        let mut removed = Vec::new();

        let sparse = self.sparse_dir();
        if is_present(&sparse) {
            std::fs::remove_dir_all(&sparse)?;
            removed.push(sparse);
        }

        let database = self.database_path();
        if is_present(&database) {
            std::fs::remove_file(&database)?;
            removed.push(database);
        }

        for path in &removed {
            log::info!("removed {}", path.display());
        }

        Ok(removed)
    }
}

/// Whether `path` exists, counting a dangling symlink as present.
fn is_present(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
