use std::io::Write;

use glam::{DQuat, DVec3};

use crate::error::PoseError;

/// A camera pose in COLMAP's world-to-camera convention.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraKeyframe {
    /// Image id, starting at 1.
    pub frame: u32,
    /// Rotation from world to camera.
    pub rotation: DQuat,
    /// Translation from world to camera.
    pub translation: DVec3,
    /// Camera id in `cameras.txt`.
    pub camera_id: u32,
    /// Image file name.
    pub name: String,
}

impl CameraKeyframe {
    /// Format the keyframe as the pose line of `images.txt`.
    ///
    /// IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME
    pub fn to_images_txt_line(&self) -> String {
        let (q, t) = (self.rotation, self.translation);
        format!(
            "{} {:.6} {:.6} {:.6} {:.6} {:.6} {:.6} {:.6} {} {}",
            self.frame, q.w, q.x, q.y, q.z, t.x, t.y, t.z, self.camera_id, self.name
        )
    }
}

/// Write `keyframes` as a COLMAP `images.txt`.
///
/// The points2D line of every image is left empty, COLMAP fills it during triangulation.
pub fn write_images_txt(
    mut writer: impl Write,
    keyframes: &[CameraKeyframe],
) -> Result<(), PoseError> {
    writeln!(writer, "# Image list with two lines of data per image:")?;
    writeln!(
        writer,
        "#   IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME"
    )?;
    writeln!(writer, "#   POINTS2D[] as (X, Y, POINT3D_ID)")?;
    writeln!(
        writer,
        "# Number of images: {}, mean observations per image: 0",
        keyframes.len()
    )?;

    for keyframe in keyframes {
        writeln!(writer, "{}", keyframe.to_images_txt_line())?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
