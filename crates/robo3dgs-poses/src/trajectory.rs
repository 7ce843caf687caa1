use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

use crate::{error::PoseError, keyframe::CameraKeyframe};

/// A sweep of a camera along the y axis, turning in place at every stop.
///
/// Angles follow the Blender convention the manual pose sets were authored in: the
/// camera looks down its -z axis and the Euler angles are applied z first, then x, then y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// First y position.
    pub start_y: f64,
    /// Positions stop before reaching this y.
    pub end_y: f64,
    /// Distance between two positions.
    pub step_y: f64,
    /// Height of the camera above the ground plane.
    pub height: f64,
    /// Rotation about x, in degrees. 90 looks at the horizon.
    pub tilt_deg: f64,
    /// Number of evenly spaced headings per position.
    pub rotations_per_position: u32,
    /// Camera id written for every image.
    pub camera_id: u32,
    /// Extension of the image file names.
    pub image_extension: String,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            start_y: -1.0,
            end_y: 3.0,
            step_y: 0.1,
            height: 1.0,
            tilt_deg: 80.0,
            rotations_per_position: 8,
            camera_id: 1,
            image_extension: "jpg".to_string(),
        }
    }
}

impl TrajectoryConfig {
    /// The y coordinates of the camera stops.
    ///
    /// Positions are derived from their index so the count does not depend on rounding
    /// accumulated over the sweep.
    ///
    /// # Errors
    ///
    /// The bounds or the step are not finite, the step is not positive, or the sweep
    /// has more stops than `u32` frame ids can number.
    pub fn positions(&self) -> Result<Vec<f64>, PoseError> {
        let count = self.position_count()?;

        Ok((0..count)
            .map(|k| self.start_y + k as f64 * self.step_y)
            .collect())
    }

    /// Number of stops of the sweep, checked before anything is allocated.
    fn position_count(&self) -> Result<usize, PoseError> {
        if !(self.step_y.is_finite() && self.step_y > 0.0) {
            return Err(PoseError::InvalidStep(self.step_y));
        }
        if !(self.start_y.is_finite() && self.end_y.is_finite()) {
            return Err(PoseError::InvalidRange {
                start: self.start_y,
                end: self.end_y,
            });
        }

        let span = (self.end_y - self.start_y) / self.step_y;
        if span <= 0.0 {
            return Ok(0);
        }

        let count = (span - 1e-9).ceil();
        let total = count * f64::from(self.rotations_per_position.max(1));
        if !count.is_finite() || total > f64::from(u32::MAX) {
            return Err(PoseError::TooManyKeyframes(total));
        }

        Ok(count as usize)
    }
}

/// World-to-camera pose of a camera placed at `location` with Blender Euler angles
/// `(tilt, 0, heading)` interpreted in `ZXY` order.
pub fn camera_pose(location: DVec3, tilt: f64, heading: f64) -> (DQuat, DVec3) {
    // ZXY order: z is applied first, then x, then y, i.e. R = Ry * Rx * Rz
    let rotation = DQuat::from_euler(EulerRot::YXZ, 0.0, tilt, heading);

    let mirrored = DVec3::new(location.x, location.y, -location.z);
    let translation = rotation * -mirrored;

    (rotation, translation)
}

/// Generate the keyframes of the trajectory, numbered from 1.
///
/// # Example
///
/// ```
/// use robo3dgs_poses::{generate_keyframes, TrajectoryConfig};
///
/// let keyframes = generate_keyframes(&TrajectoryConfig::default()).unwrap();
/// assert_eq!(keyframes.len(), 40 * 8);
/// assert_eq!(keyframes[0].name, "0001.jpg");
/// ```
pub fn generate_keyframes(config: &TrajectoryConfig) -> Result<Vec<CameraKeyframe>, PoseError> {
    if config.rotations_per_position == 0 {
        return Err(PoseError::NoRotations);
    }

    let tilt = config.tilt_deg.to_radians();
    let n = config.rotations_per_position;

    let positions = config.positions()?;
    let mut keyframes = Vec::with_capacity(positions.len() * n as usize);

    for (k, y) in positions.into_iter().enumerate() {
        for i in 0..n {
            // bounded by the keyframe count check in positions
            let frame = (k as u32) * n + i + 1;
            let heading = 2.0 * i as f64 * std::f64::consts::PI / n as f64;
            let location = DVec3::new(0.0, y, config.height);
            let (rotation, translation) = camera_pose(location, tilt, heading);

            keyframes.push(CameraKeyframe {
                frame,
                rotation,
                translation,
                camera_id: config.camera_id,
                name: format!("{:04}.{}", frame, config.image_extension),
            });
        }
    }

    Ok(keyframes)
}
