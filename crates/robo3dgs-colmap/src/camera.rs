use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Represents a Colmap camera model, as passed to `--ImageReader.camera_model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraModel {
    /// Simple pinhole camera model
    #[default]
    #[serde(rename = "SIMPLE_PINHOLE")]
    SimplePinhole,
    /// Pinhole camera model
    #[serde(rename = "PINHOLE")]
    Pinhole,
    /// Simplified radial camera model
    #[serde(rename = "SIMPLE_RADIAL")]
    SimpleRadial,
    /// Radial camera model
    #[serde(rename = "RADIAL")]
    Radial,
    /// OpenCV camera model
    #[serde(rename = "OPENCV")]
    OpenCv,
    /// OpenCV fisheye camera model
    #[serde(rename = "OPENCV_FISHEYE")]
    OpenCvFisheye,
    /// Full OpenCV camera model
    #[serde(rename = "FULL_OPENCV")]
    FullOpenCv,
    /// Field of view camera model
    #[serde(rename = "FOV")]
    Fov,
    /// Simple radial fisheye camera model
    #[serde(rename = "SIMPLE_RADIAL_FISHEYE")]
    SimpleRadialFisheye,
    /// Radial fisheye camera model
    #[serde(rename = "RADIAL_FISHEYE")]
    RadialFisheye,
    /// Thin prism fisheye camera model
    #[serde(rename = "THIN_PRISM_FISHEYE")]
    ThinPrismFisheye,
}

impl CameraModel {
    /// Every model known to COLMAP, in COLMAP's id order.
    pub const ALL: [CameraModel; 11] = [
        CameraModel::SimplePinhole,
        CameraModel::Pinhole,
        CameraModel::SimpleRadial,
        CameraModel::Radial,
        CameraModel::OpenCv,
        CameraModel::OpenCvFisheye,
        CameraModel::FullOpenCv,
        CameraModel::Fov,
        CameraModel::SimpleRadialFisheye,
        CameraModel::RadialFisheye,
        CameraModel::ThinPrismFisheye,
    ];

    /// The name COLMAP uses on its command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraModel::SimplePinhole => "SIMPLE_PINHOLE",
            CameraModel::Pinhole => "PINHOLE",
            CameraModel::SimpleRadial => "SIMPLE_RADIAL",
            CameraModel::Radial => "RADIAL",
            CameraModel::OpenCv => "OPENCV",
            CameraModel::OpenCvFisheye => "OPENCV_FISHEYE",
            CameraModel::FullOpenCv => "FULL_OPENCV",
            CameraModel::Fov => "FOV",
            CameraModel::SimpleRadialFisheye => "SIMPLE_RADIAL_FISHEYE",
            CameraModel::RadialFisheye => "RADIAL_FISHEYE",
            CameraModel::ThinPrismFisheye => "THIN_PRISM_FISHEYE",
        }
    }
}

impl fmt::Display for CameraModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a camera model name is not known to COLMAP.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid camera model: {0}")]
pub struct UnknownCameraModel(pub String);

impl FromStr for CameraModel {
    type Err = UnknownCameraModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CameraModel::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCameraModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraModel, UnknownCameraModel};

    #[test]
    fn parse_camera_model() -> Result<(), UnknownCameraModel> {
        assert_eq!("OPENCV".parse::<CameraModel>()?, CameraModel::OpenCv);
        assert_eq!(
            "simple_pinhole".parse::<CameraModel>()?,
            CameraModel::SimplePinhole
        );
        assert!("PANORAMIC".parse::<CameraModel>().is_err());
        Ok(())
    }

    #[test]
    fn display_roundtrips_for_all_models() -> Result<(), UnknownCameraModel> {
        for model in CameraModel::ALL {
            assert_eq!(model.to_string().parse::<CameraModel>()?, model);
        }
        Ok(())
    }

    #[test]
    fn serde_uses_colmap_names() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_string(&CameraModel::FullOpenCv)?,
            "\"FULL_OPENCV\""
        );
        let model: CameraModel = serde_json::from_str("\"RADIAL_FISHEYE\"")?;
        assert_eq!(model, CameraModel::RadialFisheye);
        Ok(())
    }
}
