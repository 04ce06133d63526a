//! デモの設定
//!
//! JSONまたはJSオブジェクトから読み込む。省略したフィールドは既定値になる。

use std::f32::consts::PI;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use village_scene::{ArcRotateCamera, AxisLength};
use village_scene::glam::Vec3;

use crate::error::{DemoError, Result};

/// カメラの初期値
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            alpha: -PI / 2.0,
            beta: PI / 2.5,
            radius: 15.0,
        }
    }
}

impl CameraConfig {
    pub fn to_camera(self) -> ArcRotateCamera {
        ArcRotateCamera::new(self.alpha, self.beta, self.radius, Vec3::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub global_axis_length: f32,
    pub local_axis_length: f32,
    pub label_texture_size: u32,
    /// 親子の箱とローカル/グローバル軸を組む
    pub show_axes_demo: bool,
    /// 地面と家並みを組む
    pub build_dwellings: bool,
    pub camera: CameraConfig,
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            global_axis_length: 6.0,
            local_axis_length: 1.0,
            label_texture_size: 50,
            show_axes_demo: true,
            build_dwellings: false,
            camera: CameraConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl DemoConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.global_axis()?;
        self.local_axis()?;
        if self.label_texture_size == 0 {
            return Err(DemoError::InvalidConfig("label_texture_size must be positive".into()));
        }
        let CameraConfig { alpha, beta, radius } = self.camera;
        if !(alpha.is_finite() && beta.is_finite()) {
            return Err(DemoError::InvalidConfig(format!(
                "camera angles must be finite, got alpha {alpha} beta {beta}"
            )));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(DemoError::InvalidConfig(format!(
                "camera radius must be positive, got {radius}"
            )));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn global_axis(&self) -> Result<AxisLength> {
        Ok(AxisLength::new(self.global_axis_length)?)
    }

    pub fn local_axis(&self) -> Result<AxisLength> {
        Ok(AxisLength::new(self.local_axis_length)?)
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| DemoError::InvalidConfig(format!("unknown log level {:?}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = DemoConfig::from_json("{}").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.global_axis().unwrap().get(), 6.0);
        assert_eq!(config.local_axis().unwrap().get(), 1.0);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_override() {
        let config =
            DemoConfig::from_json(r#"{"global_axis_length": 3.5, "camera": {"radius": 20}}"#).unwrap();
        assert_eq!(config.global_axis_length, 3.5);
        assert_eq!(config.camera.radius, 20.0);
        assert_eq!(config.camera.alpha, -PI / 2.0);
        assert!(config.show_axes_demo);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            DemoConfig::from_json(r#"{"global_axis_length": -1}"#),
            Err(DemoError::Scene(_))
        ));
        assert!(matches!(
            DemoConfig::from_json(r#"{"label_texture_size": 0}"#),
            Err(DemoError::InvalidConfig(_))
        ));
        assert!(matches!(
            DemoConfig::from_json(r#"{"log_level": "loud"}"#),
            Err(DemoError::InvalidConfig(_))
        ));
        assert!(matches!(DemoConfig::from_json("[1, 2"), Err(DemoError::Config(_))));
    }

    #[test]
    fn test_rejects_non_finite_camera_angles() {
        for camera in [
            CameraConfig { alpha: f32::NAN, ..CameraConfig::default() },
            CameraConfig { beta: f32::INFINITY, ..CameraConfig::default() },
        ] {
            let config = DemoConfig { camera, ..DemoConfig::default() };
            assert!(matches!(config.validate(), Err(DemoError::InvalidConfig(_))));
        }
        // f32 の範囲外
        assert!(DemoConfig::from_json(r#"{"camera": {"alpha": 1e300}}"#).is_err());
    }

    #[test]
    fn test_camera_from_config() {
        let camera = CameraConfig::default().to_camera();
        assert_eq!(camera, ArcRotateCamera::village_default());
    }
}
