use crate::error::ViewerError;
use crate::scene::light::{DirectionalLight, SceneLighting};
use crate::scene::state::{ControlTuning, InteractionState, ShadingModel};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Session configuration. Every field has a default, so an empty file (or
/// no file at all) yields the standard viewer setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub shading: ShadingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: usize,
    /// Per-axis supersampling factor (1 = off).
    #[serde(default = "default_samples")]
    pub samples: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
            samples: default_samples(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_title() -> String {
    "Mesh Viewer".to_string()
}
fn default_target_fps() -> usize {
    60
}
fn default_samples() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_initial_distance")]
    pub initial_distance: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            initial_distance: default_initial_distance(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
        }
    }
}

fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_initial_distance() -> f32 {
    // |(3, 3, 3)| * 8
    41.569_22
}
fn default_min_distance() -> f32 {
    1.5
}
fn default_max_distance() -> f32 {
    40.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlsConfig {
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
    #[serde(default = "default_color_step")]
    pub color_step: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotation_speed: default_rotation_speed(),
            zoom_speed: default_zoom_speed(),
            color_step: default_color_step(),
        }
    }
}

fn default_rotation_speed() -> f32 {
    2.0
}
fn default_zoom_speed() -> f32 {
    10.0
}
fn default_color_step() -> f32 {
    0.01
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightingConfig {
    /// Direction the light travels.
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
    #[serde(default = "default_ambient_strength")]
    pub ambient_strength: f32,
    #[serde(default = "default_background")]
    pub background: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            color: default_light_color(),
            ambient_strength: default_ambient_strength(),
            background: default_background(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [-0.2, -1.0, -0.3]
}
fn default_light_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_ambient_strength() -> f32 {
    0.1
}
fn default_background() -> [f32; 3] {
    [0.2, 0.2, 0.2]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShadingConfig {
    /// "phong", "blinn-phong" or "gouraud".
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_object_color")]
    pub object_color: [f32; 3],
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            object_color: default_object_color(),
        }
    }
}

fn default_model() -> String {
    "phong".to_string()
}
fn default_object_color() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ViewerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ViewerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ViewerError> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 || w.samples == 0 {
            return Err(ViewerError::Config(
                "window width, height and samples must be positive".to_string(),
            ));
        }
        let c = &self.camera;
        let l = &self.lighting;
        let k = &self.controls;
        ensure_finite("camera.fov", &[c.fov])?;
        ensure_finite("camera.near / camera.far", &[c.near, c.far])?;
        ensure_finite(
            "camera distances",
            &[c.initial_distance, c.min_distance, c.max_distance],
        )?;
        ensure_finite("controls", &[k.rotation_speed, k.zoom_speed, k.color_step])?;
        ensure_finite("lighting.direction", &l.direction)?;
        ensure_finite("lighting.color", &l.color)?;
        ensure_finite("lighting.ambient_strength", &[l.ambient_strength])?;
        ensure_finite("lighting.background", &l.background)?;
        ensure_finite("shading.object_color", &self.shading.object_color)?;

        if !(c.fov > 0.0 && c.fov < 180.0) {
            return Err(ViewerError::Config(format!(
                "camera fov {} must lie strictly between 0 and 180 degrees",
                c.fov
            )));
        }
        if l.direction.iter().all(|&v| v == 0.0) {
            return Err(ViewerError::Config(
                "lighting direction must be non-zero".to_string(),
            ));
        }
        if !(c.min_distance > 0.0 && c.min_distance <= c.max_distance) {
            return Err(ViewerError::Config(format!(
                "camera distance range [{}, {}] is empty",
                c.min_distance, c.max_distance
            )));
        }
        if !(c.near > 0.0 && c.near < c.far) {
            return Err(ViewerError::Config(format!(
                "camera clip range [{}, {}] is invalid",
                c.near, c.far
            )));
        }
        self.shading.model.parse::<ShadingModel>()?;
        Ok(())
    }

    pub fn tuning(&self) -> ControlTuning {
        ControlTuning {
            rotation_speed: self.controls.rotation_speed,
            zoom_speed: self.controls.zoom_speed,
            color_step: self.controls.color_step,
            min_distance: self.camera.min_distance,
            max_distance: self.camera.max_distance,
        }
    }

    pub fn lighting(&self) -> SceneLighting {
        let l = &self.lighting;
        SceneLighting {
            light: DirectionalLight::new(l.direction.into(), l.color.into()),
            ambient_strength: l.ambient_strength,
            background: l.background.into(),
        }
    }

    /// Session state at startup.
    pub fn initial_state(&self) -> Result<InteractionState, ViewerError> {
        Ok(InteractionState::new(
            self.tuning(),
            self.camera.initial_distance,
            self.shading.model.parse()?,
            self.shading.object_color.into(),
        ))
    }
}

fn ensure_finite(name: &str, values: &[f32]) -> Result<(), ViewerError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(ViewerError::Config(format!("{name} must be finite, got {v}"))),
        None => Ok(()),
    }
}
