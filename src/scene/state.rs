use crate::error::ViewerError;
use crate::ui::input::{Action, InputSnapshot};
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

/// Which lighting equation is bound for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingModel {
    /// Per-fragment, reflected-ray specular.
    #[default]
    Phong,
    /// Per-fragment, half-vector specular.
    BlinnPhong,
    /// Per-vertex lighting interpolated across faces.
    Gouraud,
}

impl ShadingModel {
    /// Specular exponent applied when this model is selected.
    pub fn default_shininess(self) -> f32 {
        match self {
            ShadingModel::Phong => 32.0,
            ShadingModel::BlinnPhong => 45.0,
            ShadingModel::Gouraud => 20.0,
        }
    }
}

impl fmt::Display for ShadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShadingModel::Phong => "Phong",
            ShadingModel::BlinnPhong => "Blinn-Phong",
            ShadingModel::Gouraud => "Gouraud",
        })
    }
}

impl FromStr for ShadingModel {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phong" => Ok(ShadingModel::Phong),
            "blinn-phong" | "blinn_phong" | "blinnphong" => Ok(ShadingModel::BlinnPhong),
            "gouraud" => Ok(ShadingModel::Gouraud),
            _ => Err(ViewerError::UnsupportedShader(s.to_string())),
        }
    }
}

/// Color channel targeted by the increase/decrease controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChannel {
    #[default]
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    fn index(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
        }
    }
}

/// Rates and limits applied by [`InteractionState::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlTuning {
    /// Radians per second.
    pub rotation_speed: f32,
    /// World units per second.
    pub zoom_speed: f32,
    /// Added to or removed from a color channel per frame.
    pub color_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            rotation_speed: 2.0,
            zoom_speed: 10.0,
            color_step: 0.01,
            min_distance: 1.5,
            max_distance: 40.0,
        }
    }
}

/// Mutable session state driven by keyboard input.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    /// Rotation about +Y in radians. Unbounded.
    pub angle_y: f32,
    /// Rotation about +Z in radians. Unbounded.
    pub angle_z: f32,
    /// Eye distance from the origin, kept within the tuning limits.
    pub camera_distance: f32,

    pub shading: ShadingModel,
    pub shininess: f32,

    /// Object color. Channels are not clamped.
    pub color: Vector3<f32>,
    pub channel: ColorChannel,

    pub tuning: ControlTuning,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(
            ControlTuning::default(),
            8.0 * 27.0_f32.sqrt(),
            ShadingModel::Phong,
            Vector3::new(1.0, 0.0, 0.0),
        )
    }
}

impl InteractionState {
    pub fn new(
        tuning: ControlTuning,
        initial_distance: f32,
        shading: ShadingModel,
        color: Vector3<f32>,
    ) -> Self {
        Self {
            angle_y: 0.0,
            angle_z: 0.0,
            camera_distance: initial_distance.clamp(tuning.min_distance, tuning.max_distance),
            shading,
            shininess: shading.default_shininess(),
            color,
            channel: ColorChannel::Red,
            tuning,
        }
    }

    /// Advances the state by one frame.
    ///
    /// Rules run in a fixed order: orbit, zoom, channel select, shader select,
    /// color adjust. Color steps are per frame and ignore `dt`.
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) {
        let t = self.tuning;
        let turn = t.rotation_speed * dt;

        if input.is_held(Action::RotateLeft) {
            self.angle_y -= turn;
        }
        if input.is_held(Action::RotateRight) {
            self.angle_y += turn;
        }
        if input.is_held(Action::TiltUp) {
            self.angle_z += turn;
        }
        if input.is_held(Action::TiltDown) {
            self.angle_z -= turn;
        }

        if input.is_held(Action::ZoomIn) {
            self.camera_distance -= t.zoom_speed * dt;
        }
        if input.is_held(Action::ZoomOut) {
            self.camera_distance += t.zoom_speed * dt;
        }
        self.camera_distance = self.camera_distance.clamp(t.min_distance, t.max_distance);

        for (action, channel) in [
            (Action::SelectRed, ColorChannel::Red),
            (Action::SelectGreen, ColorChannel::Green),
            (Action::SelectBlue, ColorChannel::Blue),
        ] {
            if input.is_held(action) {
                self.channel = channel;
            }
        }

        for (action, model) in [
            (Action::UsePhong, ShadingModel::Phong),
            (Action::UseBlinnPhong, ShadingModel::BlinnPhong),
            (Action::UseGouraud, ShadingModel::Gouraud),
        ] {
            if input.is_held(action) {
                self.shading = model;
                self.shininess = model.default_shininess();
            }
        }

        let channel = self.channel.index();
        if input.is_held(Action::Increase) {
            self.color[channel] += t.color_step;
        }
        if input.is_held(Action::Decrease) {
            self.color[channel] -= t.color_step;
        }
    }
}
