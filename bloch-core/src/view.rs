/// Viewer orientation and state-vector angles
use serde::{Deserialize, Serialize};

/// How `alpha`/`beta` are fed to the projection's `cos`/`sin`.
///
/// `Raw` passes the stored numbers straight through, so the default
/// `alpha = 70` is read as 70 radians. `Degrees` converts them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Raw,
    Degrees,
}

impl AngleUnit {
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Raw => angle,
            AngleUnit::Degrees => angle.to_radians(),
        }
    }
}

/// Immutable view snapshot consumed by the projection functions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub alpha: f64,
    pub beta: f64,
    pub cx: f64,
    pub cy: f64,
    pub sphere_radius: f64,
    /// Azimuth offset (degrees) applied to the axes and the state vector
    pub sphere_rotation: f64,
    pub angle_unit: AngleUnit,
}

impl ViewState {
    pub fn new(alpha: f64, beta: f64, cx: f64, cy: f64, sphere_radius: f64) -> Self {
        Self {
            alpha,
            beta,
            cx,
            cy,
            sphere_radius,
            ..Self::default()
        }
    }

    /// Same view, re-centred on `(cx, cy)`
    pub fn centred_at(self, cx: f64, cy: f64) -> Self {
        Self { cx, cy, ..self }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            alpha: 70.0,
            beta: 0.0,
            cx: 1000.0,
            cy: 1000.0,
            sphere_radius: 800.0,
            sphere_rotation: 20.0,
            angle_unit: AngleUnit::Raw,
        }
    }
}

/// Polar angle and azimuth (degrees) of the displayed state arrow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateVectorAngles {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for StateVectorAngles {
    fn default() -> Self {
        Self {
            alpha: 140.0,
            beta: 45.0,
        }
    }
}
