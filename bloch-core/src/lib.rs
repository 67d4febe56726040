/// Bloch Core Library - Shared projection and scene logic
///
/// This library provides the host-independent part of the Bloch sphere
/// visualiser: sphere sampling, the fixed view projection, frame composition
/// onto an abstract drawing surface and the throttled tick loop.

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod view;

// Re-export commonly used types
pub use animation::{Animator, FrameThrottle};
pub use config::VisualiserConfig;
pub use error::{BlochError, BlochResult, ConfigError};
pub use geometry::{Point2D, Point3D};
pub use scene::{Scene, SceneStyle};
pub use surface::{Color, DrawCommand, DrawingSurface, RecordingSurface, Stroke};
pub use view::{AngleUnit, StateVectorAngles, ViewState};
