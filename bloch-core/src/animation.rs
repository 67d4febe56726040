/// Tick throttling and the per-frame redraw driver
use tracing::debug;

use crate::error::BlochResult;
use crate::scene::Scene;
use crate::surface::DrawingSurface;

/// Minimum time (ms) between two drawn frames
pub const DEFAULT_MIN_INTERVAL_MS: f64 = 30.0;

/// Frame-rate cap measured from the last drawn frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameThrottle {
    min_interval_ms: f64,
    last_draw_timestamp: f64,
    time: f64,
}

impl FrameThrottle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_draw_timestamp: 0.0,
            time: 0.0,
        }
    }

    /// Accumulated animation time in milliseconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn last_draw_timestamp(&self) -> f64 {
        self.last_draw_timestamp
    }

    /// Feed a host timestamp (ms).
    ///
    /// Returns the animation time to draw with when more than the minimum
    /// interval has passed since the last drawn frame. The returned time is
    /// the total accumulated before this tick; the tick's delta is added
    /// afterwards.
    pub fn tick(&mut self, timestamp: f64) -> Option<f64> {
        let delta = timestamp - self.last_draw_timestamp;
        if delta > self.min_interval_ms {
            let draw_time = self.time;
            self.last_draw_timestamp = timestamp;
            self.time += delta;
            Some(draw_time)
        } else {
            None
        }
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL_MS)
    }
}

/// Owns the scene, the throttle and the surface it draws onto
pub struct Animator<S: DrawingSurface> {
    scene: Scene,
    throttle: FrameThrottle,
    surface: S,
    frames_drawn: u64,
}

impl<S: DrawingSurface> Animator<S> {
    pub fn new(scene: Scene, throttle: FrameThrottle, surface: S) -> Self {
        Self {
            scene,
            throttle,
            surface,
            frames_drawn: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn throttle(&self) -> &FrameThrottle {
        &self.throttle
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Handle one host tick; returns whether a frame was drawn
    pub fn tick(&mut self, timestamp: f64) -> BlochResult<bool> {
        let Some(time) = self.throttle.tick(timestamp) else {
            return Ok(false);
        };

        self.scene.draw(&mut self.surface, time)?;
        self.frames_drawn += 1;
        debug!(timestamp, time, frame = self.frames_drawn, "frame drawn");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn test_throttle_skips_short_deltas() {
        let mut throttle = FrameThrottle::default();
        let drawn: Vec<f64> = [0.0, 10.0, 25.0, 40.0]
            .into_iter()
            .filter(|&ts| throttle.tick(ts).is_some())
            .collect();

        assert_eq!(drawn, vec![40.0]);
        assert_eq!(throttle.last_draw_timestamp(), 40.0);
        assert_eq!(throttle.time(), 40.0);
    }

    #[test]
    fn test_throttle_measures_from_last_draw() {
        let mut throttle = FrameThrottle::default();
        assert_eq!(throttle.tick(31.0), Some(0.0));
        assert_eq!(throttle.tick(50.0), None);
        assert_eq!(throttle.tick(61.0), None);
        assert_eq!(throttle.tick(62.0), Some(31.0));
        assert_eq!(throttle.time(), 62.0);
    }

    #[test]
    fn test_throttle_threshold_is_exclusive() {
        let mut throttle = FrameThrottle::new(30.0);
        assert!(throttle.tick(30.0).is_none());
        assert!(throttle.tick(30.5).is_some());
    }

    #[test]
    fn test_animator_draws_only_when_throttle_allows() {
        let mut animator = Animator::new(
            Scene::default(),
            FrameThrottle::default(),
            RecordingSurface::new(),
        );

        for ts in [0.0, 10.0, 25.0, 40.0, 50.0, 100.0] {
            animator.tick(ts).unwrap();
        }

        assert_eq!(animator.frames_drawn(), 2);
        let clears = animator
            .surface()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count();
        assert_eq!(clears, 2);
        assert_eq!(animator.throttle().time(), 100.0);
    }
}
