//! Progress tracking for an animated layer turn.

use crate::geometry::Axis;
use crate::moves::Move;

/// Cubic ease-in-out on `t` in `0.0..=1.0`.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// A layer turn in flight.
#[derive(Clone, Debug)]
pub struct ActiveRotation {
    pub mv: Move,
    pub axis: Axis,
    /// Index of the turning layer along `axis`.
    pub layer: i32,
    /// Signed final angle in radians, +-90 degrees.
    pub target_angle: f32,
    /// Fraction of the turn completed. Only ever increases.
    pub progress: f32,
    /// Indices of the pieces grouped into the turning layer.
    pub pieces: Vec<usize>,
}

impl ActiveRotation {
    /// Advances progress by `delta` seconds of a `duration`-second turn.
    ///
    /// Returns true once the turn has completed.
    pub fn advance(&mut self, delta: f32, duration: f32) -> bool {
        self.progress += delta.max(0.0) / duration;
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Angle to display for the current progress.
    pub fn visual_angle(&self, easing: bool) -> f32 {
        if self.is_complete() {
            return self.target_angle;
        }
        let t = if easing {
            ease_in_out_cubic(self.progress)
        } else {
            self.progress
        };
        self.target_angle * t
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::moves::{Direction, Face};

    fn rotation() -> ActiveRotation {
        ActiveRotation {
            mv: Move::new(Face::Up, Direction::Clockwise),
            axis: Axis::Y,
            layer: 2,
            target_angle: -FRAC_PI_2,
            progress: 0.0,
            pieces: Vec::new(),
        }
    }

    #[test]
    fn test_easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn test_easing_is_monotonic() {
        let samples: Vec<f32> = (0..=100).map(|i| ease_in_out_cubic(i as f32 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_advance_completes_after_duration() {
        let mut rotation = rotation();
        assert!(!rotation.advance(0.05, 0.15));
        assert!(!rotation.advance(0.05, 0.15));
        assert!(rotation.advance(0.06, 0.15));
        assert_eq!(rotation.visual_angle(true), -FRAC_PI_2);
    }

    #[test]
    fn test_negative_delta_never_rewinds() {
        let mut rotation = rotation();
        rotation.advance(0.075, 0.15);
        let before = rotation.progress;
        rotation.advance(-1.0, 0.15);
        assert_eq!(rotation.progress, before);
    }

    #[test]
    fn test_visual_angle_follows_easing() {
        let mut rotation = rotation();
        rotation.advance(0.0375, 0.15);
        assert!((rotation.visual_angle(false) - (-FRAC_PI_2 * 0.25)).abs() < 1e-6);
        assert!((rotation.visual_angle(true) - (-FRAC_PI_2 * 0.0625)).abs() < 1e-6);
    }
}
