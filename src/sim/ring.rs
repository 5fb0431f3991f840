//! Expanding, fading particle rings
//!
//! Purely cosmetic. Spawned by orbit captures and projectile impacts, consumed
//! by the renderer, culled by the tick once the alpha hits zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A transient ring marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleRing {
    pub center: Vec2,
    pub radius: f32,
    pub expansion: f32,
    pub alpha: f32,
    /// Outline width, thins while a capped ring fades
    pub stroke: f32,
    /// Stop growing here and fade out; `None` grows until faded
    pub max_radius: Option<f32>,
}

impl ParticleRing {
    /// A ring that grows until its alpha runs out
    pub fn unbounded(center: Vec2) -> Self {
        Self {
            center,
            radius: RING_START_RADIUS,
            expansion: RING_EXPANSION,
            alpha: RING_START_ALPHA,
            stroke: RING_STROKE,
            max_radius: None,
        }
    }

    /// A ring that locks at `max_radius`
    ///
    /// A non-positive or non-finite cap would break the growth fade rate, so
    /// it falls back to an unbounded ring.
    pub fn capped(center: Vec2, max_radius: f32) -> Self {
        let mut ring = Self::unbounded(center);
        if max_radius.is_finite() && max_radius > 0.0 {
            ring.max_radius = Some(max_radius);
        } else {
            log::warn!("Ring max radius {} rejected, spawning unbounded ring", max_radius);
        }
        ring
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    /// True once a capped ring has reached its max radius
    pub fn is_locked(&self) -> bool {
        self.max_radius.is_some_and(|max| self.radius >= max)
    }

    pub fn update(&mut self) {
        match self.max_radius {
            Some(max) if self.radius >= max => {
                self.radius = max;
                self.alpha = (self.alpha - RING_LOCKED_FADE).max(0.0);
                if self.stroke > RING_STROKE_MIN {
                    self.stroke -= RING_STROKE_THIN;
                }
            }
            Some(max) => {
                self.radius = (self.radius + self.expansion).min(max);
                self.alpha = (self.alpha - RING_GROW_FADE / max).max(0.0);
            }
            None => {
                self.radius += self.expansion;
                self.alpha = (self.alpha - RING_UNBOUNDED_FADE).max(0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_state() {
        let ring = ParticleRing::capped(Vec2::new(5.0, 5.0), 30.0);
        assert_eq!(ring.radius, 1.0);
        assert_eq!(ring.alpha, 200.0);
        assert_eq!(ring.max_radius, Some(30.0));
        assert!(ring.is_alive());
    }

    #[test]
    fn test_zero_cap_falls_back_to_unbounded() {
        assert_eq!(ParticleRing::capped(Vec2::ZERO, 0.0).max_radius, None);
        assert_eq!(ParticleRing::capped(Vec2::ZERO, f32::NAN).max_radius, None);
    }

    #[test]
    fn test_growth_fade_rate() {
        let mut ring = ParticleRing::capped(Vec2::ZERO, 25.0);
        ring.update();
        assert_eq!(ring.radius, 4.0);
        assert!((ring.alpha - 198.0).abs() < 1e-4);
    }

    #[test]
    fn test_locked_ring_thins_and_dies() {
        let mut ring = ParticleRing::capped(Vec2::ZERO, 4.0);
        ring.update();
        assert!(ring.is_locked());
        let alpha = ring.alpha;
        ring.update();
        assert_eq!(ring.radius, 4.0);
        assert!((ring.alpha - (alpha - 7.0)).abs() < 1e-4);
        assert!((ring.stroke - 1.8).abs() < 1e-5);

        for _ in 0..100 {
            ring.update();
        }
        assert_eq!(ring.alpha, 0.0);
        assert!(!ring.is_alive());
        assert!(ring.stroke <= RING_STROKE_MIN + 1e-4);
        assert!(ring.stroke > 0.0);
    }

    #[test]
    fn test_unbounded_ring_fades_on_fixed_schedule() {
        let mut ring = ParticleRing::unbounded(Vec2::ZERO);
        let ticks = (RING_START_ALPHA / RING_UNBOUNDED_FADE).ceil() as usize;
        for _ in 0..ticks - 1 {
            ring.update();
            assert!(ring.is_alive());
        }
        ring.update();
        assert!(!ring.is_alive());
        assert_eq!(ring.radius, 1.0 + 3.0 * ticks as f32);
    }

    proptest! {
        #[test]
        fn prop_ring_locks_at_max(max in 2u32..120) {
            let max = max as f32;
            let mut ring = ParticleRing::capped(Vec2::ZERO, max);
            let steps = ((max - 1.0) / 3.0).ceil() as usize;
            for _ in 0..steps {
                ring.update();
            }
            prop_assert_eq!(ring.radius, max);

            let mut last_alpha = ring.alpha;
            for _ in 0..10 {
                ring.update();
                prop_assert_eq!(ring.radius, max);
                prop_assert!(ring.alpha <= last_alpha);
                if last_alpha > 0.0 {
                    prop_assert!(ring.alpha < last_alpha);
                }
                last_alpha = ring.alpha;
            }
        }
    }
}
