//! Background stars
//!
//! Stars drift with parallax against the player's motion, fall toward black
//! holes that come close, and get locked onto a hole's rim once they touch it.
//! A captured star only remembers *which* hole holds it; holes keep no list of
//! their stars.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::black_hole::{BlackHole, HoleId};
use super::ring::ParticleRing;
use crate::consts::*;
use crate::{heading, normalize_angle};

/// Cosmetic star color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarTint {
    Cyan,
    Magenta,
    Yellow,
    White,
    Pink,
}

impl StarTint {
    /// Weighted pick: white is the most common, yellow and pink the rarest
    fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..9u32) {
            0 | 5 => StarTint::Cyan,
            1 | 6 => StarTint::Magenta,
            2 => StarTint::Yellow,
            4 => StarTint::Pink,
            _ => StarTint::White,
        }
    }
}

/// Free drift or locked to a hole's rim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StarMode {
    Free,
    Orbiting { hole: HoleId, angle: f32 },
}

/// Per-tick drift inputs derived from the player
#[derive(Debug, Clone, Copy)]
pub struct Drift {
    pub bounds: Vec2,
    pub player_vel: Vec2,
    /// Player aim (degrees)
    pub aim_deg: f32,
}

/// What happened to a star this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarTransition {
    Captured(HoleId),
    Released(HoleId),
}

/// A background particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    /// World position; while orbiting, a point on the hole's rim
    pub pos: Vec2,
    pub vel: Vec2,
    /// Parallax factor (closer stars move more)
    pub parallax: f32,
    pub size: f32,
    pub tint: StarTint,
    pub mode: StarMode,
}

impl Star {
    /// Random star somewhere in the wrap region
    pub fn spawn<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        let parallax = STAR_PARALLAX_MIN + rng.random::<f32>() * STAR_PARALLAX_SPAN;
        Self {
            pos: random_position(bounds, rng),
            vel: Vec2::ZERO,
            parallax,
            size: 1.0 + parallax * 2.0,
            tint: StarTint::roll(rng),
            mode: StarMode::Free,
        }
    }

    pub fn is_orbiting(&self) -> bool {
        matches!(self.mode, StarMode::Orbiting { .. })
    }

    /// Hole this star orbits, if any
    pub fn orbit_hole(&self) -> Option<HoleId> {
        match self.mode {
            StarMode::Orbiting { hole, .. } => Some(hole),
            StarMode::Free => None,
        }
    }

    /// Where the star should be drawn given the current holes
    pub fn resolved_position(&self, holes: &[BlackHole]) -> Vec2 {
        match self.mode {
            StarMode::Orbiting { hole, angle } => holes
                .get(hole.0)
                .map_or(self.pos, |h| h.rim_point(angle)),
            StarMode::Free => self.pos,
        }
    }

    /// Move to a fresh random spot clear of every gravity well and drift freely
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: Vec2, holes: &[BlackHole], rng: &mut R) {
        let mut pos = random_position(bounds, rng);
        for _ in 1..RELEASE_PLACEMENT_TRIES {
            if clear_of_holes(pos, holes) {
                break;
            }
            pos = random_position(bounds, rng);
        }
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.mode = StarMode::Free;
    }

    /// Advance one tick
    ///
    /// Captures call [`BlackHole::absorb_star`] and push a ring into `rings`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        holes: &mut [BlackHole],
        rings: &mut Vec<ParticleRing>,
        drift: &Drift,
        rng: &mut R,
    ) -> Option<StarTransition> {
        match self.mode {
            StarMode::Orbiting { hole, angle } => self.update_orbit(hole, angle, holes, drift, rng),
            StarMode::Free => self.update_free(holes, rings, drift),
        }
    }

    fn update_orbit<R: Rng + ?Sized>(
        &mut self,
        id: HoleId,
        angle: f32,
        holes: &[BlackHole],
        drift: &Drift,
        rng: &mut R,
    ) -> Option<StarTransition> {
        let Some(hole) = holes.get(id.0) else {
            self.mode = StarMode::Free;
            return None;
        };

        let speed = ORBIT_BASE_SPEED + hole.radius() * ORBIT_SPEED_PER_RADIUS;
        let angle = normalize_angle(angle + speed);
        self.pos = hole.rim_point(angle);
        self.mode = StarMode::Orbiting { hole: id, angle };

        if rng.random_bool(ORBIT_RELEASE_CHANCE) {
            self.reset(drift.bounds, holes, rng);
            return Some(StarTransition::Released(id));
        }
        None
    }

    fn update_free(
        &mut self,
        holes: &mut [BlackHole],
        rings: &mut Vec<ParticleRing>,
        drift: &Drift,
    ) -> Option<StarTransition> {
        for (i, hole) in holes.iter_mut().enumerate() {
            let to_hole = hole.pos - self.pos;
            let dist = to_hole.length();
            let r = hole.radius();
            if dist >= r * GRAVITY_RANGE {
                continue;
            }

            if dist > 1e-6 {
                let strength = (r * GRAVITY_STRENGTH) / (dist * dist + 1.0);
                self.vel += to_hole / dist * strength;
            }

            if dist <= r * CAPTURE_RADIUS_FACTOR {
                let angle = if dist > 1e-6 {
                    let away = -to_hole;
                    away.y.atan2(away.x)
                } else {
                    0.0
                };
                rings.push(ParticleRing::capped(hole.pos, r));
                hole.absorb_star();
                self.pos = hole.rim_point(angle);
                self.vel = Vec2::ZERO;
                let id = HoleId(i);
                self.mode = StarMode::Orbiting { hole: id, angle };
                return Some(StarTransition::Captured(id));
            }
        }

        self.pos += self.vel;

        // parallax against the player, plus a draft opposite the aim
        self.pos -= drift.player_vel * self.parallax * STAR_PLAYER_DRIFT;
        self.pos -= heading(drift.aim_deg) * self.parallax * STAR_DRAFT;

        self.wrap(drift.bounds);
        None
    }

    fn wrap(&mut self, bounds: Vec2) {
        let m = STAR_WRAP_MARGIN;
        let span = bounds + Vec2::splat(m * 2.0);

        if self.pos.x < -m {
            self.pos.x += span.x;
        } else if self.pos.x > bounds.x + m {
            self.pos.x -= span.x;
        }

        if self.pos.y < -m {
            self.pos.y += span.y;
        } else if self.pos.y > bounds.y + m {
            self.pos.y -= span.y;
        }
    }
}

fn random_position<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Vec2 {
    let m = STAR_WRAP_MARGIN;
    Vec2::new(
        rng.random::<f32>() * (bounds.x + m * 2.0) - m,
        rng.random::<f32>() * (bounds.y + m * 2.0) - m,
    )
}

fn clear_of_holes(pos: Vec2, holes: &[BlackHole]) -> bool {
    holes
        .iter()
        .all(|h| h.pos.distance(pos) >= h.radius() * GRAVITY_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(1200.0, 800.0);

    fn still() -> Drift {
        Drift {
            bounds: BOUNDS,
            player_vel: Vec2::ZERO,
            aim_deg: 0.0,
        }
    }

    fn star_at(pos: Vec2) -> Star {
        Star {
            pos,
            vel: Vec2::ZERO,
            parallax: 0.5,
            size: 2.0,
            tint: StarTint::White,
            mode: StarMode::Free,
        }
    }

    #[test]
    fn test_spawn_within_wrap_region() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let s = Star::spawn(BOUNDS, &mut rng);
            assert!(s.pos.x >= -STAR_WRAP_MARGIN && s.pos.x <= BOUNDS.x + STAR_WRAP_MARGIN);
            assert!(s.pos.y >= -STAR_WRAP_MARGIN && s.pos.y <= BOUNDS.y + STAR_WRAP_MARGIN);
            assert!(s.parallax >= 0.2 && s.parallax < 1.2);
            assert!((s.size - (1.0 + s.parallax * 2.0)).abs() < 1e-6);
            assert!(!s.is_orbiting());
        }
    }

    #[test]
    fn test_draft_opposite_aim() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut star = star_at(Vec2::new(600.0, 400.0));
        let mut rings = Vec::new();
        star.update(&mut [], &mut rings, &still(), &mut rng);
        // aim 0° pushes the star toward -x by parallax * draft
        assert!((star.pos.x - (600.0 - 0.5 * STAR_DRAFT)).abs() < 1e-4);
        assert!((star.pos.y - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_parallax_opposite_player_velocity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut star = star_at(Vec2::new(600.0, 400.0));
        let drift = Drift {
            player_vel: Vec2::new(0.0, 8.0),
            aim_deg: 90.0,
            ..still()
        };
        star.update(&mut [], &mut Vec::new(), &drift, &mut rng);
        let expected_y = 400.0 - 8.0 * 0.5 * STAR_PLAYER_DRIFT - 0.5 * STAR_DRAFT;
        assert!((star.pos.y - expected_y).abs() < 1e-3);
    }

    #[test]
    fn test_wraps_at_margin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut star = star_at(Vec2::new(-19.0, 400.0));
        star.update(&mut [], &mut Vec::new(), &still(), &mut rng);
        // moved 2.5 left past -20, wrapped by the full span
        assert!((star.pos.x - (-21.5 + BOUNDS.x + 40.0)).abs() < 1e-3);
    }

    #[test]
    fn test_gravity_pulls_within_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut holes = [BlackHole::new(Vec2::new(600.0, 400.0), 20.0)];
        let mut star = star_at(Vec2::new(680.0, 400.0));
        star.update(&mut holes, &mut Vec::new(), &still(), &mut rng);
        assert!(star.vel.x < 0.0);
        assert_eq!(star.vel.y, 0.0);

        let mut far = star_at(Vec2::new(600.0, 520.0));
        far.update(&mut holes, &mut Vec::new(), &still(), &mut rng);
        assert_eq!(far.vel, Vec2::ZERO);
    }

    #[test]
    fn test_capture_snaps_to_rim_once() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut holes = [BlackHole::new(Vec2::new(600.0, 400.0), 20.0)];
        let mut rings = Vec::new();
        let mut star = star_at(Vec2::new(600.0, 420.0));

        let t = star.update(&mut holes, &mut rings, &still(), &mut rng);
        assert_eq!(t, Some(StarTransition::Captured(HoleId(0))));
        assert!(star.is_orbiting());
        assert_eq!(holes[0].radius(), 21.0);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].max_radius, Some(20.0));
        assert!((star.pos.distance(holes[0].pos) - holes[0].radius()).abs() < 1e-3);

        // already orbiting: no further captures, no growth, no rings
        for _ in 0..50 {
            let t = star.update(&mut holes, &mut rings, &still(), &mut rng);
            assert!(!matches!(t, Some(StarTransition::Captured(_))));
            if !star.is_orbiting() {
                break;
            }
            let d = star.pos.distance(holes[0].pos);
            assert!((d - holes[0].radius()).abs() < 1e-3);
        }
        assert_eq!(holes[0].radius(), 21.0);
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn test_orbit_advances_angle() {
        let mut rng = Pcg32::seed_from_u64(2);
        let holes = [BlackHole::new(Vec2::new(100.0, 100.0), 40.0)];
        let mut star = star_at(Vec2::ZERO);
        star.mode = StarMode::Orbiting {
            hole: HoleId(0),
            angle: 0.0,
        };
        star.update_orbit(HoleId(0), 0.0, &holes, &still(), &mut rng);
        if let StarMode::Orbiting { angle, .. } = star.mode {
            assert!((angle - (ORBIT_BASE_SPEED + 40.0 * ORBIT_SPEED_PER_RADIUS)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_missing_hole_releases() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut star = star_at(Vec2::new(5.0, 5.0));
        star.mode = StarMode::Orbiting {
            hole: HoleId(4),
            angle: 1.0,
        };
        star.update(&mut [], &mut Vec::new(), &still(), &mut rng);
        assert!(!star.is_orbiting());
    }

    #[test]
    fn test_reset_avoids_holes() {
        let mut rng = Pcg32::seed_from_u64(11);
        let holes = [BlackHole::new(Vec2::new(600.0, 400.0), 60.0)];
        let mut star = star_at(Vec2::new(600.0, 400.0));
        star.mode = StarMode::Orbiting {
            hole: HoleId(0),
            angle: 0.0,
        };
        for _ in 0..50 {
            star.reset(BOUNDS, &holes, &mut rng);
            assert!(!star.is_orbiting());
            assert_eq!(star.vel, Vec2::ZERO);
            assert!(clear_of_holes(star.pos, &holes));
        }
    }

    #[test]
    fn test_orbit_eventually_releases_clear_of_holes() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut holes = [BlackHole::new(Vec2::new(600.0, 400.0), 20.0)];
        let mut rings = Vec::new();
        let mut star = star_at(Vec2::new(620.0, 400.0));
        star.mode = StarMode::Orbiting {
            hole: HoleId(0),
            angle: 0.0,
        };

        let mut released = false;
        for _ in 0..20_000 {
            match star.update(&mut holes, &mut rings, &still(), &mut rng) {
                Some(StarTransition::Released(id)) => {
                    assert_eq!(id, HoleId(0));
                    released = true;
                    break;
                }
                Some(other) => panic!("unexpected transition {other:?}"),
                None => assert!(star.is_orbiting()),
            }
        }

        assert!(released);
        assert!(!star.is_orbiting());
        assert_eq!(star.vel, Vec2::ZERO);
        assert!(clear_of_holes(star.pos, &holes));
        assert!(rings.is_empty());
        assert_eq!(holes[0].radius(), 20.0);
    }

    #[test]
    fn test_resolved_position_tracks_moving_hole() {
        let mut holes = [BlackHole::new(Vec2::new(100.0, 100.0), 30.0)];
        let mut star = star_at(Vec2::ZERO);
        star.mode = StarMode::Orbiting {
            hole: HoleId(0),
            angle: 0.0,
        };
        holes[0].pos = Vec2::new(150.0, 100.0);
        assert_eq!(star.resolved_position(&holes), Vec2::new(180.0, 100.0));
    }
}
