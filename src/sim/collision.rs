//! Projectile vs black hole collision detection and response
//!
//! Detection is a circle overlap test. Response is one function driven by the
//! weapon's [`WeaponTuning`], so adding a weapon means adding a table row.

use glam::Vec2;

use super::black_hole::{BlackHole, HoleId};
use super::projectile::{HitRing, Projectile, Weapon};
use super::ring::ParticleRing;

/// A resolved projectile impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleHit {
    pub hole: HoleId,
    pub weapon: Weapon,
    /// Whether the hit started a new flash (false while cooling down)
    pub flashed: bool,
    /// Projectile position at impact
    pub point: Vec2,
}

/// Circle overlap (touching counts)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Apply one projectile's hit to one hole
///
/// `move_input` is the player's raw movement input direction; heavy shots
/// knock the hole along it rather than along the impact direction.
/// Fragments from split bursts are appended to `spawned`.
pub fn resolve_hit(
    projectile: &mut Projectile,
    hole: &mut BlackHole,
    move_input: Vec2,
    rings: &mut Vec<ParticleRing>,
    spawned: &mut Vec<Projectile>,
) -> bool {
    let tuning = projectile.weapon.tuning();
    let pre_hit_radius = hole.radius();

    hole.apply_damage(tuning.damage);
    if tuning.knockback > 0.0 {
        hole.apply_knockback(move_input, tuning.knockback);
    }
    if let Some(slow) = tuning.slow {
        hole.apply_slow(slow.ticks, slow.factor);
    }
    let flashed = hole.flash();

    match tuning.ring {
        HitRing::HoleRim => rings.push(ParticleRing::capped(hole.pos, pre_hit_radius)),
        HitRing::Impact => rings.push(ParticleRing::unbounded(projectile.pos)),
        HitRing::None => {}
    }

    if let Some(burst) = tuning.split.filter(|_| !projectile.fragment) {
        let normal = (projectile.pos - hole.pos).normalize_or_zero();
        let normal = if normal == Vec2::ZERO {
            -projectile.vel.normalize_or_zero()
        } else {
            normal
        };
        let bounced = reflect_velocity(projectile.vel, normal);
        let base = bounced.y.atan2(bounced.x);
        let speed = projectile.vel.length() * burst.speed_scale;
        let radius = projectile.radius * burst.radius_scale;
        let origin = hole.pos + normal * (hole.radius() + radius + 1.0);
        let mid = (burst.count as f32 - 1.0) / 2.0;

        for i in 0..burst.count {
            let offset = (i as f32 - mid) * burst.spread_deg.to_radians();
            spawned.push(Projectile::fragment(origin, base + offset, speed, radius, projectile));
        }
        log::debug!("Split burst: {} fragments at {:?}", burst.count, origin);
    }

    if projectile.increment_pierce() >= tuning.pierce_limit {
        projectile.kill();
    }
    flashed
}

/// Run the projectile × hole pass for one tick
///
/// Each live projectile resolves against at most one hole (the first it
/// newly overlaps, in hole order). A hole keeps counting as one hit until the
/// projectile leaves it, so a pierce shot passes through instead of dying in
/// its first target. Dead projectiles are compacted out afterwards and
/// fragments join the list, so neither is visited twice this tick.
pub fn projectile_hole_pass(
    projectiles: &mut Vec<Projectile>,
    holes: &mut [BlackHole],
    move_input: Vec2,
    rings: &mut Vec<ParticleRing>,
) -> Vec<HoleHit> {
    let mut hits = Vec::new();
    let mut spawned = Vec::new();

    for projectile in projectiles.iter_mut() {
        if !projectile.alive {
            continue;
        }
        let (pos, radius) = (projectile.pos, projectile.radius);
        let touches = |h: &BlackHole| circles_overlap(pos, radius, h.pos, h.radius());
        projectile
            .inside_holes
            .retain(|id| holes.get(id.0).is_some_and(touches));

        let target = holes
            .iter()
            .enumerate()
            .position(|(i, h)| !projectile.inside_holes.contains(&HoleId(i)) && touches(h));
        if let Some(i) = target {
            projectile.inside_holes.push(HoleId(i));
            let point = projectile.pos;
            let flashed = resolve_hit(projectile, &mut holes[i], move_input, rings, &mut spawned);
            hits.push(HoleHit {
                hole: HoleId(i),
                weapon: projectile.weapon,
                flashed,
                point,
            });
        }
    }

    projectiles.retain(|p| p.alive);
    projectiles.append(&mut spawned);
    hits
}
