//! World state and core simulation types
//!
//! The [`World`] owns every entity collection; cross-entity interactions are
//! sequenced only by [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::black_hole::{BlackHole, HoleId};
use super::projectile::{Projectile, Weapon};
use super::ring::ParticleRing;
use super::star::Star;
use crate::consts::*;
use crate::settings::Settings;
use crate::{heading, normalize_degrees};

/// Outgoing notifications for audio and other listeners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A shot left the muzzle
    ProjectileFired {
        weapon: Weapon,
        player_pos: Vec2,
        aim_deg: f32,
    },
    /// A projectile struck a black hole
    BlackHoleHit { weapon: Weapon, hole: HoleId },
    /// Player switched weapons
    WeaponChanged(Weapon),
    /// A star locked onto a hole's rim
    StarCaptured { hole: HoleId },
    /// An orbiting star broke free
    StarReleased { hole: HoleId },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Aim direction (degrees, [0, 360))
    pub aim_deg: f32,
    pub weapon: Weapon,
    /// Wave-shape amplitude stamped onto fired projectiles
    pub wave_amp: f32,
    /// Cosmetic spin (radians)
    pub spin: f32,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    /// Ticks until the next weapon cycle is allowed
    pub switch_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            aim_deg: 0.0,
            weapon: Weapon::default(),
            wave_amp: WAVE_AMP_DEFAULT,
            spin: 0.0,
            fire_cooldown: 0,
            switch_cooldown: 0,
        }
    }

    /// Accelerate along `input`, cap speed, apply friction, move, bounce off walls
    pub fn apply_movement(&mut self, input: Vec2, bounds: Vec2) {
        self.vel += input * PLAYER_ACCEL;
        self.vel = self.vel.clamp_length_max(PLAYER_MAX_SPEED);
        self.vel *= PLAYER_FRICTION;
        self.pos += self.vel;

        let r = self.radius;
        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.vel.x = -self.vel.x;
        } else if self.pos.x + r > bounds.x {
            self.pos.x = bounds.x - r;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y - r < 0.0 {
            self.pos.y = r;
            self.vel.y = -self.vel.y;
        } else if self.pos.y + r > bounds.y {
            self.pos.y = bounds.y - r;
            self.vel.y = -self.vel.y;
        }
    }

    pub fn nudge_aim(&mut self, delta_deg: f32) {
        self.aim_deg = normalize_degrees(self.aim_deg + delta_deg);
    }

    pub fn nudge_wave_amp(&mut self, delta: f32) {
        self.wave_amp = (self.wave_amp + delta).clamp(WAVE_AMP_MIN, WAVE_AMP_MAX);
    }

    /// Advance the cosmetic spin (faster at higher amplitude)
    pub fn advance_spin(&mut self) {
        self.spin = (self.spin + self.wave_amp * SPIN_RATE).rem_euclid(std::f32::consts::TAU);
    }

    /// Projectile spawn point, just outside the hull along the aim
    pub fn muzzle(&self) -> Vec2 {
        self.pos + heading(self.aim_deg) * (self.radius + MUZZLE_OFFSET)
    }
}

/// Read-only copy of a frame for renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub bounds: Vec2,
    pub player: Player,
    pub black_holes: Vec<BlackHole>,
    /// Orbiting stars are placed on their hole's current rim
    pub stars: Vec<Star>,
    pub projectiles: Vec<Projectile>,
    pub rings: Vec<ParticleRing>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the RNG was built from
    pub seed: u64,
    pub bounds: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Never shrinks; [`HoleId`]s index into it
    pub black_holes: Vec<BlackHole>,
    pub stars: Vec<Star>,
    pub projectiles: Vec<Projectile>,
    pub rings: Vec<ParticleRing>,
    pub fire_interval_ticks: u32,
    pub weapon_switch_ticks: u32,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Build the starting world described by `settings`
    pub fn new(settings: &Settings) -> Self {
        let bounds = Vec2::new(settings.width, settings.height);
        let mut world = Self::empty(bounds, settings.seed);
        world.fire_interval_ticks = settings.fire_interval_ticks;
        world.weapon_switch_ticks = settings.weapon_switch_ticks;

        world.black_holes = settings
            .black_holes
            .iter()
            .map(|spawn| {
                let mut hole = BlackHole::new(Vec2::new(spawn.x, spawn.y), spawn.radius)
                    .with_velocity(Vec2::new(spawn.vx, spawn.vy));
                hole.set_ambient_glow(settings.ambient_glow as i32);
                hole
            })
            .collect();

        let rng = &mut world.rng;
        world.stars = (0..settings.star_count)
            .map(|_| Star::spawn(bounds, &mut *rng))
            .collect();

        log::info!(
            "World {}x{} seed={:#x}: {} black holes, {} stars",
            bounds.x,
            bounds.y,
            settings.seed,
            world.black_holes.len(),
            world.stars.len()
        );
        world
    }

    /// A world with only the player in it
    pub fn empty(bounds: Vec2, seed: u64) -> Self {
        Self {
            seed,
            bounds,
            time_ticks: 0,
            player: Player::new(bounds / 2.0),
            black_holes: Vec::new(),
            stars: Vec::new(),
            projectiles: Vec::new(),
            rings: Vec::new(),
            fire_interval_ticks: FIRE_INTERVAL_TICKS,
            weapon_switch_ticks: WEAPON_SWITCH_TICKS,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Add a black hole, returning its handle
    pub fn add_black_hole(&mut self, hole: BlackHole) -> HoleId {
        self.black_holes.push(hole);
        HoleId(self.black_holes.len() - 1)
    }

    pub fn black_hole(&self, id: HoleId) -> Option<&BlackHole> {
        self.black_holes.get(id.0)
    }

    pub fn orbiting_star_count(&self) -> usize {
        self.stars.iter().filter(|s| s.is_orbiting()).count()
    }

    /// Displace `point` by every hole's lensing, in hole order
    pub fn lensing_offset(&self, point: Vec2) -> Vec2 {
        self.black_holes
            .iter()
            .fold(point, |p, hole| hole.lensing_offset(p))
    }

    /// Snap every orbiting star onto its hole's current rim
    pub fn resolve_orbits(&mut self) {
        for star in self.stars.iter_mut().filter(|s| s.is_orbiting()) {
            star.pos = star.resolved_position(&self.black_holes);
        }
    }

    /// Owned copy of the current frame
    pub fn snapshot(&self) -> WorldSnapshot {
        let stars = self
            .stars
            .iter()
            .map(|s| {
                let mut star = s.clone();
                star.pos = s.resolved_position(&self.black_holes);
                star
            })
            .collect();

        WorldSnapshot {
            tick: self.time_ticks,
            bounds: self.bounds,
            player: self.player.clone(),
            black_holes: self.black_holes.clone(),
            stars,
            projectiles: self.projectiles.clone(),
            rings: self.rings.clone(),
        }
    }
}
