//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame in a fixed order:
//! player → stars → weapons → projectiles → holes → hits → rings.

use glam::Vec2;

use super::collision::projectile_hole_pass;
use super::projectile::{Projectile, Weapon};
use super::star::{Drift, StarTransition};
use super::state::{SimEvent, World};
use crate::consts::*;
use crate::normalize_degrees;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Absolute aim (degrees), e.g. from the mouse
    pub aim_deg: Option<f32>,
    /// Keyboard aim nudges
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    /// Fire is held
    pub fire: bool,
    /// Cycle weapon is held
    pub cycle_weapon: bool,
    /// Direct weapon pick
    pub select_weapon: Option<Weapon>,
    /// Wave amplitude up/down is held
    pub wave_up: bool,
    pub wave_down: bool,
}

impl TickInput {
    /// Raw movement direction from the flags (opposing flags cancel)
    pub fn move_dir(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the world by one tick, returning what happened
pub fn tick(world: &mut World, input: &TickInput) -> Vec<SimEvent> {
    let mut events = Vec::new();
    world.time_ticks += 1;

    // 1. Player
    let move_dir = input.move_dir();
    update_player(world, input, move_dir);

    // 2. Stars
    let drift = Drift {
        bounds: world.bounds,
        player_vel: world.player.vel,
        aim_deg: world.player.aim_deg,
    };
    for star in world.stars.iter_mut() {
        match star.update(&mut world.black_holes, &mut world.rings, &drift, &mut world.rng) {
            Some(StarTransition::Captured(hole)) => {
                log::debug!("Star captured by hole {}", hole.0);
                events.push(SimEvent::StarCaptured { hole });
            }
            Some(StarTransition::Released(hole)) => {
                log::debug!("Star released from hole {}", hole.0);
                events.push(SimEvent::StarReleased { hole });
            }
            None => {}
        }
    }

    // 3. Weapons
    update_weapons(world, input, &mut events);

    // 4. Projectiles
    let bounds = world.bounds;
    for projectile in world.projectiles.iter_mut() {
        projectile.update();
    }
    world.projectiles.retain(|p| !p.is_offscreen(bounds));

    // 5. Black holes
    for hole in world.black_holes.iter_mut() {
        hole.update(bounds);
    }

    // 6. Hits
    let hits = projectile_hole_pass(
        &mut world.projectiles,
        &mut world.black_holes,
        move_dir,
        &mut world.rings,
    );
    events.extend(hits.iter().map(|hit| SimEvent::BlackHoleHit {
        weapon: hit.weapon,
        hole: hit.hole,
    }));

    // 7. Rings
    for ring in world.rings.iter_mut() {
        ring.update();
    }
    world.rings.retain(|r| r.is_alive());

    // holes moved and shrank after the star pass
    world.resolve_orbits();

    events
}

fn update_player(world: &mut World, input: &TickInput, move_dir: Vec2) {
    let player = &mut world.player;

    if let Some(aim) = input.aim_deg.filter(|a| a.is_finite()) {
        player.aim_deg = normalize_degrees(aim);
    }
    if input.rotate_cw {
        player.nudge_aim(AIM_NUDGE_DEG);
    }
    if input.rotate_ccw {
        player.nudge_aim(-AIM_NUDGE_DEG);
    }

    if input.wave_up {
        player.nudge_wave_amp(WAVE_AMP_STEP);
    }
    if input.wave_down {
        player.nudge_wave_amp(-WAVE_AMP_STEP);
    }
    player.advance_spin();

    player.apply_movement(move_dir, world.bounds);
}

fn update_weapons(world: &mut World, input: &TickInput, events: &mut Vec<SimEvent>) {
    let player = &mut world.player;
    player.switch_cooldown = player.switch_cooldown.saturating_sub(1);
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);

    let mut new_weapon = input.select_weapon.filter(|w| *w != player.weapon);
    if new_weapon.is_none() && input.cycle_weapon && player.switch_cooldown == 0 {
        new_weapon = Some(player.weapon.next());
        player.switch_cooldown = world.weapon_switch_ticks;
    }
    if let Some(weapon) = new_weapon {
        log::info!("Weapon: {} -> {}", player.weapon.as_str(), weapon.as_str());
        player.weapon = weapon;
        events.push(SimEvent::WeaponChanged(weapon));
    }

    if input.fire && player.fire_cooldown == 0 {
        let angle = player.aim_deg.to_radians();
        world.projectiles.push(Projectile::new(
            player.muzzle(),
            angle,
            player.weapon,
            player.wave_amp,
        ));
        player.fire_cooldown = world.fire_interval_ticks;
        events.push(SimEvent::ProjectileFired {
            weapon: player.weapon,
            player_pos: player.pos,
            aim_deg: player.aim_deg,
        });
    }
}
