//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (black holes by index, collections in insertion order)
//! - No rendering, audio or platform dependencies

pub mod black_hole;
pub mod collision;
pub mod projectile;
pub mod ring;
pub mod star;
pub mod state;
pub mod tick;

pub use black_hole::{BlackHole, HoleId};
pub use collision::{HoleHit, circles_overlap, projectile_hole_pass, reflect_velocity, resolve_hit};
pub use projectile::{HitRing, Projectile, SlowDebuff, SplitBurst, Weapon, WeaponTuning};
pub use ring::ParticleRing;
pub use star::{Drift, Star, StarMode, StarTint, StarTransition};
pub use state::{Player, SimEvent, World, WorldSnapshot};
pub use tick::{TickInput, tick};
