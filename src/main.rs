//! Event Horizon headless driver
//!
//! Runs a scripted play session against the simulation at a fixed tick rate
//! and prints the final frame as JSON. Usage: `event-horizon [settings.json]`

use event_horizon::Settings;
use event_horizon::sim::{SimEvent, TickInput, Weapon, World, tick};

/// Scripted input: sweep the aim, hold fire, strafe, cycle weapons now and then
fn scripted_input(t: u32) -> TickInput {
    let phase = t % 240;
    TickInput {
        right: phase < 60,
        down: (60..120).contains(&phase),
        left: (120..180).contains(&phase),
        up: phase >= 180,
        aim_deg: Some(((t % 180) * 2) as f32),
        fire: true,
        cycle_weapon: t % 150 == 149,
        wave_up: phase < 30,
        wave_down: (120..150).contains(&phase),
        ..Default::default()
    }
}

#[derive(Debug, Default)]
struct EventTotals {
    fired: [u32; 3],
    hits: [u32; 3],
    captures: u32,
    releases: u32,
    weapon_changes: u32,
}

impl EventTotals {
    fn record(&mut self, event: &SimEvent) {
        let slot = |w: Weapon| Weapon::ALL.iter().position(|x| *x == w).unwrap_or(0);
        match *event {
            SimEvent::ProjectileFired { weapon, .. } => self.fired[slot(weapon)] += 1,
            SimEvent::BlackHoleHit { weapon, .. } => self.hits[slot(weapon)] += 1,
            SimEvent::StarCaptured { .. } => self.captures += 1,
            SimEvent::StarReleased { .. } => self.releases += 1,
            SimEvent::WeaponChanged(_) => self.weapon_changes += 1,
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Event Horizon (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };

    let mut world = World::new(&settings);
    let mut totals = EventTotals::default();

    for t in 0..settings.demo_ticks {
        for event in tick(&mut world, &scripted_input(t)) {
            totals.record(&event);
        }
    }

    for (i, weapon) in Weapon::ALL.iter().enumerate() {
        log::info!(
            "{}: {} fired, {} hits",
            weapon.as_str(),
            totals.fired[i],
            totals.hits[i]
        );
    }
    log::info!(
        "{} ticks: {} captures, {} releases, {} weapon changes, {} stars orbiting",
        world.time_ticks,
        totals.captures,
        totals.releases,
        totals.weapon_changes,
        world.orbiting_star_count()
    );
    for (i, hole) in world.black_holes.iter().enumerate() {
        log::info!("Black hole {}: radius {:.2} at {:?}", i, hole.radius(), hole.pos);
    }

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            std::process::exit(1);
        }
    }
}
