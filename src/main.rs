//! Shmup headless runner
//!
//! Builds a world from optional JSON settings and drives it with scripted
//! input at a fixed timestep, logging the HUD as it goes.
//!
//! Usage: `shmup [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use shmup::Settings;
    use shmup::sim::{SpriteSheet, TickInput, World};

    /// Fixed timestep (60 Hz)
    const DT: f32 = 1.0 / 60.0;
    /// One minute of play
    const TICKS: u32 = 60 * 60;

    env_logger::init();
    log::info!("Shmup (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Settings::from_json(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("{path}: {e}, using defaults");
                    Settings::default()
                }
            },
            Err(e) => {
                log::error!("could not read {path}: {e}, using defaults");
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut world = match World::new(Arc::new(SpriteSheet::standard()), settings, seed) {
        Ok(world) => world,
        Err(e) => {
            log::error!("cannot build world: {e}");
            std::process::exit(1);
        }
    };

    for tick in 0..TICKS {
        let input = scripted_input(tick);
        world.tick(&input, DT);

        if tick % 60 == 0 {
            let hud = world.hud();
            log::info!(
                "t={:>3}s health={}/{} mode={} score={} visible={}",
                tick / 60,
                hud.health,
                hud.max_health,
                hud.fire_mode.as_str(),
                hud.score,
                world.sprite_instances().len()
            );
        }
        if !world.player().is_alive() {
            log::info!("player destroyed after {} ticks", tick + 1);
            break;
        }
    }

    let hud = world.hud();
    let enemies = world.enemies().iter().filter(|e| e.is_alive()).count();
    let asteroids = world.asteroids().iter().filter(|a| a.is_alive()).count();
    println!(
        "seed {seed}: score {} health {} enemies left {enemies} asteroids left {asteroids}",
        hud.score, hud.health
    );

    /// Cruise in a slow circle, cycling fire modes every ten seconds
    fn scripted_input(tick: u32) -> TickInput {
        let second = tick / 60;
        TickInput {
            thrust_forward: second % 4 != 3,
            thrust_backward: second % 4 == 3,
            turn_left: false,
            turn_right: tick % 3 == 0,
            fire: tick % 30 < 20,
            change_fire_mode: tick % 600 == 599,
            toggle_debug: false,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is embedded by the caller
}
