//! Avoid Spikes entry point
//!
//! Runs a headless autopilot session, logs what happens and prints the final
//! frame as JSON. Pass a settings file path to override the defaults.

use std::path::PathBuf;

use avoid_spikes::consts::SIM_DT;
use avoid_spikes::sim::GameEvent;
use avoid_spikes::{GameLoop, Settings};

/// Simulated seconds per demo run
const DEMO_SECONDS: f32 = 30.0;

fn main() {
    env_logger::init();
    log::info!("Avoid Spikes (native) starting...");

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => Settings::default(),
    };

    let mut game = GameLoop::new(settings);
    game.set_idle_mode(true);

    let frames = (DEMO_SECONDS / SIM_DT).round() as u32;
    for _ in 0..frames {
        game.update(SIM_DT);
        for event in game.drain_events() {
            match event {
                GameEvent::GameOver { score } => log::info!("Game over, final score {}", score),
                GameEvent::MainLabelHidden => log::info!("Start label hidden"),
                other => log::debug!("{:?}", other),
            }
        }
        if !game.is_alive() {
            break;
        }
    }

    let state = game.state();
    println!(
        "Survived {:.1}s, score {}, {} spikes on screen",
        state.time_ticks as f32 * SIM_DT,
        state.score,
        state.spikes.len()
    );

    match serde_json::to_string_pretty(&game.frame()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize frame: {}", e),
    }
}
