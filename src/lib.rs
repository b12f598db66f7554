//! Avoid Spikes - a single-screen arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scheduler, physics contacts, game state)
//! - `game`: Fixed-timestep loop the host drives once per frame
//! - `renderer`: Drawable scene snapshot handed to the host
//! - `settings`: Scene dimensions and timings

pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::GameLoop;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the loop (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player square
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Player row, measured up from the bottom of the scene
    pub const PLAYER_ROW: f32 = 100.0;
    /// Most pointer stops the autopilot weighs per tick
    pub const AUTOPILOT_CANDIDATES: u32 = 64;
    /// Where a dead player is parked so it no longer takes part
    pub const OFFSCREEN_X: f32 = -200.0;

    /// Spikes fall to this y and are then removed
    pub const SPIKE_TARGET_Y: f32 = -200.0;

    /// Ground strip height
    pub const GROUND_HEIGHT: f32 = 150.0;

    /// Main label
    pub const MAIN_LABEL_FONT_SIZE: f32 = 100.0;
    pub const GAME_OVER_FONT_SIZE: f32 = 75.0;
    pub const MAIN_LABEL_OFFSET_Y: f32 = 150.0;
    pub const START_TEXT: &str = "Start!";
    pub const GAME_OVER_TEXT: &str = "Game Over";

    /// Score label
    pub const SCORE_LABEL_FONT_SIZE: f32 = 50.0;
    pub const SCORE_LABEL_Y: f32 = 25.0;

    /// Palette
    pub const BACKGROUND_COLOR: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
    pub const OFF_WHITE: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const OFF_BLACK: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    ((secs / consts::SIM_DT).round() as u32).max(1)
}

/// Text shown by the score label
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}
