//! Host-facing game loop
//!
//! The host calls `update` once per display frame with the elapsed wall
//! time; the loop turns that into whole simulation ticks.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{SceneFrame, build_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// A running scene plus its frame accumulator
pub struct GameLoop {
    state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl GameLoop {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: GameState::new(settings),
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Queue a pointer/touch move (scene coordinates) for the next tick
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.input.pointer_moves.push(pos);
    }

    /// Let the autopilot steer the player
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Run one tick immediately, consuming queued pointer moves
    pub fn step(&mut self) {
        tick(&mut self.state, &self.input);
        self.input.pointer_moves.clear();
    }

    /// Advance by a frame's worth of wall time. Returns the ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() {
            log::warn!("Ignoring frame with dt {}", frame_dt);
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Drawable snapshot of the current scene
    pub fn frame(&self) -> SceneFrame {
        build_frame(&self.state)
    }
}
