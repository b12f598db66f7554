//! Fixed timestep simulation tick
//!
//! One call to `tick` is one engine frame: pointer input, scheduled tasks,
//! spike animations, then contact resolution.

use glam::Vec2;

use super::physics::{Contact, PhysicsCategory};
use super::scheduler::TaskKind;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::score_text;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch moves since the last tick, oldest first
    pub pointer_moves: Vec<Vec2>,
    /// Idle/demo mode - autopilot steers the player
    pub idle_mode: bool,
}

/// Advance the scene by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    for &pos in &input.pointer_moves {
        apply_pointer(state, pos);
    }
    if input.idle_mode && state.is_alive() {
        if let Some(x) = autopilot_target(state) {
            let y = state.player.pos.y;
            apply_pointer(state, Vec2::new(x, y));
        }
    }

    state.time_ticks += 1;

    for task in state.scheduler.advance() {
        run_task(state, task);
    }

    advance_spikes(state);

    let entities = state.physics_entities();
    let contacts = state.contacts.step(&entities);
    for contact in &contacts {
        handle_contact(state, contact);
    }
}

/// Pointer moved: follow it horizontally while alive, park off-screen once dead
pub fn apply_pointer(state: &mut GameState, pos: Vec2) {
    state.player.pos.x = if state.is_alive() { pos.x } else { OFFSCREEN_X };
}

fn run_task(state: &mut GameState, task: TaskKind) {
    match task {
        TaskKind::SpawnSpike => {
            if state.is_alive() {
                state.spawn_spike();
            }
        }
        TaskKind::IncrementScore => {
            if state.is_alive() {
                state.score += 1;
                state.score_label.text = score_text(state.score);
                state.events.push(GameEvent::ScoreChanged { score: state.score });
            }
        }
        TaskKind::HideMainLabel => {
            state.main_label.alpha = 0.0;
            state.events.push(GameEvent::MainLabelHidden);
        }
    }
}

/// Move every spike along its fall and drop the ones that reached the bottom
fn advance_spikes(state: &mut GameState) {
    let mut expired = Vec::new();
    for spike in &mut state.spikes {
        spike.pos.y = spike.fall.advance();
        if spike.fall.is_finished() {
            expired.push(spike.id);
        }
    }

    if expired.is_empty() {
        return;
    }
    state.spikes.retain(|s| !s.fall.is_finished());
    for id in expired {
        log::trace!("Spike {} reached the bottom", id);
        state.events.push(GameEvent::SpikeExpired { id });
    }
}

/// Contact-begin handler
pub fn handle_contact(state: &mut GameState, contact: &Contact) {
    if let Some((_player, spike)) =
        contact.matching(PhysicsCategory::PLAYER, PhysicsCategory::SPIKE)
    {
        spike_collision(state, spike.id);
    }
}

/// The player touched a spike
fn spike_collision(state: &mut GameState, spike_id: u32) {
    if !state.remove_spike(spike_id) {
        return;
    }
    log::debug!("Player hit spike {}", spike_id);
    state.events.push(GameEvent::SpikeHit { id: spike_id });

    // Only the first hit ends the run
    if state.is_alive() {
        state.phase = GamePhase::Dead;
        show_game_over(state);
        log::info!("Game over with score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

fn show_game_over(state: &mut GameState) {
    let label = &mut state.main_label;
    label.alpha = 1.0;
    label.font_size = GAME_OVER_FONT_SIZE;
    label.text = GAME_OVER_TEXT.to_string();
}

/// Pick a pointer x that keeps the player clear of the spikes about to land
/// on its row. Returns `None` when nothing is threatening.
pub fn autopilot_target(state: &GameState) -> Option<f32> {
    let player = &state.player;
    let player_top = player.pos.y + player.size.y / 2.0;
    let player_bottom = player.pos.y - player.size.y / 2.0;
    // Only spikes that will reach the row within half a second matter
    let horizon = player_top + state.settings.height * 0.5;

    let threats: Vec<f32> = state
        .spikes
        .iter()
        .filter(|s| {
            let rect = s.rect();
            rect.min().y < horizon && rect.max().y > player_bottom
        })
        .map(|s| s.pos.x)
        .collect();

    let clearance = (player.size.x + state.settings.spike_width) / 2.0;
    if threats.iter().all(|x| (x - player.pos.x).abs() > clearance) {
        return None;
    }

    // Evenly spaced stops across the row, at most AUTOPILOT_CANDIDATES + 1
    let half = player.size.x / 2.0;
    let span = (state.settings.width - player.size.x).max(0.0);
    let step = half.max(span / AUTOPILOT_CANDIDATES as f32);
    let count = ((span / step) as u32).min(AUTOPILOT_CANDIDATES);
    let candidates = (0..=count).map(|i| half + i as f32 * step);

    candidates
        .map(|x| {
            let gap = threats
                .iter()
                .map(|t| (t - x).abs())
                .fold(f32::INFINITY, f32::min);
            (x, gap)
        })
        .max_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                // Prefer the shorter move on ties
                .then_with(|| {
                    let da = (a.0 - player.pos.x).abs();
                    let db = (b.0 - player.pos.x).abs();
                    db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
                })
        })
        .map(|(x, _)| x)
}
