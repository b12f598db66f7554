//! Game state and scene entities
//!
//! `GameState` is the whole scene: every node, the timers driving it and the
//! RNG used for spike placement.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::{Body, ContactTracker, MoveAnimation, PhysicsEntity, Rect};
use super::scheduler::{Scheduler, TaskKind};
use crate::consts::*;
use crate::settings::Settings;
use crate::{score_text, secs_to_ticks};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is dodging, score and spawns are running
    Alive,
    /// Player was hit. Terminal for this scene.
    Dead,
}

/// Notifications raised during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SpikeSpawned { id: u32, x: f32 },
    /// Spike finished its fall without hitting anything
    SpikeExpired { id: u32 },
    ScoreChanged { score: u32 },
    MainLabelHidden,
    SpikeHit { id: u32 },
    GameOver { score: u32 },
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub body: Body,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A falling spike
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spike {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub body: Body,
    pub fall: MoveAnimation,
}

impl Spike {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Decorative ground strip (no physics body)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    pub pos: Vec2,
    pub size: Vec2,
}

/// A text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub font_size: f32,
    pub alpha: f32,
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds survived
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub ground: Ground,
    /// Live spikes (sorted by id)
    pub spikes: Vec<Spike>,
    pub main_label: Label,
    pub score_label: Label,
    pub scheduler: Scheduler,
    pub contacts: ContactTracker,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Build the scene and start its timers
    pub fn new(settings: Settings) -> Self {
        let size = settings.scene_size();
        let mid_x = size.x / 2.0;

        let mut scheduler = Scheduler::new();
        scheduler.repeat(TaskKind::SpawnSpike, secs_to_ticks(settings.spike_spawn_interval));
        scheduler.once(TaskKind::HideMainLabel, secs_to_ticks(settings.label_hide_delay));
        scheduler.repeat(TaskKind::IncrementScore, secs_to_ticks(settings.score_interval));

        let state = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Alive,
            score: 0,
            time_ticks: 0,
            player: Player {
                id: 1,
                pos: Vec2::new(mid_x, PLAYER_ROW),
                size: Vec2::splat(PLAYER_SIZE),
                body: Body::player(),
            },
            ground: Ground {
                pos: Vec2::new(mid_x, 0.0),
                size: Vec2::new(size.x, GROUND_HEIGHT),
            },
            spikes: Vec::new(),
            main_label: Label {
                text: START_TEXT.to_string(),
                pos: Vec2::new(mid_x, size.y / 2.0 + MAIN_LABEL_OFFSET_Y),
                font_size: MAIN_LABEL_FONT_SIZE,
                alpha: 1.0,
            },
            score_label: Label {
                text: score_text(0),
                pos: Vec2::new(mid_x, SCORE_LABEL_Y),
                font_size: SCORE_LABEL_FONT_SIZE,
                alpha: 1.0,
            },
            scheduler,
            contacts: ContactTracker::new(),
            events: Vec::new(),
            next_id: 2,
            settings,
        };

        log::info!(
            "Scene started ({}x{}, seed {})",
            size.x,
            size.y,
            state.settings.seed
        );
        state
    }

    pub fn is_alive(&self) -> bool {
        self.phase == GamePhase::Alive
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniformly random whole x in `[0, width)`
    pub fn random_spike_x(&mut self) -> f32 {
        let width = (self.settings.width as u32).max(1);
        self.rng.random_range(0..width) as f32
    }

    /// Spawn a spike above the top edge and start its fall
    pub fn spawn_spike(&mut self) -> u32 {
        let id = self.next_entity_id();
        let size = self.settings.spike_size();
        let x = self.random_spike_x();
        let start_y = self.settings.height + size.y;
        let fall = MoveAnimation::new(
            start_y,
            SPIKE_TARGET_Y,
            secs_to_ticks(self.settings.spike_fall_duration),
        );

        self.spikes.push(Spike {
            id,
            pos: Vec2::new(x, start_y),
            size,
            body: Body::spike(),
            fall,
        });
        log::debug!("Spike {} spawned at x={}", id, x);
        self.events.push(GameEvent::SpikeSpawned { id, x });
        id
    }

    /// Remove a spike node. Returns false if it was already gone.
    pub fn remove_spike(&mut self, id: u32) -> bool {
        match self.spikes.iter().position(|s| s.id == id) {
            Some(index) => {
                self.spikes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn spike(&self, id: u32) -> Option<&Spike> {
        self.spikes.iter().find(|s| s.id == id)
    }

    /// Bodies taking part in this tick's contact pass
    pub fn physics_entities(&self) -> Vec<PhysicsEntity> {
        let mut entities = Vec::with_capacity(self.spikes.len() + 1);
        entities.push(PhysicsEntity {
            id: self.player.id,
            body: self.player.body,
            rect: self.player.rect(),
        });
        entities.extend(self.spikes.iter().map(|s| PhysicsEntity {
            id: s.id,
            body: s.body,
            rect: s.rect(),
        }));
        entities
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_scene() {
        let state = GameState::new(Settings::default());
        assert!(state.is_alive());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(384.0, PLAYER_ROW));
        assert_eq!(state.ground.size, Vec2::new(768.0, GROUND_HEIGHT));
        assert_eq!(state.main_label.text, "Start!");
        assert_eq!(state.main_label.alpha, 1.0);
        assert_eq!(state.score_label.text, "Score: 0");
        assert!(state.spikes.is_empty());
        assert_eq!(state.scheduler.pending(), 3);
    }

    #[test]
    fn test_spawn_spike_above_top() {
        let mut state = GameState::new(Settings::default());
        let id = state.spawn_spike();
        let spike = state.spike(id).unwrap();
        assert_eq!(spike.pos.y, 1024.0 + 125.0);
        assert_eq!(spike.size, Vec2::new(10.0, 125.0));
        assert_eq!(spike.fall.target_y, SPIKE_TARGET_Y);
        assert_eq!(spike.fall.duration_ticks, 60);
        assert_eq!(state.events, vec![GameEvent::SpikeSpawned { id, x: spike.pos.x }]);
    }

    #[test]
    fn test_remove_spike_is_idempotent() {
        let mut state = GameState::new(Settings::default());
        let id = state.spawn_spike();
        assert!(state.remove_spike(id));
        assert!(!state.remove_spike(id));
        assert!(state.spike(id).is_none());
    }

    #[test]
    fn test_same_seed_same_spikes() {
        let mut a = GameState::new(Settings::default());
        let mut b = GameState::new(Settings::default());
        for _ in 0..20 {
            assert_eq!(a.random_spike_x(), b.random_spike_x());
        }
    }

    proptest! {
        #[test]
        fn spike_x_within_width(seed in any::<u64>(), width in 1.0f32..4096.0) {
            let settings = Settings { width, seed, ..Settings::default() };
            let mut state = GameState::new(settings);
            for _ in 0..32 {
                let x = state.random_spike_x();
                prop_assert!(x >= 0.0);
                prop_assert!(x < width);
                prop_assert_eq!(x.fract(), 0.0);
            }
        }
    }
}
