//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod physics;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use physics::{Body, Contact, ContactBody, ContactTracker, MoveAnimation, PhysicsCategory, Rect};
pub use scheduler::{Scheduler, TaskKind};
pub use state::{GameEvent, GamePhase, GameState, Ground, Label, Player, Spike};
pub use tick::{TickInput, apply_pointer, autopilot_target, handle_contact, tick};
