//! Shape generation for the host renderer
//!
//! The host draws whatever is in a `SceneFrame`, in order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BACKGROUND_COLOR, OFF_BLACK, OFF_WHITE};
use crate::sim::{GameState, Label};

/// A drawable node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Filled rectangle, `pos` is the center
    Rect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Text centered on `pos`
    Text {
        text: String,
        pos: Vec2,
        font_size: f32,
        color: [f32; 4],
        alpha: f32,
    },
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub background: [f32; 4],
    pub shapes: Vec<Shape>,
}

fn text(label: &Label) -> Shape {
    Shape::Text {
        text: label.text.clone(),
        pos: label.pos,
        font_size: label.font_size,
        color: OFF_WHITE,
        alpha: label.alpha,
    }
}

fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Shape {
    Shape::Rect { pos, size, color }
}

/// Build the frame in scene order: player, ground, labels, then spikes
pub fn build_frame(state: &GameState) -> SceneFrame {
    let mut shapes = Vec::with_capacity(state.spikes.len() + 4);

    shapes.push(rect(state.player.pos, state.player.size, OFF_WHITE));
    shapes.push(rect(state.ground.pos, state.ground.size, OFF_BLACK));
    shapes.push(text(&state.main_label));
    shapes.push(text(&state.score_label));
    shapes.extend(
        state
            .spikes
            .iter()
            .map(|spike| rect(spike.pos, spike.size, OFF_BLACK)),
    );

    SceneFrame {
        background: BACKGROUND_COLOR,
        shapes,
    }
}
