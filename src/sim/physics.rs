//! Rectangle bodies, contact detection and move animations
//!
//! Bodies are axis-aligned rectangles tagged with category bitmasks. A pair
//! of bodies is only tested when one of them asks to hear about the other's
//! category, and a contact is reported once, on the tick the overlap begins.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Category bitmasks
pub struct PhysicsCategory;

impl PhysicsCategory {
    pub const NONE: u32 = 0;
    pub const PLAYER: u32 = 1;
    pub const SPIKE: u32 = 1 << 1;
}

/// Axis-aligned rectangle given by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    /// Strict overlap; rectangles that only share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Physics flags attached to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// What this body is
    pub category: u32,
    /// Categories this body wants contact notifications for
    pub contact_test_mask: u32,
    /// Categories this body collides with
    pub collision_mask: u32,
}

impl Body {
    pub fn player() -> Self {
        Self {
            category: PhysicsCategory::PLAYER,
            contact_test_mask: PhysicsCategory::SPIKE,
            collision_mask: PhysicsCategory::NONE,
        }
    }

    pub fn spike() -> Self {
        Self {
            category: PhysicsCategory::SPIKE,
            contact_test_mask: PhysicsCategory::NONE,
            collision_mask: PhysicsCategory::PLAYER,
        }
    }

    /// Whether either body asks to be told about the other
    pub fn interacts_with(&self, other: &Body) -> bool {
        let wants = |a: &Body, b: &Body| (a.contact_test_mask | a.collision_mask) & b.category != 0;
        wants(self, other) || wants(other, self)
    }
}

/// A body taking part in a contact, identified by its entity id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub id: u32,
    pub category: u32,
}

/// Contact-begin notification. Order of the two bodies is arbitrary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub body_a: ContactBody,
    pub body_b: ContactBody,
}

impl Contact {
    /// Split into (first, second) when the bodies match the two categories
    /// in either order
    pub fn matching(&self, first: u32, second: u32) -> Option<(ContactBody, ContactBody)> {
        let (a, b) = (self.body_a, self.body_b);
        if a.category == first && b.category == second {
            Some((a, b))
        } else if a.category == second && b.category == first {
            Some((b, a))
        } else {
            None
        }
    }
}

/// An entity handed to contact detection for one tick
#[derive(Debug, Clone, Copy)]
pub struct PhysicsEntity {
    pub id: u32,
    pub body: Body,
    pub rect: Rect,
}

/// Remembers which pairs were overlapping last tick so only new overlaps
/// are reported
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: HashSet<(u32, u32)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test every interacting pair and return the contacts that began this tick
    pub fn step(&mut self, entities: &[PhysicsEntity]) -> Vec<Contact> {
        let mut began = Vec::new();
        let mut touching = HashSet::new();

        for (i, a) in entities.iter().enumerate() {
            for b in &entities[i + 1..] {
                if !a.body.interacts_with(&b.body) || !a.rect.overlaps(&b.rect) {
                    continue;
                }

                let key = (a.id.min(b.id), a.id.max(b.id));
                touching.insert(key);
                if !self.touching.contains(&key) {
                    began.push(Contact {
                        body_a: ContactBody {
                            id: a.id,
                            category: a.body.category,
                        },
                        body_b: ContactBody {
                            id: b.id,
                            category: b.body.category,
                        },
                    });
                }
            }
        }

        self.touching = touching;
        began
    }
}

/// Linear move of a node's y to a target over a fixed number of ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveAnimation {
    pub start_y: f32,
    pub target_y: f32,
    pub duration_ticks: u32,
    pub elapsed_ticks: u32,
}

impl MoveAnimation {
    pub fn new(start_y: f32, target_y: f32, duration_ticks: u32) -> Self {
        Self {
            start_y,
            target_y,
            duration_ticks: duration_ticks.max(1),
            elapsed_ticks: 0,
        }
    }

    /// Advance one tick and return the new y
    pub fn advance(&mut self) -> f32 {
        self.elapsed_ticks = (self.elapsed_ticks + 1).min(self.duration_ticks);
        self.current_y()
    }

    pub fn current_y(&self) -> f32 {
        let t = self.elapsed_ticks as f32 / self.duration_ticks as f32;
        self.start_y + (self.target_y - self.start_y) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ticks >= self.duration_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> PhysicsEntity {
        PhysicsEntity {
            id: 1,
            body: Body::player(),
            rect: Rect::new(Vec2::new(x, y), Vec2::splat(50.0)),
        }
    }

    fn spike_at(id: u32, x: f32, y: f32) -> PhysicsEntity {
        PhysicsEntity {
            id,
            body: Body::spike(),
            rect: Rect::new(Vec2::new(x, y), Vec2::new(10.0, 125.0)),
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(a.overlaps(&Rect::new(Vec2::new(9.0, 0.0), Vec2::splat(10.0))));
        // Shared edge only
        assert!(!a.overlaps(&Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0))));
        assert!(!a.overlaps(&Rect::new(Vec2::new(0.0, 30.0), Vec2::splat(10.0))));
    }

    #[test]
    fn test_masks() {
        assert!(Body::player().interacts_with(&Body::spike()));
        assert!(Body::spike().interacts_with(&Body::player()));
        // Spikes pass through each other
        assert!(!Body::spike().interacts_with(&Body::spike()));
    }

    #[test]
    fn test_contact_reported_once_per_overlap() {
        let mut tracker = ContactTracker::new();
        let entities = [player_at(100.0, 100.0), spike_at(2, 100.0, 150.0)];

        let contacts = tracker.step(&entities);
        assert_eq!(contacts.len(), 1);

        // Still overlapping - no new begin
        assert!(tracker.step(&entities).is_empty());

        // Separate, then overlap again
        assert!(tracker.step(&[player_at(100.0, 100.0), spike_at(2, 400.0, 150.0)]).is_empty());
        assert_eq!(tracker.step(&entities).len(), 1);
    }

    #[test]
    fn test_overlapping_spikes_do_not_contact() {
        let mut tracker = ContactTracker::new();
        let contacts = tracker.step(&[spike_at(2, 100.0, 500.0), spike_at(3, 102.0, 510.0)]);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_contact_matching_either_order() {
        let player = ContactBody {
            id: 1,
            category: PhysicsCategory::PLAYER,
        };
        let spike = ContactBody {
            id: 9,
            category: PhysicsCategory::SPIKE,
        };

        for contact in [
            Contact {
                body_a: player,
                body_b: spike,
            },
            Contact {
                body_a: spike,
                body_b: player,
            },
        ] {
            let (p, s) = contact
                .matching(PhysicsCategory::PLAYER, PhysicsCategory::SPIKE)
                .unwrap();
            assert_eq!(p.id, 1);
            assert_eq!(s.id, 9);
        }

        let spikes = Contact {
            body_a: spike,
            body_b: spike,
        };
        assert!(spikes.matching(PhysicsCategory::PLAYER, PhysicsCategory::SPIKE).is_none());
    }

    #[test]
    fn test_move_animation_linear() {
        let mut anim = MoveAnimation::new(1000.0, 0.0, 4);
        assert_eq!(anim.advance(), 750.0);
        assert_eq!(anim.advance(), 500.0);
        anim.advance();
        assert!(!anim.is_finished());
        assert_eq!(anim.advance(), 0.0);
        assert!(anim.is_finished());
        // Clamped at the target
        assert_eq!(anim.advance(), 0.0);
    }
}
