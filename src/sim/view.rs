//! Protagonist-relative positions for a renderer
//!
//! The camera follows the protagonist, so everything a renderer draws is
//! placed by its offset from the protagonist's center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Bounded;
use super::condition::Direction;
use super::state::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Spikes(Direction),
    Platform,
    Goal,
}

/// One drawable, positioned relative to the protagonist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawEntry {
    pub kind: EntityKind,
    /// Entity center minus protagonist center
    pub offset: Vec2,
    pub width: f32,
    pub height: f32,
}

impl DrawEntry {
    fn of(kind: EntityKind, entity: &impl Bounded, anchor: Vec2) -> Self {
        let bounds = entity.bounds();
        Self {
            kind,
            offset: bounds.center() - anchor,
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

/// Balls, spikes, platforms and the goal, in that order
pub fn relative_entries(level: &Level) -> Vec<DrawEntry> {
    let anchor = level.protagonist().body.center();
    let balls = level
        .balls()
        .iter()
        .map(|b| DrawEntry::of(EntityKind::Ball, &b.body, anchor));
    let spikes = level
        .spikes()
        .iter()
        .map(|s| DrawEntry::of(EntityKind::Spikes(s.facing), s, anchor));
    let platforms = level
        .platforms()
        .iter()
        .map(|p| DrawEntry::of(EntityKind::Platform, &p.body, anchor));
    let goal = DrawEntry::of(EntityKind::Goal, level.goal(), anchor);

    balls
        .chain(spikes)
        .chain(platforms)
        .chain(std::iter::once(goal))
        .collect()
}
