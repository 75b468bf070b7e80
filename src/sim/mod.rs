//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bucket order for static geometry, insertion
//!   order for everything else)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod condition;
pub mod grid;
pub mod pattern;
pub mod state;
pub mod tick;
pub mod view;

pub use body::{Body, Bounded, BoundingBox};
pub use collision::{Contact, classify, overlaps, resolve_ball, resolve_protagonist, touches_from_above};
pub use condition::{Condition, Direction, Pose, Stance, Tilt};
pub use grid::{Obstacle, ObstacleId, ObstacleKind, SpatialIndex};
pub use pattern::{MotionPattern, Segment};
pub use state::{Ball, Goal, GroundRef, Level, LevelSetup, MovingPlatform, Protagonist, Spikes};
pub use tick::{TickInput, tick};
pub use view::{DrawEntry, EntityKind};
