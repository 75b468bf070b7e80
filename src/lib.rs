//! Cragjump - a tick-based 2D platformer physics core
//!
//! Core modules:
//! - `geom`: Validated vector math and line/ray/segment primitives
//! - `sim`: Deterministic simulation (spatial index, collisions, ground tracking, level tick)
//! - `loader`: Level layout grids and tunable constants
//! - `error`: Domain and configuration errors

pub mod error;
pub mod geom;
pub mod loader;
pub mod sim;

pub use error::{ConfigError, DomainError, Error};
pub use geom::Vector;
pub use loader::{LevelConstants, PlatformSpec, build_level};
pub use sim::{Level, TickInput, tick};

/// Simulation constants
pub mod consts {
    /// Default downward acceleration added to an airborne protagonist each tick
    pub const GRAVITY: f32 = 0.5;

    /// Ticks after leaving the ground during which lifting is disabled
    pub const LIFT_COOLDOWN_TICKS: u32 = 5;

    /// Recoil distance when a collision cannot be classified
    pub const PROTAGONIST_RECOIL: f32 = 30.0;
    pub const BALL_RECOIL: f32 = 15.0;

    /// Full span of the random deflection applied on each ball bounce (±π/60)
    pub const BALL_DEFLECTION_SPAN: f32 = std::f32::consts::PI / 30.0;

    /// Buckets scanned on each side of the query cell for collision candidates
    pub const QUERY_REACH: i64 = 2;
    /// Buckets scanned on each side of the target cell when picking up a boulder
    pub const PICKUP_REACH: i64 = 1;

    /// Tolerance for two box edges to count as coincident
    pub const EDGE_EPSILON: f32 = 1e-4;
}

/// Normalized angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// True if two edge coordinates coincide within [`consts::EDGE_EPSILON`]
#[inline]
pub fn edges_meet(a: f32, b: f32) -> bool {
    (a - b).abs() <= consts::EDGE_EPSILON
}
