//! Immutable, validated 2D vector
//!
//! Every constructor and operation checks that the result is finite, so a
//! `Vector` never carries NaN or infinite components. Operations that have no
//! meaning for the zero vector (normalize, argument, projection target...)
//! fail with [`DomainError::ZeroVector`] instead of producing garbage.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::normalize_angle;

/// A Euclidean vector in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vector {
    x: f32,
    y: f32,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const X_AXIS: Self = Self { x: 1.0, y: 0.0 };
    pub const Y_AXIS: Self = Self { x: 0.0, y: 1.0 };

    /// Create a vector, rejecting NaN and infinite components
    pub fn new(x: f32, y: f32) -> Result<Self, DomainError> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(DomainError::NonFinite { x, y })
        }
    }

    /// Components in {-1, 0, 1}; always finite
    pub(crate) const fn unit_step(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn from_vec2(v: Vec2) -> Result<Self, DomainError> {
        Self::new(v.x, v.y)
    }

    /// Vector extending from `initial` to `terminal`
    pub fn generate_from(initial: Vec2, terminal: Vec2) -> Result<Self, DomainError> {
        Self::from_vec2(terminal - initial)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    fn require_nonzero(&self, operation: &'static str) -> Result<(), DomainError> {
        if self.is_zero() {
            Err(DomainError::ZeroVector { operation })
        } else {
            Ok(())
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Vector) -> Result<Self, DomainError> {
        Self::from_vec2(self.as_vec2() + other.as_vec2())
    }

    /// Same length, opposite direction
    pub fn reverse(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    pub fn scale(self, scalar: f32) -> Result<Self, DomainError> {
        Self::from_vec2(self.as_vec2() * scalar)
    }

    /// Scale each component independently
    pub fn scale_xy(self, sx: f32, sy: f32) -> Result<Self, DomainError> {
        Self::new(self.x * sx, self.y * sy)
    }

    pub fn dot(self, other: Vector) -> f32 {
        self.as_vec2().dot(other.as_vec2())
    }

    pub fn norm(self) -> f32 {
        self.as_vec2().length()
    }

    pub fn normalize(self) -> Result<Self, DomainError> {
        self.require_nonzero("normalize")?;
        Self::from_vec2(self.as_vec2() / self.norm())
    }

    /// Angle from the positive x-axis in (-π, π]
    pub fn argument(self) -> Result<f32, DomainError> {
        self.require_nonzero("take the argument of")?;
        Ok(normalize_angle(self.y.atan2(self.x)))
    }

    /// Same norm, rotated so its argument equals `angle`
    pub fn set_argument(self, angle: f32) -> Result<Self, DomainError> {
        let norm = self.norm();
        Self::new(norm * angle.cos(), norm * angle.sin())
    }

    /// Rotate by `delta` radians
    pub fn add_argument(self, delta: f32) -> Result<Self, DomainError> {
        let angle = self.argument()?;
        self.set_argument(angle + delta)
    }

    /// Same norm, pointed along `direction`
    pub fn aim(self, direction: Vector) -> Result<Self, DomainError> {
        direction.require_nonzero("aim along")?;
        let unit = direction.as_vec2() / direction.norm();
        Self::from_vec2(unit * self.norm())
    }

    /// Orthogonal projection onto `onto`
    pub fn project(self, onto: Vector) -> Result<Self, DomainError> {
        onto.require_nonzero("project onto")?;
        let norm = onto.norm();
        onto.scale(self.dot(onto) / norm / norm)
    }

    /// Same direction, length `new_norm`
    pub fn elongate(self, new_norm: f32) -> Result<Self, DomainError> {
        self.require_nonzero("elongate")?;
        self.normalize()?.scale(new_norm)
    }
}

impl TryFrom<[f32; 2]> for Vector {
    type Error = DomainError;

    fn try_from([x, y]: [f32; 2]) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl From<Vector> for [f32; 2] {
    fn from(v: Vector) -> Self {
        [v.x, v.y]
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        v.as_vec2()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
