//! Lines, rays and segments
//!
//! Membership is tested by angle: a point belongs to the shape when the
//! direction from the shape's anchor to the point is within an angular error
//! limit of the shape's own direction. These are tooling helpers; the tick
//! pipeline never calls them.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Vector;
use crate::error::DomainError;
use crate::normalize_angle;

/// An infinite line through `point`, direction normalized into (-π/2, π/2]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    point: Vec2,
    direction: Vector,
}

impl Line {
    pub fn new(point: Vec2, direction: Vector) -> Result<Self, DomainError> {
        let arg = direction.argument()?;
        let direction = if -FRAC_PI_2 < arg && arg <= FRAC_PI_2 {
            direction
        } else {
            direction.reverse()
        };
        Ok(Self { point, direction })
    }

    pub fn point(&self) -> Vec2 {
        self.point
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Argument of the line in (-π/2, π/2]
    pub fn argument(&self) -> Result<f32, DomainError> {
        self.direction.argument()
    }

    /// The y-coordinate at `x`; `None` for a vertical line
    pub fn y_at(&self, x: f32) -> Option<f32> {
        if self.direction.x() == 0.0 {
            return None;
        }
        Some(self.point.y + (x - self.point.x) / self.direction.x() * self.direction.y())
    }

    /// The x-coordinate at `y`; `None` for a horizontal line
    pub fn x_at(&self, y: f32) -> Option<f32> {
        if self.direction.y() == 0.0 {
            return None;
        }
        Some(self.point.x + (y - self.point.y) / self.direction.y() * self.direction.x())
    }

    /// True if `point` lies on the line within `error_limit` radians.
    ///
    /// The anchor point itself has no direction and counts as a member.
    pub fn is_member(&self, point: Vec2, error_limit: f32) -> Result<bool, DomainError> {
        let to_point = Vector::generate_from(self.point, point)?;
        if to_point.is_zero() {
            return Ok(true);
        }
        let error = normalize_angle(self.direction.argument()? - to_point.argument()?).abs();
        // Points behind the anchor sit at an angle of π
        Ok(error < error_limit || (error - PI).abs() < error_limit)
    }

    /// True if `point` lies strictly below the line (screen y grows downward).
    /// Always false for a vertical line.
    pub fn is_below(&self, point: Vec2) -> bool {
        self.y_at(point.x).is_some_and(|y| point.y > y)
    }
}

/// A half-line starting at `initial`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub initial: Vec2,
    pub direction: Vector,
}

impl Ray {
    pub fn new(initial: Vec2, direction: Vector) -> Result<Self, DomainError> {
        if direction.is_zero() {
            return Err(DomainError::ZeroVector {
                operation: "direct a ray along",
            });
        }
        Ok(Self { initial, direction })
    }

    pub fn is_member(&self, point: Vec2, error_limit: f32) -> Result<bool, DomainError> {
        let to_point = Vector::generate_from(self.initial, point)?;
        if to_point.is_zero() {
            return Ok(true);
        }
        let error = normalize_angle(self.direction.argument()? - to_point.argument()?).abs();
        Ok(error < error_limit)
    }
}

/// A segment between two distinct points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    initial: Vec2,
    terminal: Vec2,
}

impl LineSegment {
    pub fn new(initial: Vec2, terminal: Vec2) -> Result<Self, DomainError> {
        if initial == terminal {
            return Err(DomainError::DegenerateSegment);
        }
        Ok(Self { initial, terminal })
    }

    pub fn initial(&self) -> Vec2 {
        self.initial
    }

    pub fn terminal(&self) -> Vec2 {
        self.terminal
    }

    pub fn length(&self) -> f32 {
        self.initial.distance(self.terminal)
    }

    /// True if `point` lies on the segment within `error_limit` radians and
    /// no farther from `initial` than `terminal` is
    pub fn is_member(&self, point: Vec2, error_limit: f32) -> Result<bool, DomainError> {
        let to_point = Vector::generate_from(self.initial, point)?;
        if to_point.is_zero() {
            return Ok(true);
        }
        let along = Vector::generate_from(self.initial, self.terminal)?;
        let error = normalize_angle(along.argument()? - to_point.argument()?).abs();
        Ok(error < error_limit && to_point.norm() <= along.norm())
    }
}
