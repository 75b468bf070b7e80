//! Axis-aligned boxes and moving bodies
//!
//! A [`BoundingBox`] is stored by its top-left corner and size, so edges
//! written through the edge setters read back exactly. A [`Body`] adds a
//! velocity and the position it had before its most recent displacement, so
//! a rollback lands on the exact same coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geom::Vector;

/// Positioned, sized, axis-aligned rectangle (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Vec2,
    size: Vec2,
}

impl BoundingBox {
    /// Create a box centered on `center`. Both dimensions must be positive
    /// and the center finite.
    pub fn new(center: Vec2, width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::NonPositiveSize { width, height });
        }
        if !center.is_finite() {
            return Err(ConfigError::NonFiniteCenter {
                x: center.x,
                y: center.y,
            });
        }
        let size = Vec2::new(width, height);
        Ok(Self {
            min: center - size / 2.0,
            size,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.min = center - self.size / 2.0;
    }

    pub fn set_left(&mut self, x: f32) {
        self.min.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.min.x = x - self.size.x;
    }

    pub fn set_top(&mut self, y: f32) {
        self.min.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.min.y = y - self.size.y;
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.min += offset;
    }

    #[inline]
    fn corner(&self) -> Vec2 {
        self.min
    }

    #[inline]
    fn set_corner(&mut self, min: Vec2) {
        self.min = min;
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Anything with a box in the world
pub trait Bounded {
    fn bounds(&self) -> &BoundingBox;

    fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

impl Bounded for BoundingBox {
    fn bounds(&self) -> &BoundingBox {
        self
    }
}

/// A moving box: velocity plus one step of position history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    bounds: BoundingBox,
    pub velocity: Vector,
    previous_corner: Vec2,
}

impl Body {
    pub fn new(bounds: BoundingBox, velocity: Vector) -> Self {
        Self {
            previous_corner: bounds.corner(),
            bounds,
            velocity,
        }
    }

    pub fn bounds_mut(&mut self) -> &mut BoundingBox {
        &mut self.bounds
    }

    /// Center before the most recent displacement
    pub fn previous_center(&self) -> Vec2 {
        self.previous_corner + Vec2::new(self.bounds.width(), self.bounds.height()) / 2.0
    }

    /// Shift by `offset`, remembering where the body was
    pub fn displace(&mut self, offset: Vector) {
        self.previous_corner = self.bounds.corner();
        self.bounds.translate(offset.as_vec2());
    }

    /// Shift by the current velocity
    pub fn advance(&mut self) {
        self.displace(self.velocity);
    }

    /// Undo the most recent displacement. The undo itself becomes the most
    /// recent displacement.
    pub fn retreat(&mut self) {
        let current = self.bounds.corner();
        self.bounds.set_corner(self.previous_corner);
        self.previous_corner = current;
    }

    /// Teleport without touching velocity; history is reset to the new spot
    pub fn place(&mut self, center: Vec2) {
        self.bounds.set_center(center);
        self.previous_corner = self.bounds.corner();
    }
}

impl Bounded for Body {
    fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}
