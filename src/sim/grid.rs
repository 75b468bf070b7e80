//! Spatial index for static geometry
//!
//! The level is cut into vertical strips one block wide. Each strip owns the
//! blocks and boulders whose cell was computed when they were inserted, so a
//! proximity query only walks a handful of buckets instead of the whole level.
//!
//! Collision queries read a 5-bucket window around the query cell while a
//! pick-up only searches 3 buckets around the target cell. The two widths
//! differ on purpose and must stay that way.

use std::collections::HashMap;
use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Bounded, BoundingBox};
use crate::consts::{PICKUP_REACH, QUERY_REACH};
use crate::error::ConfigError;

/// Stable handle for an obstacle stored in the index
pub type ObstacleId = u32;

/// Static obstacle kinds kept in the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Permanent terrain
    Block,
    /// Terrain the protagonist can lift and place elsewhere
    Boulder,
}

/// A static obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    bounds: BoundingBox,
}

impl Bounded for Obstacle {
    fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

/// Block/boulder buckets indexed by horizontal cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialIndex {
    block_size: f32,
    blocks: Vec<Vec<Obstacle>>,
    boulders: Vec<Vec<Obstacle>>,
    /// Bucket of every live obstacle, for handle lookups
    cells: HashMap<ObstacleId, (ObstacleKind, usize)>,
    next_id: ObstacleId,
}

impl SpatialIndex {
    /// An empty index `length` cells wide
    pub fn new(length: usize, block_size: f32) -> Result<Self, ConfigError> {
        if !(block_size > 0.0 && block_size.is_finite()) {
            return Err(ConfigError::NonPositiveBlockSize);
        }
        Ok(Self {
            block_size,
            blocks: vec![Vec::new(); length],
            boulders: vec![Vec::new(); length],
            cells: HashMap::new(),
            next_id: 1,
        })
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// Cell index of a horizontal coordinate; may lie outside the level
    pub fn cell_of(&self, x: f32) -> i64 {
        (x / self.block_size).floor() as i64
    }

    fn in_range(&self, index: i64) -> Option<usize> {
        (index >= 0 && index < self.cell_count() as i64).then_some(index as usize)
    }

    /// Buckets `[cell(x) - reach, cell(x) + reach]` clipped to the level
    fn window(&self, x: f32, reach: i64) -> Range<usize> {
        let cell = self.cell_of(x);
        let lo = cell.saturating_sub(reach).max(0);
        let hi = cell.saturating_add(reach + 1).min(self.cell_count() as i64);
        if lo >= hi {
            0..0
        } else {
            lo as usize..hi as usize
        }
    }

    /// Store an obstacle in bucket `index_hint`.
    ///
    /// Out-of-range hints are dropped silently and yield `None`: anything
    /// placed beyond the level's horizontal extent simply does not exist.
    pub fn insert_static(
        &mut self,
        kind: ObstacleKind,
        bounds: BoundingBox,
        index_hint: i64,
    ) -> Option<ObstacleId> {
        let index = self.in_range(index_hint)?;
        let id = self.next_id;
        self.next_id += 1;
        let obstacle = Obstacle { id, kind, bounds };
        match kind {
            ObstacleKind::Block => self.blocks[index].push(obstacle),
            ObstacleKind::Boulder => self.boulders[index].push(obstacle),
        }
        self.cells.insert(id, (kind, index));
        Some(id)
    }

    /// Insert into the bucket under the box's center
    pub fn insert_at(&mut self, kind: ObstacleKind, bounds: BoundingBox) -> Option<ObstacleId> {
        let index = self.cell_of(bounds.center().x);
        self.insert_static(kind, bounds, index)
    }

    /// Blocks within reach of `x`, nearest buckets not guaranteed first
    pub fn blocks_near(&self, x: f32) -> impl Iterator<Item = &Obstacle> {
        self.blocks[self.window(x, QUERY_REACH)].iter().flatten()
    }

    /// Boulders within reach of `x`
    pub fn boulders_near(&self, x: f32) -> impl Iterator<Item = &Obstacle> {
        self.boulders[self.window(x, QUERY_REACH)].iter().flatten()
    }

    /// Every static obstacle within reach of `x`: blocks first, then boulders
    pub fn query_near(&self, x: f32) -> impl Iterator<Item = &Obstacle> {
        self.blocks_near(x).chain(self.boulders_near(x))
    }

    /// First obstacle whose box contains `point`
    pub fn find_at(&self, point: Vec2) -> Option<&Obstacle> {
        self.query_near(point.x).find(|o| o.bounds.contains(point))
    }

    /// Remove and return the first boulder containing `point`, searching only
    /// the target cell and its two neighbours
    pub fn remove_at(&mut self, point: Vec2) -> Option<Obstacle> {
        for index in self.window(point.x, PICKUP_REACH) {
            let bucket = &mut self.boulders[index];
            if let Some(pos) = bucket.iter().position(|b| b.bounds.contains(point)) {
                let boulder = bucket.remove(pos);
                self.cells.remove(&boulder.id);
                return Some(boulder);
            }
        }
        None
    }

    /// Look up a live obstacle by handle
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        let &(kind, index) = self.cells.get(&id)?;
        let bucket = match kind {
            ObstacleKind::Block => &self.blocks[index],
            ObstacleKind::Boulder => &self.boulders[index],
        };
        bucket.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObstacleId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Number of stored obstacles
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// All obstacles in bucket order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.blocks.iter().flatten().chain(self.boulders.iter().flatten())
    }
}
