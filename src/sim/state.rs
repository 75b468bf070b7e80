//! Level state and entity types
//!
//! Everything the tick mutates lives in [`Level`]. Entities are created once
//! per level load and persist until the level is dropped; only the boulders
//! in the spatial index come and go (lift/drop).

use glam::Vec2;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{Body, Bounded, BoundingBox};
use super::condition::{Condition, Direction, Pose};
use super::grid::{ObstacleId, ObstacleKind, SpatialIndex};
use super::pattern::MotionPattern;
use super::view::{self, DrawEntry};
use crate::error::Error;
use crate::geom::Vector;

/// The player-controlled body
#[derive(Debug, Clone)]
pub struct Protagonist {
    pub body: Body,
    pub condition: Condition,
    pub walk_speed: f32,
    pub jump_speed: f32,
    /// Distance from the center to the lift/drop target along the aim
    pub reach: f32,
}

impl Protagonist {
    pub fn new(
        bounds: BoundingBox,
        walk_speed: f32,
        jump_speed: f32,
        reach: f32,
        facing: Direction,
    ) -> Self {
        Self {
            body: Body::new(bounds, Vector::ZERO),
            condition: Condition::new(facing),
            walk_speed,
            jump_speed,
            reach,
        }
    }

    /// Offset from the center to the lift/drop target.
    ///
    /// Vertical aims are pushed out by half the difference between height and
    /// width so the target clears a non-square body the same way it would a
    /// square one.
    pub fn aim_offset(&self) -> Vec2 {
        let step = self.condition.aim_step().as_vec2();
        let mut offset = step * self.reach;
        let bounds = self.body.bounds();
        let dy = (bounds.height() - bounds.width()).abs() / 2.0;
        if step.y < 0.0 {
            offset.y -= dy;
        } else if step.y > 0.0 {
            offset.y += dy;
        }
        offset
    }

    /// World point a lift or drop acts on
    pub fn aim_point(&self) -> Vec2 {
        self.body.center() + self.aim_offset()
    }

    /// Set horizontal velocity to walk in `facing`
    pub fn walk(&mut self, facing: Direction) -> Result<(), Error> {
        let vx = match facing {
            Direction::Left => -self.walk_speed,
            _ => self.walk_speed,
        };
        self.body.velocity = Vector::new(vx, self.body.velocity.y())?;
        self.condition.facing = facing;
        self.condition.walking = true;
        Ok(())
    }

    /// Drop horizontal velocity
    pub fn halt(&mut self) -> Result<(), Error> {
        self.body.velocity = Vector::new(0.0, self.body.velocity.y())?;
        self.condition.walking = false;
        Ok(())
    }

    /// Launch upward. Caller is responsible for detaching the ground.
    pub fn jump(&mut self) -> Result<(), Error> {
        self.body.velocity = Vector::new(self.body.velocity.x(), -self.jump_speed)?;
        self.condition.airborne = true;
        self.condition.reset_airborne_ticks();
        Ok(())
    }
}

/// A hazard that bounces around the level
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
}

impl Ball {
    pub fn new(bounds: BoundingBox, velocity: Vector) -> Self {
        Self {
            body: Body::new(bounds, velocity),
        }
    }
}

/// A platform driven by a cyclic motion pattern
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    pub body: Body,
    pattern: MotionPattern,
}

impl MovingPlatform {
    pub fn new(bounds: BoundingBox, pattern: MotionPattern) -> Self {
        Self {
            body: Body::new(bounds, Vector::ZERO),
            pattern,
        }
    }

    /// Pull this tick's velocity from the pattern
    pub fn step_pattern(&mut self) -> Vector {
        self.body.velocity = self.pattern.advance();
        self.body.velocity
    }

    pub fn pattern(&self) -> &MotionPattern {
        &self.pattern
    }
}

/// Static hazard pointing in one direction
#[derive(Debug, Clone)]
pub struct Spikes {
    bounds: BoundingBox,
    pub facing: Direction,
}

impl Spikes {
    pub fn new(bounds: BoundingBox, facing: Direction) -> Self {
        Self { bounds, facing }
    }
}

impl Bounded for Spikes {
    fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

/// Reaching this ends the level in victory
#[derive(Debug, Clone)]
pub struct Goal {
    bounds: BoundingBox,
}

impl Goal {
    pub fn new(bounds: BoundingBox) -> Self {
        Self { bounds }
    }
}

impl Bounded for Goal {
    fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

/// What the protagonist is standing on. A lookup handle, never ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundRef {
    /// A block or boulder in the spatial index
    Static(ObstacleId),
    /// Index into [`Level::platforms`]
    Platform(usize),
}

/// Everything needed to assemble a [`Level`]
#[derive(Debug, Clone)]
pub struct LevelSetup {
    pub protagonist: Protagonist,
    pub grid: SpatialIndex,
    pub balls: Vec<Ball>,
    pub spikes: Vec<Spikes>,
    pub platforms: Vec<MovingPlatform>,
    pub goal: Goal,
    /// Acceleration added to an airborne protagonist every tick
    pub gravity: Vector,
    /// Seed for ball deflections
    pub seed: u64,
}

/// A running level
#[derive(Debug, Clone)]
pub struct Level {
    pub(crate) protagonist: Protagonist,
    pub(crate) grid: SpatialIndex,
    pub(crate) balls: Vec<Ball>,
    pub(crate) spikes: Vec<Spikes>,
    pub(crate) platforms: Vec<MovingPlatform>,
    pub(crate) goal: Goal,
    pub(crate) ground: Option<GroundRef>,
    pub(crate) gravity: Vector,
    pub(crate) rng: Pcg32,
    pub(crate) finished: bool,
    pub(crate) victorious: bool,
    pub(crate) pose: Pose,
    pub(crate) ticks: u64,
    view: Vec<DrawEntry>,
    start_center: Vec2,
}

impl Level {
    pub fn new(setup: LevelSetup) -> Self {
        let LevelSetup {
            protagonist,
            grid,
            balls,
            spikes,
            platforms,
            goal,
            gravity,
            seed,
        } = setup;
        info!(
            "Level ready: {} cells, {} obstacles, {} balls, {} spikes, {} platforms",
            grid.cell_count(),
            grid.count(),
            balls.len(),
            spikes.len(),
            platforms.len()
        );
        let mut level = Self {
            start_center: protagonist.body.center(),
            pose: protagonist.condition.pose(),
            protagonist,
            grid,
            balls,
            spikes,
            platforms,
            goal,
            ground: None,
            gravity,
            rng: Pcg32::seed_from_u64(seed),
            finished: false,
            victorious: false,
            ticks: 0,
            view: Vec::new(),
        };
        level.refresh_view();
        level
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_victorious(&self) -> bool {
        self.victorious
    }

    pub fn protagonist(&self) -> &Protagonist {
        &self.protagonist
    }

    pub fn grid(&self) -> &SpatialIndex {
        &self.grid
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn spikes(&self) -> &[Spikes] {
        &self.spikes
    }

    pub fn platforms(&self) -> &[MovingPlatform] {
        &self.platforms
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn ground(&self) -> Option<GroundRef> {
        self.ground
    }

    pub fn start_center(&self) -> Vec2 {
        self.start_center
    }

    /// Completed ticks since the level was built
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Render-facing animation key, refreshed every tick
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Positions relative to the protagonist, refreshed every tick
    pub fn view(&self) -> &[DrawEntry] {
        &self.view
    }

    /// Box of whatever `ground` points at, if it still exists
    pub fn ground_bounds(&self, ground: GroundRef) -> Option<BoundingBox> {
        match ground {
            GroundRef::Static(id) => self.grid.get(id).map(|o| *o.bounds()),
            GroundRef::Platform(index) => self.platforms.get(index).map(|p| *p.body.bounds()),
        }
    }

    pub(crate) fn refresh_view(&mut self) {
        self.view = view::relative_entries(self);
    }

    /// Put the carried boulder down at the aim point
    pub(crate) fn drop_boulder(&mut self) -> Result<(), Error> {
        if !self.protagonist.condition.carrying {
            return Ok(());
        }
        let size = self.grid.block_size();
        let target = self.protagonist.aim_point();
        let bounds = BoundingBox::new(target, size, size)?;
        match self.grid.insert_at(ObstacleKind::Boulder, bounds) {
            Some(id) => debug!("Dropped boulder {id} at {target}"),
            None => debug!("Dropped boulder outside the level at {target}; it is gone"),
        }
        let condition = &mut self.protagonist.condition;
        condition.carrying = false;
        condition.can_lift = false;
        Ok(())
    }

    /// Return the protagonist to its start for another attempt.
    ///
    /// A carried boulder is dropped first. The protagonist comes back at rest
    /// and airborne with no ground, and both terminal flags are cleared.
    pub fn reset_protagonist(&mut self) -> Result<(), Error> {
        self.drop_boulder()?;
        let protagonist = &mut self.protagonist;
        protagonist.body.velocity = Vector::ZERO;
        protagonist.body.place(self.start_center);
        protagonist.condition.airborne = true;
        protagonist.condition.jumping = false;
        protagonist.condition.reset_airborne_ticks();
        self.ground = None;
        self.finished = false;
        self.victorious = false;
        self.refresh_view();
        debug!("Protagonist reset to {}", self.start_center);
        Ok(())
    }
}
