//! Level layouts and tunable constants
//!
//! A layout is a grid of characters, one row per line. The first row fixes
//! the level width in cells; every entity is centered on its cell.
//!
//! | char | entity |
//! |------|--------|
//! | `#` | block |
//! | `0` | boulder |
//! | `P` | protagonist |
//! | `G` | goal |
//! | `B` | ball |
//! | `^` `V` `<` `>` | spikes pointing up/down/left/right |
//! | `-` | moving platform (the n-th `-` uses the n-th [`PlatformSpec`]) |
//!
//! Anything else (conventionally `.`) is empty space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;
use crate::error::ConfigError;
use crate::geom::Vector;
use crate::sim::{
    Ball, BoundingBox, Direction, Goal, Level, LevelSetup, MotionPattern, MovingPlatform,
    ObstacleKind, Protagonist, SpatialIndex, Spikes,
};

/// A small level with every entity kind, used by the native runner
pub const DEMO_MAP: &str = concat!(
    "..............................\n",
    "...........................G..\n",
    ".......................######.\n",
    "..P.........B.................\n",
    ".......0...........-..........\n",
    "########..######........^^....\n",
    "########..####################",
);

/// Size and cyclic route of one moving platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub width: f32,
    pub height: f32,
    /// Total horizontal travel of each segment
    pub pattern_x: Vec<f32>,
    /// Total vertical travel of each segment
    pub pattern_y: Vec<f32>,
    /// Ticks each segment lasts
    pub periods: Vec<u32>,
}

impl PlatformSpec {
    /// Per-tick velocities: each segment's travel spread over its period
    pub fn pattern(&self) -> Result<MotionPattern, ConfigError> {
        for axis in [&self.pattern_x, &self.pattern_y] {
            if axis.len() != self.periods.len() {
                return Err(ConfigError::PatternLengthMismatch {
                    velocities: axis.len(),
                    durations: self.periods.len(),
                });
            }
        }
        if let Some(segment) = self.periods.iter().position(|&p| p == 0) {
            return Err(ConfigError::NonPositiveDuration { segment });
        }
        let velocities = self
            .pattern_x
            .iter()
            .zip(&self.pattern_y)
            .zip(&self.periods)
            .map(|((&dx, &dy), &period)| {
                let period = period as f32;
                Vector::new(dx / period, dy / period).map_err(invalid)
            })
            .collect::<Result<Vec<_>, _>>()?;
        MotionPattern::from_parts(&velocities, &self.periods)
    }
}

/// Tunables for one level. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConstants {
    pub block_size: f32,

    pub protagonist_width: f32,
    pub protagonist_height: f32,
    pub walk_speed: f32,
    pub jump_speed: f32,
    /// Distance from the protagonist's center to its lift/drop target
    pub reach: f32,
    pub start_facing: Direction,

    pub ball_width: f32,
    pub ball_height: f32,
    pub ball_speed_x: f32,
    pub ball_speed_y: f32,

    pub goal_width: f32,
    pub goal_height: f32,

    pub spike_width: f32,
    pub spike_height: f32,

    /// Downward acceleration per tick while airborne
    pub gravity: f32,

    pub platforms: Vec<PlatformSpec>,
}

impl Default for LevelConstants {
    fn default() -> Self {
        Self {
            block_size: 40.0,

            protagonist_width: 30.0,
            protagonist_height: 60.0,
            walk_speed: 5.0,
            jump_speed: 12.0,
            reach: 40.0,
            start_facing: Direction::Right,

            ball_width: 20.0,
            ball_height: 20.0,
            ball_speed_x: 3.0,
            ball_speed_y: 0.0,

            goal_width: 40.0,
            goal_height: 40.0,

            spike_width: 40.0,
            spike_height: 20.0,

            gravity: GRAVITY,

            platforms: vec![PlatformSpec {
                width: 120.0,
                height: 20.0,
                pattern_x: vec![160.0, -160.0],
                pattern_y: vec![0.0, 0.0],
                periods: vec![80, 80],
            }],
        }
    }
}

impl LevelConstants {
    /// Overlay a JSON document on the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(invalid)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(invalid)
    }

    /// Spikes flush against the cell edge opposite the way they point
    fn spikes_at(&self, symbol: char, cell_center: Vec2) -> Result<Option<Spikes>, ConfigError> {
        let dx = (self.block_size - self.spike_width) / 2.0;
        let dy = (self.block_size - self.spike_height) / 2.0;
        let (offset, facing) = match symbol {
            '^' => (Vec2::new(0.0, dy), Direction::Up),
            'V' => (Vec2::new(0.0, -dy), Direction::Down),
            '<' => (Vec2::new(dx, 0.0), Direction::Left),
            '>' => (Vec2::new(-dx, 0.0), Direction::Right),
            _ => return Ok(None),
        };
        let bounds = BoundingBox::new(cell_center + offset, self.spike_width, self.spike_height)?;
        Ok(Some(Spikes::new(bounds, facing)))
    }
}

fn invalid(e: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidConstants(e.to_string())
}

/// Build a playable level from a layout grid
pub fn build_level(map: &str, constants: &LevelConstants, seed: u64) -> Result<Level, ConfigError> {
    let bs = constants.block_size;
    let width = map.lines().next().map_or(0, |row| row.chars().count());
    let mut grid = SpatialIndex::new(width, bs)?;

    let mut protagonist = None;
    let mut goal = None;
    let mut balls = Vec::new();
    let mut spikes = Vec::new();
    let mut platforms = Vec::new();
    let ball_velocity =
        Vector::new(constants.ball_speed_x, constants.ball_speed_y).map_err(invalid)?;

    for (row, line) in map.lines().enumerate() {
        let length = line.chars().count();
        if length > width {
            return Err(ConfigError::RowTooLong {
                row,
                length,
                expected: width,
            });
        }
        for (col, symbol) in line.chars().enumerate() {
            let center = Vec2::new((col as f32 + 0.5) * bs, (row as f32 + 0.5) * bs);
            match symbol {
                '#' | '0' => {
                    let kind = if symbol == '#' {
                        ObstacleKind::Block
                    } else {
                        ObstacleKind::Boulder
                    };
                    grid.insert_static(kind, BoundingBox::new(center, bs, bs)?, col as i64);
                }
                'P' => {
                    let bounds = BoundingBox::new(
                        center,
                        constants.protagonist_width,
                        constants.protagonist_height,
                    )?;
                    protagonist = Some(Protagonist::new(
                        bounds,
                        constants.walk_speed,
                        constants.jump_speed,
                        constants.reach,
                        constants.start_facing,
                    ));
                }
                'G' => {
                    let bounds =
                        BoundingBox::new(center, constants.goal_width, constants.goal_height)?;
                    goal = Some(Goal::new(bounds));
                }
                'B' => {
                    let bounds =
                        BoundingBox::new(center, constants.ball_width, constants.ball_height)?;
                    balls.push(Ball::new(bounds, ball_velocity));
                }
                '-' => {
                    let index = platforms.len();
                    let spec = constants
                        .platforms
                        .get(index)
                        .ok_or(ConfigError::MissingPlatformPattern { index })?;
                    let bounds = BoundingBox::new(center, spec.width, spec.height)?;
                    platforms.push(MovingPlatform::new(bounds, spec.pattern()?));
                }
                _ => {
                    if let Some(s) = constants.spikes_at(symbol, center)? {
                        spikes.push(s);
                    }
                }
            }
        }
    }

    Ok(Level::new(LevelSetup {
        protagonist: protagonist.ok_or(ConfigError::MissingProtagonist)?,
        grid,
        balls,
        spikes,
        platforms,
        goal: goal.ok_or(ConfigError::MissingGoal)?,
        gravity: Vector::new(0.0, constants.gravity).map_err(invalid)?,
        seed,
    }))
}
