//! Protagonist behavior state
//!
//! The [`Condition`] flags are rewritten every tick from input and collision
//! outcomes. [`Pose`] is the render-facing summary derived from them.

use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::geom::Vector;

/// One of the eight ordinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Grid step for this direction. Diagonals are (±1, ±1), not unit length.
    pub fn step(self) -> Vector {
        let (x, y) = match self {
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::UpLeft => (-1.0, -1.0),
            Direction::UpRight => (1.0, -1.0),
            Direction::DownLeft => (-1.0, 1.0),
            Direction::DownRight => (1.0, 1.0),
        };
        Vector::unit_step(x, y)
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpLeft | Direction::UpRight | Direction::DownLeft | Direction::DownRight
        )
    }

    pub fn points_up(self) -> bool {
        matches!(self, Direction::Up | Direction::UpLeft | Direction::UpRight)
    }

    pub fn points_down(self) -> bool {
        matches!(self, Direction::Down | Direction::DownLeft | Direction::DownRight)
    }
}

/// Everything the protagonist "is" on a given tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// A horizontal intent is held
    pub walking: bool,
    /// Only gravity acts; no ground underneath
    pub airborne: bool,
    /// Velocity points upward
    pub jumping: bool,
    /// A boulder is held overhead
    pub carrying: bool,
    /// The lift action is armed
    pub can_lift: bool,
    pub facing: Direction,
    /// Where a boulder would be picked up or placed
    pub aim: Direction,
    airborne_ticks: u32,
}

impl Condition {
    pub fn new(facing: Direction) -> Self {
        Self {
            walking: false,
            airborne: true,
            jumping: false,
            carrying: false,
            can_lift: false,
            facing,
            aim: facing,
            airborne_ticks: 0,
        }
    }

    /// Resolve the 8-way aim. A diagonal wins whenever a horizontal and a
    /// vertical intent are held together; with no intent the aim follows facing.
    pub fn set_aim(&mut self, input: &TickInput) {
        self.aim = match (input.left, input.right, input.up, input.down) {
            (true, _, true, _) => Direction::UpLeft,
            (true, _, _, true) => Direction::DownLeft,
            (true, _, _, _) => Direction::Left,
            (_, true, true, _) => Direction::UpRight,
            (_, true, _, true) => Direction::DownRight,
            (_, true, _, _) => Direction::Right,
            (_, _, true, _) => Direction::Up,
            (_, _, _, true) => Direction::Down,
            _ => self.facing,
        };
    }

    /// Aim as a grid step; see [`Direction::step`]
    pub fn aim_step(&self) -> Vector {
        self.aim.step()
    }

    pub fn airborne_ticks(&self) -> u32 {
        self.airborne_ticks
    }

    /// Count a tick in the air, or clear the count on the ground
    pub fn tick_airborne(&mut self) {
        if self.airborne {
            self.airborne_ticks = self.airborne_ticks.saturating_add(1);
        } else {
            self.airborne_ticks = 0;
        }
    }

    pub fn reset_airborne_ticks(&mut self) {
        self.airborne_ticks = 0;
    }

    /// Summary for the animation layer
    pub fn pose(&self) -> Pose {
        let tilt = if self.aim.points_up() {
            Tilt::Up
        } else if self.aim.points_down() {
            Tilt::Down
        } else {
            Tilt::Level
        };
        let stance = if self.airborne {
            Stance::Airborne
        } else if self.walking {
            Stance::Walking
        } else {
            Stance::Grounded
        };
        Pose {
            facing_left: self.facing == Direction::Left,
            tilt,
            diagonal: self.aim.is_diagonal(),
            stance,
            carrying: self.carrying,
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tilt {
    Level,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Grounded,
    Walking,
    Airborne,
}

/// Animation key: which sprite strip a renderer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub facing_left: bool,
    pub tilt: Tilt,
    pub diagonal: bool,
    pub stance: Stance,
    pub carrying: bool,
}

impl Default for Pose {
    fn default() -> Self {
        Condition::default().pose()
    }
}
