//! Cyclic motion patterns for moving platforms

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geom::Vector;

/// One leg of a pattern: a velocity held for `duration` ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub velocity: Vector,
    pub duration: u32,
}

/// A looped schedule of velocities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionPattern {
    segments: Vec<Segment>,
    /// Index of the active segment
    current: usize,
    /// Ticks spent in the active segment
    elapsed: u32,
}

impl MotionPattern {
    pub fn new(segments: Vec<Segment>) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if let Some(segment) = segments.iter().position(|s| s.duration == 0) {
            return Err(ConfigError::NonPositiveDuration { segment });
        }
        Ok(Self {
            segments,
            current: 0,
            elapsed: 0,
        })
    }

    /// Build from parallel velocity/duration lists
    pub fn from_parts(velocities: &[Vector], durations: &[u32]) -> Result<Self, ConfigError> {
        if velocities.len() != durations.len() {
            return Err(ConfigError::PatternLengthMismatch {
                velocities: velocities.len(),
                durations: durations.len(),
            });
        }
        Self::new(
            velocities
                .iter()
                .zip(durations)
                .map(|(&velocity, &duration)| Segment { velocity, duration })
                .collect(),
        )
    }

    /// Step one tick and return the velocity to use for it
    pub fn advance(&mut self) -> Vector {
        self.elapsed += 1;
        if self.elapsed == self.segments[self.current].duration {
            self.elapsed = 0;
            self.current += 1;
        }
        if self.current == self.segments.len() {
            self.current = 0;
        }
        self.segments[self.current].velocity
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}
