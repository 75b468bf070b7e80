//! Error types
//!
//! Domain errors signal an invalid geometric operation and are fatal to the
//! tick that raised them. Configuration errors are raised while a level is
//! being assembled.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DomainError {
    /// A vector component was NaN or infinite
    NonFinite { x: f32, y: f32 },
    /// The operation has no meaning for the zero vector
    ZeroVector { operation: &'static str },
    /// A segment's endpoints coincide
    DegenerateSegment,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { x, y } => write!(f, "non-finite vector component: ({x}, {y})"),
            Self::ZeroVector { operation } => {
                write!(f, "cannot {operation} the zero vector")
            }
            Self::DegenerateSegment => {
                write!(f, "segment endpoints must not coincide")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    EmptyPattern,
    PatternLengthMismatch { velocities: usize, durations: usize },
    NonPositiveDuration { segment: usize },
    NonPositiveSize { width: f32, height: f32 },
    NonFiniteCenter { x: f32, y: f32 },
    NonPositiveBlockSize,
    MissingProtagonist,
    MissingGoal,
    RowTooLong { row: usize, length: usize, expected: usize },
    MissingPlatformPattern { index: usize },
    InvalidConstants(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "motion pattern has no segments"),
            Self::PatternLengthMismatch {
                velocities,
                durations,
            } => write!(
                f,
                "motion pattern has {velocities} velocities but {durations} durations"
            ),
            Self::NonPositiveDuration { segment } => {
                write!(f, "motion pattern segment {segment} has a non-positive duration")
            }
            Self::NonPositiveSize { width, height } => {
                write!(f, "bounding box must have positive size, got {width}x{height}")
            }
            Self::NonFiniteCenter { x, y } => {
                write!(f, "bounding box center must be finite, got ({x}, {y})")
            }
            Self::NonPositiveBlockSize => write!(f, "block size must be positive"),
            Self::MissingProtagonist => write!(f, "level layout has no protagonist"),
            Self::MissingGoal => write!(f, "level layout has no goal"),
            Self::RowTooLong {
                row,
                length,
                expected,
            } => write!(
                f,
                "layout row {row} has {length} cells, level width is {expected}"
            ),
            Self::MissingPlatformPattern { index } => {
                write!(f, "no platform spec for moving platform #{index}")
            }
            Self::InvalidConstants(msg) => write!(f, "invalid level constants: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Any failure raised by the engine
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Domain(DomainError),
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "domain error: {e}"),
            Self::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<DomainError> for Error {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = DomainError::ZeroVector {
            operation: "normalize",
        };
        assert_eq!(e.to_string(), "cannot normalize the zero vector");

        let e: Error = ConfigError::NonPositiveDuration { segment: 2 }.into();
        assert_eq!(
            e.to_string(),
            "configuration error: motion pattern segment 2 has a non-positive duration"
        );
    }
}
