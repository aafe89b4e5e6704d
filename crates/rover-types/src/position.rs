use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::PositionError;

/// Cardinal heading of the rover.
///
/// Opaque tag: no movement logic is attached to it anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::E => "E",
            Direction::S => "S",
            Direction::W => "W",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = PositionError;

    /// Accepts only the exact uppercase letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Direction::N),
            "E" => Ok(Direction::E),
            "S" => Ok(Direction::S),
            "W" => Ok(Direction::W),
            other => Err(PositionError::InvalidDirection(other.to_string())),
        }
    }
}

/// A grid coordinate, always within `[Coordinate::MIN, Coordinate::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Coordinate(i64);

impl Coordinate {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 200;

    /// Build a coordinate, rejecting values outside the grid.
    pub fn new(value: i64) -> Result<Self, PositionError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PositionError::InvalidCoordinate(value))
        }
    }

    /// Wrap a value read back from storage without re-checking the range.
    pub fn from_stored(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the client session that owns a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a session identifier. Empty or whitespace-only values are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, PositionError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PositionError::InvalidSession);
        }
        Ok(Self(value))
    }

    /// Mint a fresh identifier for a new session (UUID v7, time-sortable).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated `(x, y, direction)` triple ready to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionInput {
    pub x: Coordinate,
    pub y: Coordinate,
    pub direction: Direction,
}

impl PositionInput {
    /// Build an input from raw parts, checking both coordinates.
    pub fn new(x: i64, y: i64, direction: Direction) -> Result<Self, PositionError> {
        Ok(Self {
            x: Coordinate::new(x)?,
            y: Coordinate::new(y)?,
            direction,
        })
    }
}

/// The last reported position of a session's rover, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoverPosition {
    pub session_id: SessionId,
    pub x: Coordinate,
    pub y: Coordinate,
    pub direction: Direction,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoverPosition {
    /// The `(x, y, direction)` triple without session or timestamps.
    pub fn input(&self) -> PositionInput {
        PositionInput {
            x: self.x,
            y: self.y,
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_roundtrip_str() {
        for direction in Direction::ALL {
            let parsed: Direction = direction.as_str().parse().unwrap();
            assert_eq!(parsed, direction);
        }
    }

    #[test]
    fn test_direction_rejects_lowercase_and_unknown() {
        assert!("n".parse::<Direction>().is_err());
        assert!("Q".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
        assert!("NE".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Direction::W).unwrap(), "\"W\"");
        let d: Direction = serde_json::from_str("\"S\"").unwrap();
        assert_eq!(d, Direction::S);
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(1).is_ok());
        assert!(Coordinate::new(200).is_ok());
        assert!(Coordinate::new(0).is_err());
        assert!(Coordinate::new(201).is_err());
        assert!(Coordinate::new(-1).is_err());
    }

    #[test]
    fn test_session_id_rejects_blank() {
        assert!(SessionId::new("").is_err());
        assert!(SessionId::new("   ").is_err());
        assert_eq!(SessionId::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_session_id_generate_is_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_position_input_serialize() {
        let input = PositionInput::new(10, 20, Direction::N).unwrap();
        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json, serde_json::json!({"x": 10, "y": 20, "direction": "N"}));
    }
}
