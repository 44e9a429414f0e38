//! Planar geometry helpers shared by every system.
//!
//! Positions are expressed in cell units: the centre of cell `(column, row)`
//! sits exactly on the point `(column, row)`, so a unit standing on a
//! waypoint has integral coordinates. Rows grow southwards.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::CellCoord;

/// Continuous two-dimensional vector measured in cell units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component, growing eastwards.
    pub x: f32,
    /// Vertical component, growing southwards.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared distance between two points.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Reports whether `self` lies within `radius` of `other`, boundary inclusive.
    #[must_use]
    pub fn within(self, other: Self, radius: f32) -> bool {
        self.distance_squared(other) <= radius * radius
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Angle in radians of the vector pointing from `from` to `to`.
///
/// Zero points east and the angle grows towards the south. Coincident points
/// yield zero.
#[must_use]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    delta.y.atan2(delta.x)
}

/// Cardinal travel directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Snaps an arbitrary vector onto the dominant cardinal axis.
    ///
    /// Horizontal wins ties. The zero vector has no direction.
    #[must_use]
    pub fn from_vector(vector: Vec2) -> Option<Self> {
        if vector.length_squared() <= f32::EPSILON {
            return None;
        }

        if vector.x.abs() >= vector.y.abs() {
            if vector.x > 0.0 {
                Some(Self::East)
            } else {
                Some(Self::West)
            }
        } else if vector.y > 0.0 {
            Some(Self::South)
        } else {
            Some(Self::North)
        }
    }

    /// Cardinal direction of travel from one cell toward another.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        Self::from_vector(to.to_point() - from.to_point())
    }

    /// Unit vector pointing in this direction.
    #[must_use]
    pub const fn unit_vector(self) -> Vec2 {
        match self {
            Self::North => Vec2::new(0.0, -1.0),
            Self::East => Vec2::new(1.0, 0.0),
            Self::South => Vec2::new(0.0, 1.0),
            Self::West => Vec2::new(-1.0, 0.0),
        }
    }

    /// Rotation in radians matching [`angle_toward`] for this direction.
    #[must_use]
    pub fn rotation(self) -> f32 {
        let vector = self.unit_vector();
        vector.y.atan2(vector.x)
    }
}
