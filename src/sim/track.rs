//! Static track layout
//!
//! ```text
//! ----------------------
//! |                    |
//! |    --------------  |
//! |          |         |
//! |          |  -------|
//! |-----     |  |      |
//! |          |  |  |   |
//! |          |  |  |   |
//! |          |     |   |
//! |   --------------   |
//! |                    |
//! ----------------------
//! ```
//!
//! Coordinates are in meters with +y up. The goal line sits in the bottom
//! corridor and the vehicle spawns on it, facing +x.

use super::camera::Bounds;

/// Half thickness of every wall
pub const WALL_HALF_THICKNESS: f32 = 0.1;

/// Wall direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    pub center: [f32; 2],
    pub half_extents: [f32; 2],
}

impl Rect2 {
    pub fn min(&self) -> [f32; 2] {
        [
            self.center[0] - self.half_extents[0],
            self.center[1] - self.half_extents[1],
        ]
    }

    pub fn max(&self) -> [f32; 2] {
        [
            self.center[0] + self.half_extents[0],
            self.center[1] + self.half_extents[1],
        ]
    }

    pub fn contains(&self, point: [f32; 2]) -> bool {
        let (min, max) = (self.min(), self.max());
        (min[0]..=max[0]).contains(&point[0]) && (min[1]..=max[1]).contains(&point[1])
    }
}

/// A straight wall segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub center: [f32; 2],
    pub length: f32,
    pub orientation: Orientation,
}

impl Wall {
    pub const fn new(x: f32, y: f32, length: f32, orientation: Orientation) -> Self {
        Self {
            center: [x, y],
            length,
            orientation,
        }
    }

    pub fn rect(&self) -> Rect2 {
        let half_extents = match self.orientation {
            Orientation::Horizontal => [self.length / 2.0, WALL_HALF_THICKNESS],
            Orientation::Vertical => [WALL_HALF_THICKNESS, self.length / 2.0],
        };
        Rect2 {
            center: self.center,
            half_extents,
        }
    }
}

/// Where the vehicle starts and returns to on reset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPose {
    pub position: [f32; 2],
    /// Radians, counter-clockwise from +y (the vehicle's nose)
    pub angle: f32,
}

use Orientation::{Horizontal, Vertical};

const WORKSHOP_WALLS: [Wall; 11] = [
    // Outer boundary
    Wall::new(0.0, 0.0, 40.0, Horizontal),
    Wall::new(0.0, 40.0, 40.0, Horizontal),
    Wall::new(-20.0, 20.0, 40.0, Vertical),
    Wall::new(20.0, 20.0, 40.0, Vertical),
    // Inner maze
    Wall::new(0.0, 5.0, 20.0, Horizontal),
    Wall::new(10.0, 10.0, 10.0, Vertical),
    Wall::new(12.5, 20.0, 15.0, Horizontal),
    Wall::new(5.0, 15.0, 10.0, Vertical),
    Wall::new(0.0, 17.5, 25.0, Vertical),
    Wall::new(2.5, 30.0, 25.0, Horizontal),
    Wall::new(-15.0, 17.5, 10.0, Horizontal),
];

/// Static geometry for one track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub walls: Vec<Wall>,
    pub goal: Rect2,
    pub spawn: SpawnPose,
}

impl TrackLayout {
    /// The single track the game ships with
    pub fn workshop() -> Self {
        Self {
            walls: WORKSHOP_WALLS.to_vec(),
            // Very thin line across the bottom corridor
            goal: Rect2 {
                center: [0.0, 2.5],
                half_extents: [0.01, 2.5],
            },
            spawn: SpawnPose {
                position: [0.0, 2.5],
                angle: -std::f32::consts::FRAC_PI_2,
            },
        }
    }

    /// Smallest box containing every wall
    pub fn bounds(&self) -> Bounds {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        for rect in self.walls.iter().map(Wall::rect) {
            let (lo, hi) = (rect.min(), rect.max());
            for axis in 0..2 {
                min[axis] = min[axis].min(lo[axis]);
                max[axis] = max[axis].max(hi[axis]);
            }
        }
        Bounds::new(min, max)
    }
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self::workshop()
    }
}
