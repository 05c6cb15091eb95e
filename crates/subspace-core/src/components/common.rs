//! Common components used across multiple entity types.

use crate::constants::GRID_SIZE;
use serde::{Deserialize, Serialize};

/// 2D vector in world or ship-local space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle`
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }

    /// Rotate by `angle` radians (positive turns +x toward +y)
    pub fn rotate(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Angle of the vector from the +x axis
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Axis-aligned rectangle in world space (top-left corner plus size)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not
    pub fn contains(&self, point: &Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// A ship's placement in the world: everything needed to move between
/// world space and the ship's grid.
///
/// Grid-local offsets are measured from the grid center
/// (`grid_width / 2`, `grid_height / 2`) in units of [`GRID_SIZE`], in the
/// ship's unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipFrame {
    pub position: Vec2,
    pub angle: f32,
    pub grid_width: i32,
    pub grid_height: i32,
}

impl ShipFrame {
    fn grid_center(&self) -> Vec2 {
        Vec2::new(self.grid_width as f32 / 2.0, self.grid_height as f32 / 2.0)
    }

    /// Unrotated offset of a grid cell from the ship position
    pub fn grid_to_local(&self, grid_x: i32, grid_y: i32) -> Vec2 {
        let center = self.grid_center();
        Vec2::new(
            (grid_x as f32 - center.x) * GRID_SIZE,
            (grid_y as f32 - center.y) * GRID_SIZE,
        )
    }

    /// World position of a grid cell, following the ship's heading
    pub fn grid_to_world(&self, grid_x: i32, grid_y: i32) -> Vec2 {
        self.position + self.grid_to_local(grid_x, grid_y).rotate(self.angle)
    }

    /// Grid cell under a world point. Truncates toward zero, so points just
    /// left of or above the grid origin land in cell 0 rather than -1.
    pub fn world_to_grid(&self, point: Vec2) -> (i32, i32) {
        let local = (point - self.position).rotate(-self.angle);
        let center = self.grid_center();
        (
            (local.x / GRID_SIZE + center.x) as i32,
            (local.y / GRID_SIZE + center.y) as i32,
        )
    }
}

/// Stable ship identifier, also used as projectile owner tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ship#{}", self.0)
    }
}
