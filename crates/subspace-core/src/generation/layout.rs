//! Ship layouts - which component goes in which grid cell

use crate::components::{Component, ComponentKind};
use crate::constants::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
use serde::{Deserialize, Serialize};

/// One placed cell of a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub kind: ComponentKind,
    pub x: i32,
    pub y: i32,
}

/// Blueprint for building a ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipLayout {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Cells in insertion order (this becomes the ship's component order)
    pub cells: Vec<LayoutCell>,
}

impl ShipLayout {
    pub fn new(grid_width: i32, grid_height: i32) -> Self {
        Self {
            grid_width,
            grid_height,
            cells: Vec::new(),
        }
    }

    pub fn with(mut self, kind: ComponentKind, x: i32, y: i32) -> Self {
        self.cells.push(LayoutCell { kind, x, y });
        self
    }

    /// Default player ship: core, two engines, two lasers, a cannon, two
    /// reactors, three armor plates
    pub fn player() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
            .with(ComponentKind::Core, 4, 4)
            .with(ComponentKind::Engine, 4, 6)
            .with(ComponentKind::Engine, 4, 7)
            .with(ComponentKind::WeaponLaser, 3, 3)
            .with(ComponentKind::WeaponLaser, 5, 3)
            .with(ComponentKind::WeaponCannon, 4, 2)
            .with(ComponentKind::Power, 3, 5)
            .with(ComponentKind::Power, 5, 5)
            .with(ComponentKind::Armor, 3, 4)
            .with(ComponentKind::Armor, 5, 4)
            .with(ComponentKind::Armor, 4, 5)
    }

    /// Default enemy ship: smaller and simpler
    pub fn enemy() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
            .with(ComponentKind::Core, 4, 4)
            .with(ComponentKind::Engine, 4, 6)
            .with(ComponentKind::WeaponLaser, 4, 3)
            .with(ComponentKind::Power, 3, 4)
            .with(ComponentKind::Armor, 5, 4)
    }

    /// Fresh full-health components, in cell order
    pub fn build_components(&self) -> Vec<Component> {
        self.cells
            .iter()
            .map(|cell| Component::new(cell.kind, cell.x, cell.y))
            .collect()
    }

    pub fn has_core(&self) -> bool {
        self.cells.iter().any(|c| c.kind == ComponentKind::Core)
    }

    /// Cells that fall outside the grid
    pub fn out_of_bounds(&self) -> Vec<LayoutCell> {
        self.cells
            .iter()
            .filter(|c| c.x < 0 || c.y < 0 || c.x >= self.grid_width || c.y >= self.grid_height)
            .copied()
            .collect()
    }

    /// Cells that reuse an earlier cell's coordinates
    pub fn duplicates(&self) -> Vec<LayoutCell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(i, c)| self.cells[..*i].iter().any(|p| p.x == c.x && p.y == c.y))
            .map(|(_, c)| *c)
            .collect()
    }
}

impl Default for ShipLayout {
    fn default() -> Self {
        Self::enemy()
    }
}
