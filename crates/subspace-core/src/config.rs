//! Battle configuration.
//!
//! Every field has a default, so a JSON file only needs the values it wants
//! to change:
//!
//! ```
//! use subspace_core::config::BattleConfig;
//!
//! let config = BattleConfig::from_json(r#"{ "seed": 7, "enemy_count": 5 }"#).unwrap();
//! assert_eq!(config.enemy_count, 5);
//! assert_eq!(config.player_crew, 5);
//! ```

use crate::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, ENEMY_COUNT, ENEMY_CREW, ENEMY_FIRE_CHANCE,
    ENEMY_MIN_SPAWN_DISTANCE, PLAYER_CREW, SPAWN_MARGIN,
};
use crate::generation::{ShipLayout, SpawnArea};
use serde::{Deserialize, Serialize};

/// Everything needed to set up a battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Seed for every random decision in the battle
    pub seed: u64,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Enemies spawn at least this far inside the arena edge
    pub spawn_margin: f32,
    pub enemy_count: u32,
    /// Enemies spawn at least this far from the player
    pub enemy_min_spawn_distance: f32,
    /// Chance per tick that each enemy tries to fire
    pub enemy_fire_chance: f64,
    pub player_crew: u32,
    pub enemy_crew: u32,
    pub player_layout: ShipLayout,
    pub enemy_layout: ShipLayout,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
            enemy_count: ENEMY_COUNT,
            enemy_min_spawn_distance: ENEMY_MIN_SPAWN_DISTANCE,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,
            player_crew: PLAYER_CREW,
            enemy_crew: ENEMY_CREW,
            player_layout: ShipLayout::player(),
            enemy_layout: ShipLayout::enemy(),
        }
    }
}

impl BattleConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: BattleConfig = serde_json::from_str(json)?;
        let errors = validate_config(&config);
        if !errors.is_empty() {
            for error in &errors {
                log::warn!("rejected battle config: {}", error);
            }
            return Err(ConfigLoadError::Invalid(errors));
        }
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn spawn_area(&self) -> SpawnArea {
        SpawnArea {
            width: self.arena_width,
            height: self.arena_height,
            margin: self.spawn_margin,
        }
    }
}

/// Which of the two layouts a problem was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutRole {
    Player,
    Enemy,
}

impl std::fmt::Display for LayoutRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutRole::Player => write!(f, "player"),
            LayoutRole::Enemy => write!(f, "enemy"),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Arena has no room inside its spawn margins.
    ArenaTooSmall { width: f32, height: f32, margin: f32 },
    /// Fire chance is not a probability.
    FireChanceOutOfRange(f64),
    /// Negative minimum spawn distance.
    NegativeSpawnDistance(f32),
    /// Grid with no cells.
    EmptyGrid(LayoutRole),
    /// Layout without a core would start out destroyed.
    MissingCore(LayoutRole),
    /// Layout cell outside its grid.
    CellOutOfBounds { role: LayoutRole, x: i32, y: i32 },
    /// Two layout cells share coordinates.
    DuplicateCell { role: LayoutRole, x: i32, y: i32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ArenaTooSmall {
                width,
                height,
                margin,
            } => write!(f, "arena {}x{} has no room inside margin {}", width, height, margin),
            ConfigError::FireChanceOutOfRange(chance) => {
                write!(f, "enemy fire chance {} is not in [0, 1]", chance)
            }
            ConfigError::NegativeSpawnDistance(d) => {
                write!(f, "minimum spawn distance {} is negative", d)
            }
            ConfigError::EmptyGrid(role) => write!(f, "{} layout has an empty grid", role),
            ConfigError::MissingCore(role) => write!(f, "{} layout has no core", role),
            ConfigError::CellOutOfBounds { role, x, y } => {
                write!(f, "{} layout cell ({}, {}) is outside the grid", role, x, y)
            }
            ConfigError::DuplicateCell { role, x, y } => {
                write!(f, "{} layout has more than one component at ({}, {})", role, x, y)
            }
        }
    }
}

/// Validate a battle configuration, returning all errors found.
pub fn validate_config(config: &BattleConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.arena_width <= 2.0 * config.spawn_margin
        || config.arena_height <= 2.0 * config.spawn_margin
    {
        errors.push(ConfigError::ArenaTooSmall {
            width: config.arena_width,
            height: config.arena_height,
            margin: config.spawn_margin,
        });
    }
    if !(0.0..=1.0).contains(&config.enemy_fire_chance) {
        errors.push(ConfigError::FireChanceOutOfRange(config.enemy_fire_chance));
    }
    if config.enemy_min_spawn_distance < 0.0 {
        errors.push(ConfigError::NegativeSpawnDistance(
            config.enemy_min_spawn_distance,
        ));
    }

    validate_layout(&config.player_layout, LayoutRole::Player, &mut errors);
    validate_layout(&config.enemy_layout, LayoutRole::Enemy, &mut errors);

    errors
}

fn validate_layout(layout: &ShipLayout, role: LayoutRole, errors: &mut Vec<ConfigError>) {
    if layout.grid_width <= 0 || layout.grid_height <= 0 {
        errors.push(ConfigError::EmptyGrid(role));
    }
    if !layout.has_core() {
        errors.push(ConfigError::MissingCore(role));
    }
    for cell in layout.out_of_bounds() {
        errors.push(ConfigError::CellOutOfBounds {
            role,
            x: cell.x,
            y: cell.y,
        });
    }
    for cell in layout.duplicates() {
        errors.push(ConfigError::DuplicateCell {
            role,
            x: cell.x,
            y: cell.y,
        });
    }
}

/// Errors that can occur loading a config
#[derive(Debug)]
pub enum ConfigLoadError {
    Json(serde_json::Error),
    Invalid(Vec<ConfigError>),
}

impl From<serde_json::Error> for ConfigLoadError {
    fn from(e: serde_json::Error) -> Self {
        ConfigLoadError::Json(e)
    }
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigLoadError::Invalid(errors) => {
                write!(f, "invalid config:")?;
                for error in errors {
                    write!(f, " {};", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigLoadError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BattleConfig::default()).is_empty());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = BattleConfig::from_json("{}").unwrap();
        assert_eq!(config, BattleConfig::default());
    }

    #[test]
    fn test_reports_every_problem() {
        let config = BattleConfig {
            arena_width: 150.0,
            enemy_fire_chance: 1.5,
            enemy_layout: ShipLayout::new(4, 4)
                .with(ComponentKind::Armor, 0, 0)
                .with(ComponentKind::Armor, 0, 0)
                .with(ComponentKind::Engine, 9, 9),
            ..Default::default()
        };

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ConfigError::FireChanceOutOfRange(1.5)));
        assert!(errors.contains(&ConfigError::MissingCore(LayoutRole::Enemy)));
        assert!(errors.contains(&ConfigError::CellOutOfBounds {
            role: LayoutRole::Enemy,
            x: 9,
            y: 9
        }));
        assert!(errors.contains(&ConfigError::DuplicateCell {
            role: LayoutRole::Enemy,
            x: 0,
            y: 0
        }));
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        match BattleConfig::from_json(r#"{ "enemy_fire_chance": -0.1 }"#) {
            Err(ConfigLoadError::Invalid(errors)) => {
                assert_eq!(errors, vec![ConfigError::FireChanceOutOfRange(-0.1)])
            }
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let json = r#"{ "player_layout": { "grid_width": 10, "grid_height": 10,
            "cells": [{ "kind": "tractor_beam", "x": 1, "y": 1 }] } }"#;
        assert!(matches!(
            BattleConfig::from_json(json),
            Err(ConfigLoadError::Json(_))
        ));
    }
}
