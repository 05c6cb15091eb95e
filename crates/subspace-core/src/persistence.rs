//! Save/Load functionality for persisting battle state
//!
//! Uses bincode for compact binary serialization. Ships are stored in roster
//! order so the battle resumes with the same iteration order.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::Projectile;
use crate::config::BattleConfig;
use crate::engine::GameMode;
use crate::ship::Ship;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub config: BattleConfig,
    /// Ships in roster order
    pub ships: Vec<Ship>,
    /// Index of the player ship in `ships`, if it is still alive
    pub player: Option<usize>,
    pub projectiles: Vec<Projectile>,
    /// Seconds of simulated battle
    pub battle_time: f64,
    pub tick: u64,
    pub mode: GameMode,
    pub paused: bool,
    pub next_ship_id: u32,
}

/// Write a battle snapshot
pub fn save_battle<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    bincode::serialize_into(writer, data)?;
    Ok(())
}

/// Read a battle snapshot, rejecting other format versions
pub fn load_battle<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;

    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    if data.player.is_some_and(|idx| idx >= data.ships.len()) {
        return Err(SaveError::Corrupt("player index out of range"));
    }

    Ok(data)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
    Corrupt(&'static str),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::Corrupt(reason) => write!(f, "Corrupt save: {}", reason),
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BattleEngine, PlayerInput};

    fn snapshot() -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            config: BattleConfig::default(),
            ships: Vec::new(),
            player: None,
            projectiles: Vec::new(),
            battle_time: 1.5,
            tick: 90,
            mode: GameMode::Play,
            paused: false,
            next_ship_id: 1,
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = BattleEngine::new(BattleConfig::default().with_seed(3));
        for _ in 0..30 {
            engine.update(1.0 / 60.0, &PlayerInput::default());
        }

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let data = load_battle(&save_buffer[..]).expect("Load failed");
        assert_eq!(data.tick, 30);
        assert_eq!(data.ships.len(), engine.ship_count());
        assert_eq!(data.player, Some(0));
    }

    #[test]
    fn test_version_mismatch() {
        let mut data = snapshot();
        data.version = SAVE_VERSION + 1;
        let mut buffer = Vec::new();
        save_battle(&mut buffer, &data).unwrap();

        match load_battle(&buffer[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|d| d.tick)),
        }
    }

    #[test]
    fn test_bad_player_index() {
        let mut data = snapshot();
        data.player = Some(3);
        let mut buffer = Vec::new();
        save_battle(&mut buffer, &data).unwrap();
        assert!(matches!(load_battle(&buffer[..]), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn test_truncated_input() {
        let mut buffer = Vec::new();
        save_battle(&mut buffer, &snapshot()).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(matches!(load_battle(&buffer[..]), Err(SaveError::Bincode(_))));
    }
}
