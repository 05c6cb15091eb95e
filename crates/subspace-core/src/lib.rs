//! Subspace Core - Modular Ship Combat Engine
//!
//! A real-time 2D space battle between ships built from grid-mounted
//! components. Every component can be shot off individually; a ship dies when
//! its core goes.
//!
//! # Architecture
//!
//! The battle uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Ships and projectiles
//! - **Components**: Plain data (`Ship`, `Projectile`, and the grid modules,
//!   crew and vectors they are made of)
//! - **Systems**: Crew scheduling, pursuit AI, projectile motion, collisions
//!   and cleanup
//!
//! Rendering is not part of this crate. Anything worth drawing is reported as
//! a [`effects::VisualEvent`] that a front end drains each frame.
//!
//! # Example
//!
//! ```rust,no_run
//! use subspace_core::prelude::*;
//!
//! let mut engine = BattleEngine::new(BattleConfig::default().with_seed(42));
//!
//! // Run the battle
//! while engine.outcome() == BattleOutcome::Ongoing {
//!     let input = PlayerInput { fire: true, ..Default::default() };
//!     engine.update(1.0 / 60.0, &input); // 60 FPS
//!     for _event in engine.drain_effects() {
//!         // hand to the renderer
//!     }
//! }
//! ```

pub mod components;
pub mod config;
pub mod constants;
pub mod effects;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod ship;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::BattleConfig;
    pub use crate::effects::{EffectLog, EffectSink, VisualEvent};
    pub use crate::engine::{BattleEngine, BattleOutcome, GameMode, PlayerInput, TickReport};
    pub use crate::ship::{Controller, Ship};
}
