//! Data types for the combat simulation.
//!
//! These are plain data structs with small local behaviors. Anything that
//! coordinates several of them lives in `systems` or on `Ship`.

mod common;
mod crew;
mod module;
mod projectile;

pub use common::*;
pub use crew::*;
pub use module::*;
pub use projectile::*;
