//! Systems - logic that operates on components

mod combat;
mod crew;
mod pursuit;

pub use combat::*;
pub use crew::*;
pub use pursuit::*;
