//! Generation - ship layouts and battle setup

mod layout;
mod spawn;

pub use layout::*;
pub use spawn::*;
