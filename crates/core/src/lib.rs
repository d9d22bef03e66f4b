//! Addressing and selection primitives shared by the engine and its front ends.

pub mod address;
pub mod selection;

pub use address::{AddressError, Coord, Direction, Path};
pub use selection::SelectionRect;
