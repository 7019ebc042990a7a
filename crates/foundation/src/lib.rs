pub mod bounds;
pub mod grid;

// Foundation crate: fixed map geometry only, no I/O.
pub use bounds::*;
pub use grid::*;
