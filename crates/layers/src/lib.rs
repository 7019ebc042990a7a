pub mod layer;
pub mod visibility;

pub use layer::*;
pub use visibility::*;
