pub mod client;
pub mod model;
pub mod store;
pub mod view;

pub use client::*;
pub use model::*;
pub use store::*;
pub use view::*;
