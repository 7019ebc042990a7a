pub mod aggregate;
pub mod schema;
pub mod value;

pub use aggregate::*;
pub use schema::*;
pub use value::*;
