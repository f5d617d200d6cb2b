pub mod error;
pub mod ids;
pub mod model;

pub use error::*;
pub use ids::*;
pub use model::*;
