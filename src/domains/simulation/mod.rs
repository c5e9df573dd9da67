pub mod aggregate;
pub mod engine;
pub mod events;
pub mod projections;

pub use aggregate::*;
pub use engine::*;
pub use events::*;
pub use projections::*;
