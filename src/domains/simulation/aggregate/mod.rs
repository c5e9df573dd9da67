pub mod grid;
pub mod ids;
pub mod robot;
pub mod state;
pub mod task;
pub mod types;

// Re-export all public types for convenience
pub use grid::*;
pub use ids::*;
pub use robot::*;
pub use state::*;
pub use task::*;
pub use types::*;
