pub mod simulation_service;
pub mod tick_driver;

pub use simulation_service::*;
pub use tick_driver::*;
