use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid grid dimensions {rows}x{cols}: each side must be within {min}..={max}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        min: usize,
        max: usize,
    },

    #[error("Simulation is not configured")]
    NotConfigured,

    #[error("Simulation is not in setup phase")]
    NotInSetup,

    #[error("Placement ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Cell ({x}, {y}) is not empty")]
    CellOccupied { x: i32, y: i32 },

    #[error("Insufficient budget: required {required}, available {available}")]
    InsufficientBudget { required: u32, available: u32 },

    #[error("Unknown {kind} type: {value}")]
    UnknownType { kind: &'static str, value: String },

    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    #[error("A valid strategy must be selected")]
    MissingStrategy,

    #[error("Invalid speed multiplier: {0}")]
    InvalidSpeed(f64),

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Grid and entity lists disagree: {0}")]
    Inconsistent(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
