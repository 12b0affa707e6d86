use thiserror::Error;

/// Unified result type for the pet mode crate.
pub type Result<T> = std::result::Result<T, PetModeError>;

/// Errors surfaced by the pet mode plugin. None of these are fatal to the
/// host; hooks convert them into log events and carry on.
#[derive(Debug, Error)]
pub enum PetModeError {
    #[error("no face element could be located")]
    FaceNotFound,
    #[error("element `{0}` not found in view")]
    ElementNotFound(String),
    #[error("element `{0}` exposes no position")]
    NoPosition(String),
    #[error("speed multiplier must be positive and finite, got {0}")]
    InvalidSpeed(f64),
}
