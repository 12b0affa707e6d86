//! Error module orchestrator; variants live in the private `types` module
//! and are re-exported here.

mod types;

pub use types::{PetModeError, Result};
