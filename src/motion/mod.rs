//! Pet motion orchestrator.

mod core;

pub use core::{
    BASE_MOVE_INTERVAL, PetMotion, StepOutcome, X_SPEED_RANGE, Y_SPEED_RANGE,
};
