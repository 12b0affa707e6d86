//! Visibility manager orchestrator.

mod core;

pub use core::{ElementSnapshot, OFFSCREEN_XY, PRESERVED_PROPERTIES, VisibilityManager};
