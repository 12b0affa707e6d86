//! Element model orchestrator.
//!
//! Hosts import the capability traits and [`ViewState`] from here while the
//! implementation details live in the private `core` module. Concrete widget
//! types modeled on the usual status-screen building blocks live in
//! [`widgets`].

mod core;
pub mod widgets;

pub use core::{ElementId, HasPosition, HasVisualProperties, PropertyValue, UiElement, ViewState};
