//! Pet mode for small status displays.
//!
//! When enabled, the plugin hides every informational widget on the host view
//! except one "face" element, then drives that element around the screen as a
//! freely roaming pet. The host application owns rendering and the callback
//! cadence; this crate owns the hide/restore bookkeeping and the bounce
//! simulation, and returns control to the host after every hook.

pub mod config;
pub mod element;
pub mod error;
pub mod face;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod motion;
pub mod plugin;
pub mod visibility;

pub use config::PetModeConfig;
pub use element::widgets::{Bitmap, LabeledValue, Line, Text};
pub use element::{
    ElementId, HasPosition, HasVisualProperties, PropertyValue, UiElement, ViewState,
};
pub use error::{PetModeError, Result};
pub use face::{FACE_CANDIDATES, FACE_KEYWORDS, FaceMatch, find_face};
pub use geometry::{DEFAULT_VIEWPORT, Size, known_display_name};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, event_with_fields, json_kv,
};
pub use metrics::{MetricSnapshot, PetMetrics};
pub use motion::{BASE_MOVE_INTERVAL, PetMotion, StepOutcome};
pub use plugin::{HostHooks, PetMode, PetStatus};
pub use visibility::{ElementSnapshot, OFFSCREEN_XY, PRESERVED_PROPERTIES, VisibilityManager};
