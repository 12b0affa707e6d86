//! Viewport geometry for the fixed-size drawable area the pet moves within.

/// Integer size measured in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center point using the same floor-division anchoring the host uses
    /// when it places an element by its top-left corner.
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width / 2), f64::from(self.height / 2))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Fallback viewport when neither the view nor the config declares one.
pub const DEFAULT_VIEWPORT: Size = Size::new(250, 122);

/// Human-readable names for the small displays this plugin is usually
/// deployed on. Used only for the activation log line.
pub fn known_display_name(size: Size) -> Option<&'static str> {
    match (size.width, size.height) {
        (250, 122) => Some("Waveshare 2.13\""),
        (128, 64) => Some("OLED 128x64"),
        (128, 32) => Some("OLED 128x32"),
        (296, 128) => Some("Waveshare 2.9\""),
        (400, 300) => Some("Waveshare 4.2\""),
        (212, 104) => Some("Waveshare 2.13\" v2"),
        _ => None,
    }
}
