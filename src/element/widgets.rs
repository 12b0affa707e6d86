//! Concrete elements covering the shapes a status-screen host typically
//! registers: plain text, label/value readouts, bitmaps and separator lines.
//! They double as test fixtures for the locator and the visibility manager.

use super::core::{HasPosition, HasVisualProperties, PropertyValue, UiElement};

/// Free-standing text such as the face expression.
pub struct Text {
    xy: (i32, i32),
    value: String,
    color: String,
    font: String,
}

impl Text {
    pub fn new(xy: (i32, i32), value: impl Into<String>) -> Self {
        Self {
            xy,
            value: value.into(),
            color: "black".to_string(),
            font: "medium".to_string(),
        }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl HasPosition for Text {
    fn xy(&self) -> (i32, i32) {
        self.xy
    }

    fn set_xy(&mut self, xy: (i32, i32)) {
        self.xy = xy;
    }
}

impl HasVisualProperties for Text {
    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "color" => Some(PropertyValue::Str(self.color.clone())),
            "font" => Some(PropertyValue::Str(self.font.clone())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> bool {
        match (name, value) {
            ("color", PropertyValue::Str(color)) => {
                self.color = color;
                true
            }
            ("font", PropertyValue::Str(font)) => {
                self.font = font;
                true
            }
            _ => false,
        }
    }
}

impl UiElement for Text {
    fn as_positioned(&self) -> Option<&dyn HasPosition> {
        Some(self)
    }

    fn as_positioned_mut(&mut self) -> Option<&mut dyn HasPosition> {
        Some(self)
    }

    fn as_styled(&self) -> Option<&dyn HasVisualProperties> {
        Some(self)
    }

    fn as_styled_mut(&mut self) -> Option<&mut dyn HasVisualProperties> {
        Some(self)
    }

    fn drawable(&self) -> bool {
        true
    }

    fn has_value(&self) -> bool {
        true
    }
}

/// "LABEL value" readout, e.g. battery percentage or AP count.
pub struct LabeledValue {
    xy: (i32, i32),
    label: String,
    value: String,
    color: String,
    label_font: String,
    text_font: String,
}

impl LabeledValue {
    pub fn new(xy: (i32, i32), label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            xy,
            label: label.into(),
            value: value.into(),
            color: "black".to_string(),
            label_font: "bold".to_string(),
            text_font: "medium".to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl HasPosition for LabeledValue {
    fn xy(&self) -> (i32, i32) {
        self.xy
    }

    fn set_xy(&mut self, xy: (i32, i32)) {
        self.xy = xy;
    }
}

impl HasVisualProperties for LabeledValue {
    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "color" => Some(PropertyValue::Str(self.color.clone())),
            "label" => Some(PropertyValue::Str(self.label.clone())),
            "label_font" => Some(PropertyValue::Str(self.label_font.clone())),
            "text_font" => Some(PropertyValue::Str(self.text_font.clone())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> bool {
        match (name, value) {
            ("color", PropertyValue::Str(color)) => {
                self.color = color;
                true
            }
            ("label", PropertyValue::Str(label)) => {
                self.label = label;
                true
            }
            ("label_font", PropertyValue::Str(font)) => {
                self.label_font = font;
                true
            }
            ("text_font", PropertyValue::Str(font)) => {
                self.text_font = font;
                true
            }
            _ => false,
        }
    }
}

impl UiElement for LabeledValue {
    fn as_positioned(&self) -> Option<&dyn HasPosition> {
        Some(self)
    }

    fn as_positioned_mut(&mut self) -> Option<&mut dyn HasPosition> {
        Some(self)
    }

    fn as_styled(&self) -> Option<&dyn HasVisualProperties> {
        Some(self)
    }

    fn as_styled_mut(&mut self) -> Option<&mut dyn HasVisualProperties> {
        Some(self)
    }

    fn drawable(&self) -> bool {
        true
    }

    fn has_value(&self) -> bool {
        true
    }
}

/// Image element. Positioned and drawable but carries no text payload.
pub struct Bitmap {
    xy: (i32, i32),
    path: String,
    scale: f64,
}

impl Bitmap {
    pub fn new(xy: (i32, i32), path: impl Into<String>) -> Self {
        Self {
            xy,
            path: path.into(),
            scale: 1.0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl HasPosition for Bitmap {
    fn xy(&self) -> (i32, i32) {
        self.xy
    }

    fn set_xy(&mut self, xy: (i32, i32)) {
        self.xy = xy;
    }
}

impl HasVisualProperties for Bitmap {
    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "scale" => Some(PropertyValue::Float(self.scale)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> bool {
        match (name, value) {
            ("scale", PropertyValue::Float(scale)) => {
                self.scale = scale;
                true
            }
            _ => false,
        }
    }
}

impl UiElement for Bitmap {
    fn as_positioned(&self) -> Option<&dyn HasPosition> {
        Some(self)
    }

    fn as_positioned_mut(&mut self) -> Option<&mut dyn HasPosition> {
        Some(self)
    }

    fn as_styled(&self) -> Option<&dyn HasVisualProperties> {
        Some(self)
    }

    fn as_styled_mut(&mut self) -> Option<&mut dyn HasVisualProperties> {
        Some(self)
    }

    fn drawable(&self) -> bool {
        true
    }
}

/// Separator line between two endpoints. Drawable, but it has no single
/// anchor position, so hiding leaves it untouched.
pub struct Line {
    ends: ((i32, i32), (i32, i32)),
    color: String,
    width: i64,
}

impl Line {
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        Self {
            ends: (from, to),
            color: "black".to_string(),
            width: 1,
        }
    }

    pub fn ends(&self) -> ((i32, i32), (i32, i32)) {
        self.ends
    }
}

impl HasVisualProperties for Line {
    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "color" => Some(PropertyValue::Str(self.color.clone())),
            "width" => Some(PropertyValue::Int(self.width)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> bool {
        match (name, value) {
            ("color", PropertyValue::Str(color)) => {
                self.color = color;
                true
            }
            ("width", PropertyValue::Int(width)) => {
                self.width = width;
                true
            }
            _ => false,
        }
    }
}

impl UiElement for Line {
    fn as_styled(&self) -> Option<&dyn HasVisualProperties> {
        Some(self)
    }

    fn as_styled_mut(&mut self) -> Option<&mut dyn HasVisualProperties> {
        Some(self)
    }

    fn drawable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_exposes_color_and_font_only() {
        let text = Text::new((0, 0), "hi").with_font("small");
        assert_eq!(text.property("font"), Some(PropertyValue::Str("small".into())));
        assert_eq!(text.property("color"), Some(PropertyValue::Str("black".into())));
        assert_eq!(text.property("label_font"), None);
    }

    #[test]
    fn unknown_property_write_is_rejected() {
        let mut bitmap = Bitmap::new((0, 0), "face.png");
        assert!(!bitmap.set_property("font", PropertyValue::Str("small".into())));
        assert!(bitmap.set_property("scale", PropertyValue::Float(2.0)));
        assert_eq!(bitmap.property("scale"), Some(PropertyValue::Float(2.0)));
    }

    #[test]
    fn line_has_no_position_capability() {
        let mut line = Line::new((0, 10), (250, 10));
        assert!(line.as_positioned().is_none());
        assert!(line.as_positioned_mut().is_none());
        assert!(line.drawable());
        assert!(!line.has_value());
    }
}
