use std::collections::HashMap;

use crate::element::{ElementId, PropertyValue, UiElement, ViewState};

/// Sentinel position far outside any plausible viewport.
pub const OFFSCREEN_XY: (i32, i32) = (-9999, -9999);

/// Visual properties captured before an element is hidden. Only the ones an
/// element actually exposes are recorded.
pub const PRESERVED_PROPERTIES: &[&str] = &[
    "color",
    "font",
    "text_font",
    "label_font",
    "alt_font",
    "label",
    "size",
    "width",
    "height",
    "scale",
    "font_size",
];

/// Saved position and properties of one element, enough to put it back
/// exactly where it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSnapshot {
    pub xy: Option<(i32, i32)>,
    pub properties: Vec<(&'static str, PropertyValue)>,
}

/// Tracks which elements are off-canvas and remembers how to restore them.
///
/// Invariant: every name in the hidden set has a snapshot to restore it, and
/// no name appears twice. The face element is the one exception: snapshotted
/// so its styling survives pet mode, but never hidden.
#[derive(Default)]
pub struct VisibilityManager {
    snapshots: HashMap<ElementId, ElementSnapshot>,
    hidden: Vec<ElementId>,
}

impl VisibilityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the element's current position and preserved properties.
    /// Idempotent: the first snapshot wins until the mode is restored.
    pub fn snapshot(&mut self, name: &str, element: &dyn UiElement) {
        if self.snapshots.contains_key(name) {
            return;
        }

        let mut snapshot = ElementSnapshot {
            xy: element.as_positioned().map(|positioned| positioned.xy()),
            properties: Vec::new(),
        };
        if let Some(styled) = element.as_styled() {
            for property in PRESERVED_PROPERTIES.iter().copied() {
                if let Some(value) = styled.property(property) {
                    snapshot.properties.push((property, value));
                }
            }
        }
        self.snapshots.insert(name.to_string(), snapshot);
    }

    /// Move the element off-canvas. Returns `false` when the element exposes
    /// no position and was left untouched; the caller decides how to log it.
    pub fn hide(&self, element: &mut dyn UiElement) -> bool {
        match element.as_positioned_mut() {
            Some(positioned) => {
                positioned.set_xy(OFFSCREEN_XY);
                true
            }
            None => false,
        }
    }

    /// Write the saved position and properties back onto the live element.
    /// Returns `false` when there is no snapshot or the element vanished
    /// from the view; both are no-ops.
    pub fn restore(&self, name: &str, view: &mut ViewState) -> bool {
        let Some(snapshot) = self.snapshots.get(name) else {
            return false;
        };
        let Some(element) = view.get_mut(name) else {
            return false;
        };

        if let Some(xy) = snapshot.xy {
            if let Some(positioned) = element.as_positioned_mut() {
                positioned.set_xy(xy);
            }
        }
        if let Some(styled) = element.as_styled_mut() {
            for (property, value) in &snapshot.properties {
                styled.set_property(property, value.clone());
            }
        }
        true
    }

    /// Snapshot and hide every element except `face`, which is snapshotted
    /// only. Returns the number of elements newly hidden.
    pub fn apply_mode(&mut self, view: &mut ViewState, face: &str) -> usize {
        let names: Vec<ElementId> = view.names().map(str::to_string).collect();
        let mut newly_hidden = 0;

        for name in &names {
            if name == face {
                continue;
            }
            if self.hide_one(name, view) {
                newly_hidden += 1;
            }
        }

        if let Some(element) = view.get(face) {
            self.snapshot(face, element);
        }

        newly_hidden
    }

    /// Snapshot and hide elements that appeared after activation (other
    /// plugins may register widgets at any time). Returns how many were
    /// newly hidden.
    pub fn sweep_new_elements(&mut self, view: &mut ViewState, face: Option<&str>) -> usize {
        let unseen: Vec<ElementId> = view
            .names()
            .filter(|name| Some(*name) != face && !self.snapshots.contains_key(*name))
            .map(str::to_string)
            .collect();

        let mut newly_hidden = 0;
        for name in &unseen {
            if self.hide_one(name, view) {
                newly_hidden += 1;
            }
        }
        newly_hidden
    }

    fn hide_one(&mut self, name: &str, view: &mut ViewState) -> bool {
        let Some(element) = view.get(name) else {
            return false;
        };
        self.snapshot(name, element);

        let Some(element) = view.get_mut(name) else {
            return false;
        };
        self.hide(element);

        if !self.hidden.iter().any(|hidden| hidden == name) {
            self.hidden.push(name.to_string());
            return true;
        }
        false
    }

    /// Restore every hidden element, then the face if bound, then clear all
    /// bookkeeping. Returns the number of elements restored.
    pub fn restore_mode(&mut self, view: &mut ViewState, face: Option<&str>) -> usize {
        let mut restored = 0;
        let hidden: Vec<ElementId> = self.hidden.clone();
        for name in &hidden {
            if self.restore(name, view) {
                restored += 1;
            }
        }
        if let Some(face) = face {
            if self.restore(face, view) {
                restored += 1;
            }
        }
        self.hidden.clear();
        self.snapshots.clear();
        restored
    }

    /// Names currently moved off-canvas, in the order they were hidden.
    pub fn hidden(&self) -> &[ElementId] {
        &self.hidden
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.iter().any(|hidden| hidden == name)
    }

    pub fn snapshot_of(&self, name: &str) -> Option<&ElementSnapshot> {
        self.snapshots.get(name)
    }

    /// Original positions of every snapshotted element, for collaborating
    /// plugins that relayout the screen.
    pub fn original_positions(&self) -> HashMap<ElementId, (i32, i32)> {
        self.snapshots
            .iter()
            .filter_map(|(name, snapshot)| snapshot.xy.map(|xy| (name.clone(), xy)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::widgets::{LabeledValue, Line, Text};
    use crate::geometry::Size;

    fn view() -> ViewState {
        let mut view = ViewState::new(Size::new(250, 122));
        view.register("battery", LabeledValue::new((5, 5), "BAT", "98%"));
        view.register("temp", LabeledValue::new((60, 5), "TEMP", "41C"));
        view.register("divider", Line::new((0, 14), (250, 14)));
        view.register("face", Text::new((120, 40), "(^_^)"));
        view
    }

    fn xy_of(view: &ViewState, name: &str) -> Option<(i32, i32)> {
        view.get(name)
            .and_then(|element| element.as_positioned())
            .map(|positioned| positioned.xy())
    }

    #[test]
    fn snapshot_is_idempotent_first_write_wins() {
        let mut view = view();
        let mut manager = VisibilityManager::new();

        manager.snapshot("battery", view.get("battery").unwrap());
        let first = manager.snapshot_of("battery").unwrap().clone();

        // Mutate the live element, then snapshot again: nothing changes.
        view.get_mut("battery")
            .unwrap()
            .as_positioned_mut()
            .unwrap()
            .set_xy((77, 77));
        manager.snapshot("battery", view.get("battery").unwrap());
        assert_eq!(manager.snapshot_of("battery").unwrap(), &first);
    }

    #[test]
    fn hide_then_restore_round_trips_exactly() {
        let mut view = view();
        let mut manager = VisibilityManager::new();

        let before_xy = xy_of(&view, "temp").unwrap();
        let before_color = view
            .get("temp")
            .unwrap()
            .as_styled()
            .unwrap()
            .property("color")
            .unwrap();

        manager.snapshot("temp", view.get("temp").unwrap());
        assert!(manager.hide(view.get_mut("temp").unwrap()));
        assert_eq!(xy_of(&view, "temp"), Some(OFFSCREEN_XY));

        // Scribble over a preserved property while hidden.
        view.get_mut("temp")
            .unwrap()
            .as_styled_mut()
            .unwrap()
            .set_property("color", PropertyValue::Str("white".into()));

        assert!(manager.restore("temp", &mut view));
        assert_eq!(xy_of(&view, "temp"), Some(before_xy));
        let after_color = view
            .get("temp")
            .unwrap()
            .as_styled()
            .unwrap()
            .property("color")
            .unwrap();
        assert_eq!(after_color, before_color);
    }

    #[test]
    fn hide_leaves_positionless_elements_untouched() {
        let mut view = view();
        let manager = VisibilityManager::new();
        assert!(!manager.hide(view.get_mut("divider").unwrap()));
    }

    #[test]
    fn apply_mode_hides_everything_except_face_exactly_once() {
        let mut view = view();
        let mut manager = VisibilityManager::new();

        let hidden = manager.apply_mode(&mut view, "face");
        assert_eq!(hidden, 3);
        assert_eq!(manager.hidden(), &["battery", "temp", "divider"]);
        assert!(!manager.is_hidden("face"));

        // Second application adds nothing and never duplicates names.
        let hidden_again = manager.apply_mode(&mut view, "face");
        assert_eq!(hidden_again, 0);
        assert_eq!(manager.hidden().len(), 3);

        // The face is snapshotted but still on canvas.
        assert!(manager.snapshot_of("face").is_some());
        assert_eq!(xy_of(&view, "face"), Some((120, 40)));
        assert_eq!(xy_of(&view, "battery"), Some(OFFSCREEN_XY));
    }

    #[test]
    fn restore_mode_round_trips_and_clears_bookkeeping() {
        let mut view = view();
        let mut manager = VisibilityManager::new();

        manager.apply_mode(&mut view, "face");
        let restored = manager.restore_mode(&mut view, Some("face"));
        assert_eq!(restored, 4);

        assert_eq!(xy_of(&view, "battery"), Some((5, 5)));
        assert_eq!(xy_of(&view, "temp"), Some((60, 5)));
        assert_eq!(xy_of(&view, "face"), Some((120, 40)));
        assert!(manager.hidden().is_empty());
        assert!(manager.snapshot_of("battery").is_none());
    }

    #[test]
    fn restore_of_vanished_element_is_a_noop() {
        let mut view = view();
        let mut manager = VisibilityManager::new();

        manager.apply_mode(&mut view, "face");
        view.remove("temp");
        let restored = manager.restore_mode(&mut view, Some("face"));
        // battery + divider + face; temp is gone and silently skipped.
        assert_eq!(restored, 3);
    }

    #[test]
    fn sweep_picks_up_late_registrations() {
        let mut view = view();
        let mut manager = VisibilityManager::new();
        manager.apply_mode(&mut view, "face");

        view.register("uptime", Text::new((200, 5), "1h02m"));
        let swept = manager.sweep_new_elements(&mut view, Some("face"));
        assert_eq!(swept, 1);
        assert!(manager.is_hidden("uptime"));
        assert_eq!(xy_of(&view, "uptime"), Some(OFFSCREEN_XY));

        // Nothing new on the next sweep.
        assert_eq!(manager.sweep_new_elements(&mut view, Some("face")), 0);
    }
}
