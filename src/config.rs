use serde::Deserialize;

use crate::geometry::{DEFAULT_VIEWPORT, Size};

/// Options the host reads from its own configuration tree and hands to the
/// plugin once, before UI setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PetModeConfig {
    /// Start with the widgets hidden and the pet roaming.
    pub enabled: bool,
    /// Initial speed multiplier; 1.0 = one step per base interval.
    pub speed: f64,
    /// Pet radius in pixels, also the reflection margin at the edges.
    pub pet_size: u32,
    /// Fallback viewport width when the view does not declare one.
    pub width: u32,
    /// Fallback viewport height when the view does not declare one.
    pub height: u32,
}

impl Default for PetModeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            pet_size: 15,
            width: DEFAULT_VIEWPORT.width,
            height: DEFAULT_VIEWPORT.height,
        }
    }
}

impl PetModeConfig {
    pub fn fallback_viewport(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_display() {
        let config = PetModeConfig::default();
        assert!(config.enabled);
        assert_eq!(config.pet_size, 15);
        assert_eq!(config.fallback_viewport(), Size::new(250, 122));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: PetModeConfig = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.pet_size, 15);
    }

    #[test]
    fn full_json_overrides() {
        let config: PetModeConfig = serde_json::from_str(
            r#"{"enabled": true, "speed": 2.0, "pet_size": 10, "width": 128, "height": 64}"#,
        )
        .unwrap();
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.fallback_viewport(), Size::new(128, 64));
    }
}
