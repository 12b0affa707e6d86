use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::{Value, json};

use crate::config::PetModeConfig;
use crate::element::{ElementId, PropertyValue, ViewState};
use crate::error::{PetModeError, Result};
use crate::face::find_face;
use crate::geometry::{DEFAULT_VIEWPORT, Size, known_display_name};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::PetMetrics;
use crate::motion::{PetMotion, StepOutcome};
use crate::plugin::hooks::HostHooks;
use crate::visibility::VisibilityManager;

const LOG_TARGET: &str = "petmode::plugin";
const METRICS_TARGET: &str = "petmode::metrics";

/// Compact fonts tried on the face element, best first.
const PET_FONTS: &[&str] = &["small", "medium", "bold_small"];

const SETUP_CHECK_STEPS: u32 = 3;
const MOTION_CHECK_STEPS: u32 = 10;

/// Everything external tooling wants to know about the pet in one struct.
#[derive(Debug, Clone, Serialize)]
pub struct PetStatus {
    pub position: (f64, f64),
    pub velocity: (f64, f64),
    pub direction: (i8, i8),
    pub viewport: (u32, u32),
    pub movement_enabled: bool,
    pub move_interval_ms: u64,
    pub face_element: Option<String>,
    pub time_since_last_move_ms: u64,
}

/// The pet mode plugin: hides every widget except the face and drives the
/// face around the screen off the host's callback cadence.
pub struct PetMode {
    config: PetModeConfig,
    enabled: bool,
    visibility: VisibilityManager,
    motion: PetMotion,
    face: Option<ElementId>,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<PetMetrics>>>,
    metrics_interval: Duration,
    last_metrics_emit: Option<Instant>,
    started_at: Instant,
}

impl PetMode {
    pub fn new(config: PetModeConfig) -> Self {
        let motion = PetMotion::new(config.fallback_viewport(), config.pet_size);
        Self {
            enabled: config.enabled,
            visibility: VisibilityManager::new(),
            motion,
            face: None,
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(60),
            last_metrics_emit: None,
            started_at: Instant::now(),
            config,
        }
    }

    /// Route plugin events through the host's log pipeline.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Deterministic motion for tests and reproducible demos.
    pub fn with_motion_seed(mut self, seed: u64) -> Self {
        self.motion = PetMotion::seeded(self.config.fallback_viewport(), self.config.pet_size, seed);
        self
    }

    /// Interval between metric snapshot emissions. Zero disables emission.
    pub fn with_metrics_interval(mut self, interval: Duration) -> Self {
        self.metrics_interval = interval;
        self
    }

    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(PetMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<PetMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    // --- query/command surface ---------------------------------------------

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip between pet mode and the normal layout, applying the change to
    /// the view immediately. Returns the new enabled state.
    pub fn toggle(&mut self, view: &mut ViewState) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.activate(view);
        } else {
            self.deactivate(view);
        }
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool, view: &mut ViewState) {
        if self.enabled != enabled {
            self.toggle(view);
        }
    }

    /// Names currently moved off-canvas, in hiding order. Collaborating
    /// layout plugins use this to skip elements we own.
    pub fn hidden_elements(&self) -> Vec<ElementId> {
        self.visibility.hidden().to_vec()
    }

    pub fn face_element(&self) -> Option<&str> {
        self.face.as_deref()
    }

    /// Original positions of every snapshotted element.
    pub fn original_positions(&self) -> HashMap<ElementId, (i32, i32)> {
        self.visibility.original_positions()
    }

    pub fn pet_position(&self) -> (f64, f64) {
        self.motion.position()
    }

    /// Clamp into the margin box, jump there and write through to the face
    /// element. Returns the committed position.
    pub fn set_pet_position(&mut self, x: f64, y: f64, view: &mut ViewState) -> (i32, i32) {
        let xy = self.motion.set_position(x, y);
        if let Err(err) = self.write_through(view, xy) {
            self.log(
                LogLevel::Debug,
                "pet_position_not_written",
                [json_kv("error", json!(err.to_string()))],
            );
        }
        xy
    }

    pub fn pause_pet(&mut self) {
        self.motion.pause();
        self.log(LogLevel::Info, "pet_paused", std::iter::empty());
    }

    pub fn resume_pet(&mut self) {
        self.motion.resume();
        self.log(LogLevel::Info, "pet_resumed", std::iter::empty());
    }

    /// Set the apparent speed. Non-positive multipliers are rejected and the
    /// current interval is kept.
    pub fn set_pet_speed(&mut self, multiplier: f64) -> Result<()> {
        self.motion.set_speed_multiplier(multiplier)?;
        self.log(
            LogLevel::Info,
            "pet_speed_set",
            [json_kv("multiplier", json!(multiplier))],
        );
        Ok(())
    }

    pub fn pet_status(&self) -> PetStatus {
        let now = Instant::now();
        let viewport = self.motion.viewport();
        PetStatus {
            position: self.motion.position(),
            velocity: self.motion.velocity(),
            direction: self.motion.direction(),
            viewport: (viewport.width, viewport.height),
            movement_enabled: self.motion.is_moving(),
            move_interval_ms: self.motion.move_interval().as_millis() as u64,
            face_element: self.face.clone(),
            time_since_last_move_ms: self.motion.time_since_last_move(now).as_millis() as u64,
        }
    }

    /// Immediate single move for external tooling. Returns whether the face
    /// element was actually repositioned.
    pub fn force_pet_move(&mut self, view: &mut ViewState) -> bool {
        if !self.enabled {
            return false;
        }
        self.force_move(view)
    }

    /// Diagnostic: ten forced moves in a row, logging each landing position.
    /// Returns how many of them reached the live element.
    pub fn run_motion_check(&mut self, view: &mut ViewState) -> u32 {
        if !self.enabled || self.face.is_none() {
            self.log(LogLevel::Warn, "motion_check_unavailable", std::iter::empty());
            return 0;
        }
        let mut written = 0;
        for step in 1..=MOTION_CHECK_STEPS {
            let moved = self.force_move(view);
            if moved {
                written += 1;
            }
            let (x, y) = self.motion.position();
            self.log(
                LogLevel::Debug,
                "motion_check_step",
                [
                    json_kv("step", json!(step)),
                    json_kv("moved", json!(moved)),
                    json_kv("x", json!(x)),
                    json_kv("y", json!(y)),
                ],
            );
        }
        written
    }

    // --- mode transitions --------------------------------------------------

    fn activate(&mut self, view: &mut ViewState) {
        if let Err(err) = self.try_activate(view) {
            // Non-fatal: stay enabled, retry on the next setup.
            self.log(
                LogLevel::Warn,
                "face_not_found",
                [json_kv("error", json!(err.to_string()))],
            );
        }
    }

    fn try_activate(&mut self, view: &mut ViewState) -> Result<()> {
        let (face, matched) = find_face(view).ok_or(PetModeError::FaceNotFound)?;

        let hidden = self.visibility.apply_mode(view, &face);
        self.with_metrics(|metrics| metrics.record_hidden(hidden));
        self.bind_face(view, &face);
        self.face = Some(face.clone());
        self.log(
            LogLevel::Info,
            "pet_mode_applied",
            [
                json_kv("face", json!(face)),
                json_kv("matched", json!(format!("{matched:?}"))),
                json_kv("hidden", json!(hidden)),
            ],
        );
        Ok(())
    }

    fn deactivate(&mut self, view: &mut ViewState) {
        let restored = self.visibility.restore_mode(view, self.face.as_deref());
        self.with_metrics(|metrics| metrics.record_restored(restored));
        self.log(
            LogLevel::Info,
            "normal_mode_restored",
            [json_kv("restored", json!(restored))],
        );
    }

    /// Point the simulation at the detected viewport, restyle the face for
    /// pet duty and park it at the center.
    fn bind_face(&mut self, view: &mut ViewState, face: &str) {
        let viewport = self.detect_viewport(view);
        self.log(
            LogLevel::Info,
            "viewport_detected",
            [
                json_kv("width", json!(viewport.width)),
                json_kv("height", json!(viewport.height)),
                json_kv(
                    "display",
                    json!(known_display_name(viewport).unwrap_or("unknown")),
                ),
            ],
        );

        self.style_face(view, face);
        self.motion
            .reinitialize(viewport, self.config.pet_size, Instant::now());

        let (x, y) = self.motion.position();
        if let Err(err) = write_position(view, face, (x as i32, y as i32)) {
            self.log(
                LogLevel::Warn,
                "face_has_no_position",
                [json_kv("error", json!(err.to_string()))],
            );
        }
    }

    fn detect_viewport(&self, view: &ViewState) -> Size {
        let declared = view.size();
        if !declared.is_empty() {
            return declared;
        }
        let fallback = self.config.fallback_viewport();
        if !fallback.is_empty() {
            return fallback;
        }
        DEFAULT_VIEWPORT
    }

    fn style_face(&self, view: &mut ViewState, face: &str) {
        let Some(styled) = view.get_mut(face).and_then(|el| el.as_styled_mut()) else {
            return;
        };
        for font in PET_FONTS {
            if styled.set_property("font", PropertyValue::from(*font)) {
                break;
            }
        }
        styled.set_property("text_font", PropertyValue::from("small"));
    }

    // --- motion glue -------------------------------------------------------

    /// Rate-limited move off a periodic callback.
    fn step_pet(&mut self, view: &mut ViewState) {
        if !self.enabled || self.face.is_none() {
            return;
        }
        let Some(outcome) = self.motion.step(Instant::now()) else {
            return;
        };
        self.commit_step(view, outcome);
    }

    /// Immediate move off an event callback.
    fn force_move(&mut self, view: &mut ViewState) -> bool {
        if self.face.is_none() {
            self.log(LogLevel::Debug, "force_move_without_face", std::iter::empty());
            return false;
        }
        let outcome = self.motion.force_step();
        self.commit_step(view, outcome)
    }

    fn commit_step(&mut self, view: &mut ViewState, outcome: StepOutcome) -> bool {
        self.with_metrics(|metrics| metrics.record_step(outcome.reflections(), outcome.startled));
        match self.write_through(view, outcome.xy) {
            Ok(()) => {
                self.log(
                    LogLevel::Debug,
                    "pet_moved",
                    [
                        json_kv("x", json!(outcome.xy.0)),
                        json_kv("y", json!(outcome.xy.1)),
                        json_kv("bounced", json!(outcome.bounced_x || outcome.bounced_y)),
                        json_kv("startled", json!(outcome.startled)),
                    ],
                );
                true
            }
            Err(err) => {
                // Element vanished or lost its position; self-corrects next tick.
                self.log(
                    LogLevel::Warn,
                    "pet_write_failed",
                    [json_kv("error", json!(err.to_string()))],
                );
                false
            }
        }
    }

    fn write_through(&self, view: &mut ViewState, xy: (i32, i32)) -> Result<()> {
        let face = self.face.as_deref().ok_or(PetModeError::FaceNotFound)?;
        write_position(view, face, xy)
    }

    fn setup_check(&mut self, view: &mut ViewState) {
        for step in 1..=SETUP_CHECK_STEPS {
            let moved = self.force_move(view);
            let (x, y) = self.motion.position();
            self.log(
                LogLevel::Debug,
                "setup_check_step",
                [
                    json_kv("step", json!(step)),
                    json_kv("moved", json!(moved)),
                    json_kv("x", json!(x)),
                    json_kv("y", json!(y)),
                ],
            );
        }
    }

    // --- observability -----------------------------------------------------

    fn log(&self, level: LogLevel, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn with_metrics(&self, apply: impl FnOnce(&mut PetMetrics)) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                apply(&mut guard);
            }
        }
    }

    fn record_callback(&self) {
        self.with_metrics(|metrics| metrics.record_callback());
    }

    fn maybe_emit_metrics(&mut self) {
        let Some(metrics) = self.metrics.clone() else {
            return;
        };
        if self.metrics_interval.is_zero() {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.metrics_interval => return,
            _ => self.last_metrics_emit = Some(now),
        }

        let uptime = now.duration_since(self.started_at);
        if let (Some(logger), Ok(guard)) = (self.logger.as_ref(), metrics.lock()) {
            let _ = logger.log_event(guard.snapshot(uptime).to_log_event(METRICS_TARGET));
        }
    }
}

/// Reposition a named element, reporting exactly why that was impossible.
fn write_position(view: &mut ViewState, name: &str, xy: (i32, i32)) -> Result<()> {
    let element = view
        .get_mut(name)
        .ok_or_else(|| PetModeError::ElementNotFound(name.to_string()))?;
    let positioned = element
        .as_positioned_mut()
        .ok_or_else(|| PetModeError::NoPosition(name.to_string()))?;
    positioned.set_xy(xy);
    Ok(())
}

impl HostHooks for PetMode {
    fn name(&self) -> &str {
        "petmode"
    }

    fn on_loaded(&mut self) {
        self.started_at = Instant::now();
        self.log(LogLevel::Info, "plugin_loaded", std::iter::empty());
    }

    fn on_ready(&mut self) {
        self.log(LogLevel::Info, "plugin_ready", std::iter::empty());
    }

    fn on_ui_setup(&mut self, view: &mut ViewState) {
        self.enabled = self.config.enabled;

        if let Err(err) = self.motion.set_speed_multiplier(self.config.speed) {
            self.log(
                LogLevel::Warn,
                "configured_speed_rejected",
                [json_kv("error", json!(err.to_string()))],
            );
        }

        if self.enabled {
            self.activate(view);
            if self.face.is_some() {
                self.setup_check(view);
            }
        }
        self.log(
            LogLevel::Info,
            "ui_setup_complete",
            [json_kv("enabled", json!(self.enabled))],
        );
    }

    fn on_ui_update(&mut self, view: &mut ViewState) {
        self.record_callback();
        if !self.enabled {
            return;
        }

        self.step_pet(view);

        if self.face.is_some() {
            let swept = self.visibility.sweep_new_elements(view, self.face.as_deref());
            if swept > 0 {
                self.with_metrics(|metrics| metrics.record_hidden(swept));
                self.log(
                    LogLevel::Debug,
                    "late_elements_hidden",
                    [json_kv("count", json!(swept))],
                );
            }
        }

        self.maybe_emit_metrics();
    }

    fn on_epoch(&mut self, view: &mut ViewState) {
        self.record_callback();
        self.step_pet(view);
    }

    fn on_peer_detected(&mut self, view: &mut ViewState) {
        self.record_callback();
        self.step_pet(view);
    }

    fn on_handshake(&mut self, view: &mut ViewState) {
        self.record_callback();
        self.step_pet(view);
    }

    fn on_log(&mut self, view: &mut ViewState) {
        self.record_callback();
        if self.enabled {
            self.force_move(view);
        }
    }

    fn on_wifi_update(&mut self, view: &mut ViewState) {
        self.record_callback();
        if self.enabled {
            self.force_move(view);
        }
    }

    fn on_unload(&mut self, view: &mut ViewState) {
        self.deactivate(view);
        self.log(LogLevel::Info, "plugin_unloading", std::iter::empty());
    }

    fn on_unloaded(&mut self) {
        self.log(LogLevel::Info, "plugin_unloaded", std::iter::empty());
    }
}
