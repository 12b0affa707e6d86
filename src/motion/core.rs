use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PetModeError, Result};
use crate::geometry::Size;

/// Minimum wall-clock time between rate-limited steps at multiplier 1.0.
pub const BASE_MOVE_INTERVAL: Duration = Duration::from_millis(50);

/// Speed draw on (re)initialization and on reflection, per axis.
pub const X_SPEED_RANGE: RangeInclusive<f64> = 0.8..=2.0;
pub const Y_SPEED_RANGE: RangeInclusive<f64> = 0.5..=1.5;

/// Hard clamp applied to drifted speeds, per axis.
const X_SPEED_LIMITS: RangeInclusive<f64> = 0.5..=2.5;
const Y_SPEED_LIMITS: RangeInclusive<f64> = 0.3..=2.0;

const DRIFT_CHANCE: f64 = 0.03;
const DRIFT_DELTA: f64 = 0.2;
const STARTLE_CHANCE: f64 = 0.01;

/// Result of one committed motion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Committed position, truncated to the integer pixel grid the host
    /// writes to the element.
    pub xy: (i32, i32),
    pub bounced_x: bool,
    pub bounced_y: bool,
    pub startled: bool,
}

impl StepOutcome {
    pub fn reflections(&self) -> u64 {
        u64::from(self.bounced_x) + u64::from(self.bounced_y)
    }
}

/// The bounce simulation driving the face element around the viewport.
///
/// Two states: Moving and Paused. Position advances by `velocity * direction`
/// per axis on every committed step; a step that would cross within `margin`
/// of an edge clamps to the boundary, turns that axis around and redraws a
/// fresh random speed for it rather than mirroring the incoming speed.
pub struct PetMotion {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    dx: i8,
    dy: i8,
    viewport: Size,
    margin: u32,
    move_interval: Duration,
    last_move: Instant,
    moving: bool,
    rng: StdRng,
}

impl PetMotion {
    pub fn new(viewport: Size, margin: u32) -> Self {
        Self::with_rng(viewport, margin, StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible demos.
    pub fn seeded(viewport: Size, margin: u32, seed: u64) -> Self {
        Self::with_rng(viewport, margin, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(viewport: Size, margin: u32, rng: StdRng) -> Self {
        let mut motion = Self {
            x: 0.0,
            y: 0.0,
            vx: *X_SPEED_RANGE.start(),
            vy: *Y_SPEED_RANGE.start(),
            dx: 1,
            dy: 1,
            viewport,
            margin,
            move_interval: BASE_MOVE_INTERVAL,
            last_move: Instant::now(),
            moving: true,
            rng,
        };
        motion.reinitialize(viewport, margin, Instant::now());
        motion
    }

    /// Center the pet, redraw direction and speed, and reset the rate
    /// limiter. Called whenever the face element is (re)bound.
    pub fn reinitialize(&mut self, viewport: Size, margin: u32, now: Instant) {
        self.viewport = viewport;
        self.margin = margin;
        let (cx, cy) = viewport.center();
        self.x = cx;
        self.y = cy;
        self.dx = self.random_direction();
        self.dy = self.random_direction();
        self.vx = self.rng.gen_range(X_SPEED_RANGE);
        self.vy = self.rng.gen_range(Y_SPEED_RANGE);
        self.moving = true;
        self.last_move = now;
    }

    /// Rate-limited step. No-op unless the move interval has elapsed since
    /// the last committed step and the simulation is in the Moving state.
    /// Applies the occasional organic drift and startle after committing.
    pub fn step(&mut self, now: Instant) -> Option<StepOutcome> {
        if now.duration_since(self.last_move) < self.move_interval {
            return None;
        }
        if !self.moving {
            return None;
        }

        let mut outcome = self.advance();
        self.last_move = now;

        if self.rng.gen_bool(DRIFT_CHANCE) {
            let delta = self.rng.gen_range(-DRIFT_DELTA..=DRIFT_DELTA);
            self.vx = (self.vx + delta).clamp(*X_SPEED_LIMITS.start(), *X_SPEED_LIMITS.end());
            self.vy = (self.vy + delta).clamp(*Y_SPEED_LIMITS.start(), *Y_SPEED_LIMITS.end());
        }

        if self.rng.gen_bool(STARTLE_CHANCE) {
            self.dx = self.random_direction();
            self.dy = self.random_direction();
            self.vx = self.rng.gen_range(X_SPEED_RANGE);
            self.vy = self.rng.gen_range(Y_SPEED_RANGE);
            outcome.startled = true;
        }

        Some(outcome)
    }

    /// Immediate step for event-driven feedback: same reflection logic as
    /// [`step`](Self::step) but no rate limiting, no drift, no startle, and
    /// it moves even while Paused. Does not touch the rate limiter, so the
    /// periodic cadence is unaffected.
    pub fn force_step(&mut self) -> StepOutcome {
        self.advance()
    }

    fn advance(&mut self) -> StepOutcome {
        let margin = f64::from(self.margin);
        let max_x = f64::from(self.viewport.width) - margin;
        let max_y = f64::from(self.viewport.height) - margin;

        let mut next_x = self.x + self.vx * f64::from(self.dx);
        let mut next_y = self.y + self.vy * f64::from(self.dy);
        let mut bounced_x = false;
        let mut bounced_y = false;

        if next_x <= margin {
            next_x = margin;
            self.dx = 1;
            self.vx = self.rng.gen_range(X_SPEED_RANGE);
            bounced_x = true;
        } else if next_x >= max_x {
            next_x = max_x;
            self.dx = -1;
            self.vx = self.rng.gen_range(X_SPEED_RANGE);
            bounced_x = true;
        }

        if next_y <= margin {
            next_y = margin;
            self.dy = 1;
            self.vy = self.rng.gen_range(Y_SPEED_RANGE);
            bounced_y = true;
        } else if next_y >= max_y {
            next_y = max_y;
            self.dy = -1;
            self.vy = self.rng.gen_range(Y_SPEED_RANGE);
            bounced_y = true;
        }

        self.x = next_x;
        self.y = next_y;

        StepOutcome {
            xy: (self.x as i32, self.y as i32),
            bounced_x,
            bounced_y,
            startled: false,
        }
    }

    fn random_direction(&mut self) -> i8 {
        if self.rng.gen_bool(0.5) { 1 } else { -1 }
    }

    pub fn pause(&mut self) {
        self.moving = false;
    }

    pub fn resume(&mut self) {
        self.moving = true;
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Higher multiplier means a shorter interval between committed steps,
    /// i.e. faster apparent motion. Non-positive or non-finite multipliers
    /// are rejected.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(PetModeError::InvalidSpeed(multiplier));
        }
        self.move_interval = BASE_MOVE_INTERVAL.div_f64(multiplier);
        Ok(())
    }

    /// Clamp `(x, y)` into the margin box and jump there. Returns the
    /// committed integer position for write-through to the element.
    pub fn set_position(&mut self, x: f64, y: f64) -> (i32, i32) {
        let margin = f64::from(self.margin);
        let max_x = f64::from(self.viewport.width) - margin;
        let max_y = f64::from(self.viewport.height) - margin;
        self.x = x.max(margin).min(max_x);
        self.y = y.max(margin).min(max_y);
        (self.x as i32, self.y as i32)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub fn direction(&self) -> (i8, i8) {
        (self.dx, self.dy)
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn move_interval(&self) -> Duration {
        self.move_interval
    }

    pub fn time_since_last_move(&self, now: Instant) -> Duration {
        now.duration_since(self.last_move)
    }
}
