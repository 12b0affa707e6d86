use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Saturating counters accumulated while pet mode is active. Snapshots are
/// convertible to log events so hosts can ship them through their own sinks.
#[derive(Debug, Default, Clone)]
pub struct PetMetrics {
    callbacks: u64,
    steps: u64,
    reflections: u64,
    startles: u64,
    hidden: u64,
    restored: u64,
}

impl PetMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_callback(&mut self) {
        self.callbacks = self.callbacks.saturating_add(1);
    }

    pub fn record_step(&mut self, reflections: u64, startled: bool) {
        self.steps = self.steps.saturating_add(1);
        self.reflections = self.reflections.saturating_add(reflections);
        if startled {
            self.startles = self.startles.saturating_add(1);
        }
    }

    pub fn record_hidden(&mut self, count: usize) {
        if count > 0 {
            self.hidden = self.hidden.saturating_add(count as u64);
        }
    }

    pub fn record_restored(&mut self, count: usize) {
        if count > 0 {
            self.restored = self.restored.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            callbacks: self.callbacks,
            steps: self.steps,
            reflections: self.reflections,
            startles: self.startles,
            hidden: self.hidden,
            restored: self.restored,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub callbacks: u64,
    pub steps: u64,
    pub reflections: u64,
    pub startles: u64,
    pub hidden: u64,
    pub restored: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut fields = LogFields::new();
        fields.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        fields.insert("callbacks".to_string(), json!(self.callbacks));
        fields.insert("steps".to_string(), json!(self.steps));
        fields.insert("reflections".to_string(), json!(self.reflections));
        fields.insert("startles".to_string(), json!(self.startles));
        fields.insert("hidden".to_string(), json!(self.hidden));
        fields.insert("restored".to_string(), json!(self.restored));
        LogEvent::with_fields(LogLevel::Info, target.to_string(), "pet_metrics", fields)
    }
}
