use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use petmode::logging::{LogEvent, LogSink, LoggingResult};
use petmode::{
    HostHooks, LabeledValue, Line, Logger, PetMode, PetModeConfig, PetMotion, Size, Text,
    ViewState,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn build_view() -> ViewState {
    let mut view = ViewState::new(Size::new(250, 122));
    view.register("battery", LabeledValue::new((5, 5), "BAT", "98%"));
    view.register("temp", LabeledValue::new((60, 5), "TEMP", "41C"));
    view.register("aps", LabeledValue::new((110, 5), "APS", "12"));
    view.register("divider", Line::new((0, 14), (250, 14)));
    view.register("uptime", Text::new((200, 5), "1h02m"));
    view.register("face", Text::new((120, 40), "(^_^)"));
    view
}

fn motion_force_steps(c: &mut Criterion) {
    c.bench_function("motion_force_steps", |b| {
        b.iter(|| {
            let mut motion = PetMotion::seeded(Size::new(250, 122), 15, 7);
            for _ in 0..1_000 {
                black_box(motion.force_step());
            }
        });
    });
}

fn motion_rate_limited_steps(c: &mut Criterion) {
    c.bench_function("motion_rate_limited_steps", |b| {
        b.iter(|| {
            let mut motion = PetMotion::seeded(Size::new(250, 122), 15, 7);
            let mut now = Instant::now();
            for _ in 0..1_000 {
                now += Duration::from_millis(50);
                black_box(motion.step(now));
            }
        });
    });
}

fn plugin_event_storm(c: &mut Criterion) {
    c.bench_function("plugin_event_storm", |b| {
        b.iter(|| {
            let mut plugin = PetMode::new(PetModeConfig::default())
                .with_logger(Logger::new(NullSink))
                .with_motion_seed(7);
            let mut view = build_view();
            plugin.on_ui_setup(&mut view);
            for _ in 0..100 {
                plugin.on_log(&mut view);
                plugin.on_ui_update(&mut view);
            }
            plugin.on_unload(&mut view);
        });
    });
}

criterion_group!(
    benches,
    motion_force_steps,
    motion_rate_limited_steps,
    plugin_event_storm
);
criterion_main!(benches);
