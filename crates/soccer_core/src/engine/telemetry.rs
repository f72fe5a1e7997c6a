//! Telemetry - fire-and-forget scalar metrics
//!
//! The core only writes; what happens to the values (logs, TensorBoard,
//! CSV) belongs to the sink.

use std::collections::BTreeMap;

pub mod keys {
    pub const GOALS_SCORED: &str = "GoalsScored";
    pub const POSSESSION_TIME_BLUE: &str = "PossessionTime/Blue";
    pub const POSSESSION_TIME_PURPLE: &str = "PossessionTime/Purple";
    pub const BLUE_WIN_RATE: &str = "Blue Team Win Rate";
    pub const AVG_BLUE_GOALS: &str = "Avg Blue Team Goals";
    pub const AVG_PURPLE_GOALS: &str = "Avg Purple Team Goals";
    pub const EPISODE_LENGTH: &str = "EpisodeLength";
}

pub trait TelemetrySink {
    fn record(&mut self, key: &str, value: f32);
}

/// Writes every metric as a `tracing` debug event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record(&mut self, key: &str, value: f32) {
        tracing::debug!(metric = key, value, "telemetry");
    }
}

/// Keeps every value in memory, per key, in write order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    series: BTreeMap<String, Vec<f32>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self, key: &str) -> &[f32] {
        self.series.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn last(&self, key: &str) -> Option<f32> {
        self.series(key).last().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&mut self, key: &str, value: f32) {
        self.series.entry(key.to_string()).or_default().push(value);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn record(&mut self, _key: &str, _value: f32) {}
}
