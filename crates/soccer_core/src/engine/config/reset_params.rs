//! Named values re-read at the start of every episode.

use std::collections::BTreeMap;

pub const BALL_TOUCH_KEY: &str = "ball_touch";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetParameters {
    values: BTreeMap<String, f32>,
}

impl ResetParameters {
    pub fn new(values: BTreeMap<String, f32>) -> Self {
        Self { values }
    }

    pub fn set(&mut self, key: impl Into<String>, value: f32) {
        self.values.insert(key.into(), value);
    }

    pub fn get_with_default(&self, key: &str, default: f32) -> f32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    pub fn ball_touch(&self) -> f32 {
        self.get_with_default(BALL_TOUCH_KEY, 0.0)
    }
}
