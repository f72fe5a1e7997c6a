//! Bounded FIFO of past observation snapshots.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::engine::types::Vec3;

/// Fixed-capacity FIFO; the oldest entry is evicted before a push that
/// would overflow. Iteration is oldest first.
#[derive(Debug, Clone)]
pub struct TemporalMemory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> TemporalMemory<T> {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Appends `item`, evicting the oldest when full. Returns the evicted entry.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity { self.entries.pop_front() } else { None };
        self.entries.push_back(item);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Per-step features remembered for later observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub ball_touch: f32,
    pub goal_offset: Vec3,
    pub heading_offset: Option<f32>,
}

impl MemorySnapshot {
    /// Width without the heading offset.
    pub const BASE_WIDTH: usize = 10;

    pub fn width(&self) -> usize {
        Self::BASE_WIDTH + usize::from(self.heading_offset.is_some())
    }

    pub fn write_to(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(self.position.as_slice());
        out.extend_from_slice(self.velocity.as_slice());
        out.push(self.ball_touch);
        out.extend_from_slice(self.goal_offset.as_slice());
        if let Some(h) = self.heading_offset {
            out.push(h);
        }
    }
}
