//! PossessionTracker - possession time from ball contacts
//!
//! The team that touched the ball last is in possession until the other
//! team touches it. Time is simulation seconds and only ever accumulates.

use serde::{Deserialize, Serialize};

use crate::engine::types::Team;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PossessionTracker {
    holder: Option<Team>,
    /// Simulation time of the last credit
    since: f64,
    /// Seconds per team, indexed by `Team::index`
    accumulated: [f64; 2],
    changes: u32,
}

impl PossessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self) -> Option<Team> {
        self.holder
    }

    pub fn changes(&self) -> u32 {
        self.changes
    }

    /// Records a touch at simulation time `now`. Returns true on a change of possession.
    pub fn on_touch(&mut self, team: Team, now: f64) -> bool {
        self.credit(now);
        if self.holder == Some(team) {
            return false;
        }
        if self.holder.is_some() {
            self.changes += 1;
        }
        self.holder = Some(team);
        true
    }

    /// Credits the running holder up to `now` without changing possession.
    pub fn credit(&mut self, now: f64) {
        if let Some(team) = self.holder {
            let delta = (now - self.since).max(0.0);
            self.accumulated[team.index()] += delta;
        }
        self.since = self.since.max(now);
    }

    pub fn seconds(&self, team: Team) -> f64 {
        self.accumulated[team.index()]
    }

    /// Share of possession for `team`; 0.5 before anyone has touched the ball.
    pub fn share(&self, team: Team) -> f64 {
        let total = self.accumulated[0] + self.accumulated[1];
        if total <= 0.0 {
            0.5
        } else {
            self.accumulated[team.index()] / total
        }
    }

    /// Episode boundary: nobody holds the ball, counters start over at `now`.
    pub fn reset(&mut self, now: f64) {
        *self = Self { since: now, ..Self::default() };
    }
}
