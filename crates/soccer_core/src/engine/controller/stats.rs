//! Cross-episode statistics (goal-ended episodes only).

use serde::{Deserialize, Serialize};

use crate::engine::reward::EpisodeMetrics;
use crate::engine::types::Team;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub episodes: u64,
    pub goals: [u64; 2],
    pub blue_wins: u64,
}

impl EpisodeStats {
    pub fn record(&mut self, metrics: &EpisodeMetrics) {
        self.episodes += 1;
        for team in Team::ALL {
            self.goals[team.index()] += u64::from(metrics.score[team.index()]);
        }
        if metrics.winner() == Some(Team::Blue) {
            self.blue_wins += 1;
        }
    }

    pub fn blue_win_rate(&self) -> f32 {
        if self.episodes == 0 {
            0.0
        } else {
            self.blue_wins as f32 / self.episodes as f32
        }
    }

    pub fn avg_goals(&self, team: Team) -> f32 {
        if self.episodes == 0 {
            0.0
        } else {
            self.goals[team.index()] as f32 / self.episodes as f32
        }
    }
}
