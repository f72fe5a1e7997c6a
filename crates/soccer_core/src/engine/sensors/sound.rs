use serde::{Deserialize, Serialize};

use super::{EntityKind, WorldView};
use crate::engine::types::{BodyHandle, Team, Vec3};

/// Presence of ball/ally/enemy within hearing range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoundCues {
    pub ball: bool,
    pub ally: bool,
    pub enemy: bool,
}

impl SoundCues {
    pub const WIDTH: usize = 3;

    /// `[ball, ally, enemy]`, each exactly 0.0 or 1.0
    pub fn to_array(self) -> [f32; 3] {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        [flag(self.ball), flag(self.ally), flag(self.enemy)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundDetector {
    radius: f32,
}

impl SoundDetector {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Several entities of one category still yield a single flag.
    pub fn detect(&self, world: &WorldView, self_body: BodyHandle, team: Team, origin: Vec3) -> SoundCues {
        let mut cues = SoundCues::default();
        for e in world.within(self_body, origin, self.radius) {
            match e.kind {
                EntityKind::Ball => cues.ball = true,
                EntityKind::Agent(t) if t == team => cues.ally = true,
                EntityKind::Agent(_) => cues.enemy = true,
                EntityKind::Goal(_) => {}
            }
        }
        cues
    }
}
