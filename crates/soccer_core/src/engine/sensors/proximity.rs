use super::WorldView;
use crate::engine::types::{BodyHandle, Vec3};

/// Relative offsets to nearby entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityDetector {
    radius: f32,
}

impl ProximityDetector {
    pub const DEFAULT_RADIUS: f32 = 10.0;

    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Offsets `entity - origin` for every entity other than `self_body` in range.
    ///
    /// Order follows the world view and carries no meaning.
    pub fn detect(&self, world: &WorldView, self_body: BodyHandle, origin: Vec3) -> Vec<Vec3> {
        world.within(self_body, origin, self.radius).map(|e| e.position - origin).collect()
    }
}

impl Default for ProximityDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS)
    }
}
