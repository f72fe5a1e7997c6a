use crate::engine::types::{BodyHandle, Team, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ball,
    Agent(Team),
    /// Goal reference point, keyed by the defending team
    Goal(Team),
}

/// What sensors see of one scene entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldEntity {
    /// Identity used for self-exclusion; goals have none
    pub body: Option<BodyHandle>,
    pub kind: EntityKind,
    pub position: Vec3,
}

/// Positions of every scene entity at one instant.
#[derive(Debug, Clone, Default)]
pub struct WorldView {
    entities: Vec<WorldEntity>,
}

impl WorldView {
    pub fn new(entities: Vec<WorldEntity>) -> Self {
        Self { entities }
    }

    pub fn push(&mut self, entity: WorldEntity) {
        self.entities.push(entity);
    }

    pub fn entities(&self) -> &[WorldEntity] {
        &self.entities
    }

    /// Entities within `radius` of `origin` (inclusive), excluding `self_body`.
    pub fn within<'a>(
        &'a self,
        self_body: BodyHandle,
        origin: Vec3,
        radius: f32,
    ) -> impl Iterator<Item = &'a WorldEntity> + 'a {
        let r2 = radius * radius;
        self.entities
            .iter()
            .filter(move |e| e.body != Some(self_body) && (e.position - origin).norm_squared() <= r2)
    }
}
