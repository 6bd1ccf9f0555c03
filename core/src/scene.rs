//! Scene collaborator
//!
//! A ghost never owns the level it runs in. It resolves entity ids and
//! applies or reverts replay events through [`Scene`].

use glam::Vec2;
use hashbrown::HashMap;

use crate::error::SceneError;
use crate::events::{EntitySpeciality, GameEvent};

/// A level entity as seen by replay playback
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: String,
    pub speciality: EntitySpeciality,
    pub position: Vec2,
    pub size: f32,
    alive: bool,
}

impl Entity {
    /// A live entity
    pub fn new(
        id: impl Into<String>,
        speciality: EntitySpeciality,
        position: Vec2,
        size: f32,
    ) -> Self {
        Self {
            id: id.into(),
            speciality,
            position,
            size,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Collectible counted for the ghost/player difference
    pub fn is_to_take(&self) -> bool {
        self.speciality == EntitySpeciality::IsToTake
    }
}

/// Mutation surface the replay core needs from a level
pub trait Scene {
    /// Look up an entity by id
    fn entity(&self, id: &str) -> Result<&Entity, SceneError>;

    /// Mark an entity destroyed
    fn kill_entity(&mut self, id: &str) -> Result<(), SceneError>;

    /// Bring a destroyed entity back
    fn revert_entity_destroyed(&mut self, id: &str) -> Result<(), SceneError>;

    /// Apply a scripted event other than an entity destruction
    fn handle_event(&mut self, _event: &GameEvent) {}

    /// Undo a scripted event; most events have nothing to undo
    fn revert_event(&mut self, _event: &GameEvent) {}
}

/// In-memory level holding entities by id
#[derive(Debug, Default)]
pub struct Level {
    id: String,
    entities: HashMap<String, Entity>,
    script_events: Vec<GameEvent>,
}

impl Level {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add or replace an entity
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    /// Ids of entities currently destroyed, sorted
    pub fn destroyed_entities(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .entities
            .values()
            .filter(|e| !e.alive)
            .map(|e| e.id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Scripted events applied and not reverted, oldest first
    pub fn script_events(&self) -> &[GameEvent] {
        &self.script_events
    }

    fn entity_mut(&mut self, id: &str) -> Result<&mut Entity, SceneError> {
        self.entities
            .get_mut(id)
            .ok_or_else(|| SceneError::EntityNotFound(id.to_string()))
    }
}

impl Scene for Level {
    fn entity(&self, id: &str) -> Result<&Entity, SceneError> {
        self.entities
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound(id.to_string()))
    }

    fn kill_entity(&mut self, id: &str) -> Result<(), SceneError> {
        self.entity_mut(id)?.alive = false;
        Ok(())
    }

    fn revert_entity_destroyed(&mut self, id: &str) -> Result<(), SceneError> {
        self.entity_mut(id)?.alive = true;
        Ok(())
    }

    fn handle_event(&mut self, event: &GameEvent) {
        self.script_events.push(event.clone());
    }

    fn revert_event(&mut self, event: &GameEvent) {
        if let Some(pos) = self.script_events.iter().rposition(|e| e == event) {
            self.script_events.remove(pos);
        }
    }
}
