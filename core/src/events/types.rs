//! Game event types

use crate::GameTime;
use crate::error::{EventError, SceneError};
use crate::scene::Scene;

/// What an entity does in its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntitySpeciality {
    #[default]
    None,
    IsStart,
    MakeWin,
    Kill,
    /// Collectible that must be taken to finish (strawberry)
    IsToTake,
    ParticlesSource,
}

impl EntitySpeciality {
    /// Wire value
    pub fn to_i32(self) -> i32 {
        match self {
            EntitySpeciality::None => 0,
            EntitySpeciality::IsStart => 1,
            EntitySpeciality::MakeWin => 2,
            EntitySpeciality::Kill => 3,
            EntitySpeciality::IsToTake => 4,
            EntitySpeciality::ParticlesSource => 5,
        }
    }
}

impl TryFrom<i32> for EntitySpeciality {
    type Error = EventError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => EntitySpeciality::None,
            1 => EntitySpeciality::IsStart,
            2 => EntitySpeciality::MakeWin,
            3 => EntitySpeciality::Kill,
            4 => EntitySpeciality::IsToTake,
            5 => EntitySpeciality::ParticlesSource,
            other => return Err(EventError::UnknownEntitySpeciality(other)),
        })
    }
}

/// Periodic motion script attached to a block or entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicRotation {
    pub init_angle: f32,
    pub radius: f32,
    pub period: f32,
    pub start_time: i32,
    pub end_time: i32,
}

/// Periodic translation script attached to a block or entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicTranslation {
    pub x: f32,
    pub y: f32,
    pub period: f32,
    pub start_time: i32,
    pub end_time: i32,
}

/// Something that happened during a recorded run
///
/// Wire tags are fixed; see [`GameEvent::tag`].
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EntityDestroyed {
        entity_id: String,
        speciality: EntitySpeciality,
        size: f32,
        x: f32,
        y: f32,
    },
    ClearMessages,
    PlaceInGameArrow {
        x: f32,
        y: f32,
        angle: f32,
    },
    PlaceScreenArrow {
        x: f32,
        y: f32,
        angle: f32,
    },
    HideArrow,
    Message {
        text: String,
    },
    MoveBlock {
        block_id: String,
        x: f32,
        y: f32,
    },
    SetBlockPos {
        block_id: String,
        x: f32,
        y: f32,
    },
    SetGravity {
        x: f32,
        y: f32,
    },
    SetPlayersPosition {
        x: f32,
        y: f32,
        right: bool,
    },
    SetEntityPos {
        entity_id: String,
        x: f32,
        y: f32,
    },
    SetBlockCenter {
        block_id: String,
        x: f32,
        y: f32,
    },
    SetBlockRotation {
        block_id: String,
        angle: f32,
    },
    SetDynamicEntityRotation {
        entity_id: String,
        motion: DynamicRotation,
    },
    SetDynamicEntityTranslation {
        entity_id: String,
        motion: DynamicTranslation,
    },
    SetDynamicEntityNone {
        entity_id: String,
    },
    CameraZoom {
        zoom: f32,
    },
    CameraMove {
        x: f32,
        y: f32,
    },
    SetDynamicBlockRotation {
        block_id: String,
        motion: DynamicRotation,
    },
    SetDynamicBlockTranslation {
        block_id: String,
        motion: DynamicTranslation,
    },
    SetDynamicBlockNone {
        block_id: String,
    },
    PenaltyTime {
        penalty: f32,
    },
    PlayerDies,
    SetPlayerPosition {
        x: f32,
        y: f32,
        right: bool,
        player: i32,
    },
    SetDynamicBlockSelfRotation {
        block_id: String,
        period: f32,
        start_time: i32,
        end_time: i32,
    },
    CameraRotate {
        angle: f32,
    },
    CameraSetPos {
        x: f32,
        y: f32,
    },
    PlayerWins,
}

impl GameEvent {
    /// Wire tag of this event
    pub fn tag(&self) -> i32 {
        match self {
            GameEvent::EntityDestroyed { .. } => 4,
            GameEvent::ClearMessages => 5,
            GameEvent::PlaceInGameArrow { .. } => 6,
            GameEvent::PlaceScreenArrow { .. } => 7,
            GameEvent::HideArrow => 8,
            GameEvent::Message { .. } => 9,
            GameEvent::MoveBlock { .. } => 10,
            GameEvent::SetBlockPos { .. } => 11,
            GameEvent::SetGravity { .. } => 12,
            GameEvent::SetPlayersPosition { .. } => 13,
            GameEvent::SetEntityPos { .. } => 14,
            GameEvent::SetBlockCenter { .. } => 15,
            GameEvent::SetBlockRotation { .. } => 16,
            GameEvent::SetDynamicEntityRotation { .. } => 17,
            GameEvent::SetDynamicEntityTranslation { .. } => 18,
            GameEvent::SetDynamicEntityNone { .. } => 19,
            GameEvent::CameraZoom { .. } => 20,
            GameEvent::CameraMove { .. } => 21,
            GameEvent::SetDynamicBlockRotation { .. } => 22,
            GameEvent::SetDynamicBlockTranslation { .. } => 23,
            GameEvent::SetDynamicBlockNone { .. } => 24,
            GameEvent::PenaltyTime { .. } => 25,
            GameEvent::PlayerDies => 26,
            GameEvent::SetPlayerPosition { .. } => 30,
            GameEvent::SetDynamicBlockSelfRotation { .. } => 31,
            GameEvent::CameraRotate { .. } => 33,
            GameEvent::CameraSetPos { .. } => 43,
            GameEvent::PlayerWins => 44,
        }
    }

    /// Human-readable event name
    pub fn type_name(&self) -> &'static str {
        match self {
            GameEvent::EntityDestroyed { .. } => "EntityDestroyed",
            GameEvent::ClearMessages => "ClearMessages",
            GameEvent::PlaceInGameArrow { .. } => "PlaceInGameArrow",
            GameEvent::PlaceScreenArrow { .. } => "PlaceScreenArrow",
            GameEvent::HideArrow => "HideArrow",
            GameEvent::Message { .. } => "Message",
            GameEvent::MoveBlock { .. } => "MoveBlock",
            GameEvent::SetBlockPos { .. } => "SetBlockPos",
            GameEvent::SetGravity { .. } => "SetGravity",
            GameEvent::SetPlayersPosition { .. } => "SetPlayersPosition",
            GameEvent::SetEntityPos { .. } => "SetEntityPos",
            GameEvent::SetBlockCenter { .. } => "SetBlockCenter",
            GameEvent::SetBlockRotation { .. } => "SetBlockRotation",
            GameEvent::SetDynamicEntityRotation { .. } => "SetDynamicEntityRotation",
            GameEvent::SetDynamicEntityTranslation { .. } => "SetDynamicEntityTranslation",
            GameEvent::SetDynamicEntityNone { .. } => "SetDynamicEntityNone",
            GameEvent::CameraZoom { .. } => "CameraZoom",
            GameEvent::CameraMove { .. } => "CameraMove",
            GameEvent::SetDynamicBlockRotation { .. } => "SetDynamicBlockRotation",
            GameEvent::SetDynamicBlockTranslation { .. } => "SetDynamicBlockTranslation",
            GameEvent::SetDynamicBlockNone { .. } => "SetDynamicBlockNone",
            GameEvent::PenaltyTime { .. } => "PenaltyTime",
            GameEvent::PlayerDies => "PlayerDies",
            GameEvent::SetPlayerPosition { .. } => "SetPlayerPosition",
            GameEvent::SetDynamicBlockSelfRotation { .. } => "SetDynamicBlockSelfRotation",
            GameEvent::CameraRotate { .. } => "CameraRotate",
            GameEvent::CameraSetPos { .. } => "CameraSetPos",
            GameEvent::PlayerWins => "PlayerWins",
        }
    }

    /// Whether applying this event moves the player without physics
    pub fn is_teleport(&self) -> bool {
        matches!(
            self,
            GameEvent::SetPlayersPosition { .. } | GameEvent::SetPlayerPosition { .. }
        )
    }

    /// Apply the event to a scene, replay style
    pub fn apply(&self, scene: &mut dyn Scene) -> Result<(), SceneError> {
        match self {
            GameEvent::EntityDestroyed { entity_id, .. } => scene.kill_entity(entity_id),
            other => {
                scene.handle_event(other);
                Ok(())
            }
        }
    }

    /// Undo the event after time moved back before it
    pub fn revert(&self, scene: &mut dyn Scene) -> Result<(), SceneError> {
        match self {
            GameEvent::EntityDestroyed { entity_id, .. } => {
                scene.revert_entity_destroyed(entity_id)
            }
            other => {
                scene.revert_event(other);
                Ok(())
            }
        }
    }
}

/// An event with its timestamp and playback bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedGameEvent {
    pub time: GameTime,
    /// Already applied going forward
    pub passed: bool,
    pub event: GameEvent,
}

impl RecordedGameEvent {
    /// A fresh, not yet applied event
    pub fn new(time: GameTime, event: GameEvent) -> Self {
        Self {
            time,
            passed: false,
            event,
        }
    }
}
