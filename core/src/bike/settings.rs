//! Physical constants needed to rebuild a pose from a serialized record

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bike anchor points, relative to the frame center in the frame's local axes.
///
/// Values describe a bike facing right; the mirrored set used when facing
/// left is obtained by negating x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeGeometry {
    /// Rear suspension (swing arm) anchor
    #[serde(default = "default_rear_suspension_anchor")]
    pub rear_suspension_anchor: Vec2,
    /// Front suspension anchor
    #[serde(default = "default_front_suspension_anchor")]
    pub front_suspension_anchor: Vec2,
    /// Where the rider's hand grips the handlebar
    #[serde(default = "default_hand_anchor")]
    pub hand_anchor: Vec2,
    /// Where the rider's foot rests
    #[serde(default = "default_foot_anchor")]
    pub foot_anchor: Vec2,
    /// Distance from shoulder to head center
    #[serde(default = "default_neck_length")]
    pub neck_length: f32,
}

impl Default for BikeGeometry {
    fn default() -> Self {
        Self {
            rear_suspension_anchor: default_rear_suspension_anchor(),
            front_suspension_anchor: default_front_suspension_anchor(),
            hand_anchor: default_hand_anchor(),
            foot_anchor: default_foot_anchor(),
            neck_length: default_neck_length(),
        }
    }
}

fn default_rear_suspension_anchor() -> Vec2 {
    Vec2::new(-0.11, -0.3)
}

fn default_front_suspension_anchor() -> Vec2 {
    Vec2::new(0.4, 0.4)
}

fn default_hand_anchor() -> Vec2 {
    Vec2::new(0.3, 0.45)
}

fn default_foot_anchor() -> Vec2 {
    Vec2::new(0.0, -0.37)
}

fn default_neck_length() -> f32 {
    0.22
}

/// Anchor set for one facing direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideAnchors {
    pub swing: Vec2,
    pub front: Vec2,
    pub hand: Vec2,
    pub foot: Vec2,
}

impl BikeGeometry {
    /// Anchors used while facing right
    pub fn right(&self) -> SideAnchors {
        SideAnchors {
            swing: self.rear_suspension_anchor,
            front: self.front_suspension_anchor,
            hand: self.hand_anchor,
            foot: self.foot_anchor,
        }
    }

    /// Mirrored anchors used while facing left
    pub fn left(&self) -> SideAnchors {
        let mirror = |v: Vec2| Vec2::new(-v.x, v.y);
        SideAnchors {
            swing: mirror(self.rear_suspension_anchor),
            front: mirror(self.front_suspension_anchor),
            hand: mirror(self.hand_anchor),
            foot: mirror(self.foot_anchor),
        }
    }
}

/// Physics settings shared by the recorder and every ghost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Idle engine speed (default: 400)
    #[serde(default = "default_engine_rpm_min")]
    pub engine_rpm_min: f32,
    /// Engine speed at full throttle (default: 8000)
    #[serde(default = "default_engine_rpm_max")]
    pub engine_rpm_max: f32,
    /// Bike anchor geometry
    #[serde(default)]
    pub geometry: BikeGeometry,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            engine_rpm_min: default_engine_rpm_min(),
            engine_rpm_max: default_engine_rpm_max(),
            geometry: BikeGeometry::default(),
        }
    }
}

fn default_engine_rpm_min() -> f32 {
    400.0
}

fn default_engine_rpm_max() -> f32 {
    8000.0
}
