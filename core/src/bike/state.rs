//! Decoded bike pose

use glam::{Mat2, Vec2};

use super::serialized::{SerializedBikeState, StateFlags};
use super::settings::{PhysicsSettings, SideAnchors};
use crate::GameTime;
use crate::codec::{
    decode_rotation, decode_unit8, decode8_point, encode_rotation, encode_unit8, encode8_point,
    orthonormalize,
};

/// Which way the rider faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveDir {
    Left,
    #[default]
    Right,
}

/// Rider joint positions for one facing direction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiderPose {
    pub hand: Vec2,
    pub elbow: Vec2,
    pub shoulder: Vec2,
    pub lower_body: Vec2,
    pub knee: Vec2,
    pub foot: Vec2,
    pub head: Vec2,
}

impl RiderPose {
    /// Joint-wise linear interpolation
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            hand: self.hand.lerp(other.hand, t),
            elbow: self.elbow.lerp(other.elbow, t),
            shoulder: self.shoulder.lerp(other.shoulder, t),
            lower_body: self.lower_body.lerp(other.lower_body, t),
            knee: self.knee.lerp(other.knee, t),
            foot: self.foot.lerp(other.foot, t),
            head: self.head.lerp(other.head, t),
        }
    }

    /// Place the head above the shoulder along the torso axis
    fn place_head(&mut self, neck_length: f32) {
        let torso = (self.shoulder - self.lower_body).normalize_or_zero();
        self.head = if torso == Vec2::ZERO {
            self.shoulder
        } else {
            self.shoulder + torso * neck_length
        };
    }
}

/// Full pose of one biker at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BikeState {
    pub dir: DriveDir,
    /// Frame center
    pub center: Vec2,
    pub front_wheel: Vec2,
    pub rear_wheel: Vec2,
    pub frame_rot: Mat2,
    pub front_wheel_rot: Mat2,
    pub rear_wheel_rot: Mat2,
    /// Joints used while facing right
    pub rider: RiderPose,
    /// Mirrored joints used while facing left
    pub rider_alt: RiderPose,
    pub swing_anchor: Vec2,
    pub front_anchor: Vec2,
    pub swing_anchor_alt: Vec2,
    pub front_anchor_alt: Vec2,
    pub engine_rpm: f32,
    pub game_time: GameTime,
}

impl Default for BikeState {
    fn default() -> Self {
        Self {
            dir: DriveDir::Right,
            center: Vec2::ZERO,
            front_wheel: Vec2::ZERO,
            rear_wheel: Vec2::ZERO,
            frame_rot: Mat2::IDENTITY,
            front_wheel_rot: Mat2::IDENTITY,
            rear_wheel_rot: Mat2::IDENTITY,
            rider: RiderPose::default(),
            rider_alt: RiderPose::default(),
            swing_anchor: Vec2::ZERO,
            front_anchor: Vec2::ZERO,
            swing_anchor_alt: Vec2::ZERO,
            front_anchor_alt: Vec2::ZERO,
            engine_rpm: 0.0,
            game_time: 0.0,
        }
    }
}

impl BikeState {
    /// Rider joints for the current direction
    pub fn active_rider(&self) -> &RiderPose {
        match self.dir {
            DriveDir::Right => &self.rider,
            DriveDir::Left => &self.rider_alt,
        }
    }

    /// Mutable rider joints for the current direction
    pub fn active_rider_mut(&mut self) -> &mut RiderPose {
        match self.dir {
            DriveDir::Right => &mut self.rider,
            DriveDir::Left => &mut self.rider_alt,
        }
    }

    /// Largest absolute x offset from the frame center among tracked joints
    pub fn max_x_diff(&self) -> f32 {
        self.max_diff().x
    }

    /// Largest absolute y offset from the frame center among tracked joints
    pub fn max_y_diff(&self) -> f32 {
        self.max_diff().y
    }

    /// Both wheels plus the active side's serialized joints
    fn max_diff(&self) -> Vec2 {
        let rider = self.active_rider();
        [
            self.front_wheel,
            self.rear_wheel,
            rider.elbow,
            rider.shoulder,
            rider.lower_body,
            rider.knee,
        ]
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc.max((*p - self.center).abs()))
    }

    /// Compress into a replay record
    pub fn serialize(&self, settings: &PhysicsSettings) -> SerializedBikeState {
        let max_diff = self.max_diff();
        let rider = self.active_rider();
        let encode = |p: Vec2| encode8_point(self.center, max_diff, p);

        SerializedBikeState {
            game_time: self.game_time,
            flags: StateFlags::from_dir(self.dir),
            engine_rpm: encode_unit8(
                self.engine_rpm,
                settings.engine_rpm_min,
                settings.engine_rpm_max,
            ),
            frame_x: self.center.x,
            frame_y: self.center.y,
            max_x_diff: max_diff.x,
            max_y_diff: max_diff.y,
            front_wheel: encode(self.front_wheel),
            rear_wheel: encode(self.rear_wheel),
            elbow: encode(rider.elbow),
            shoulder: encode(rider.shoulder),
            lower_body: encode(rider.lower_body),
            knee: encode(rider.knee),
            frame_rot: encode_rotation(self.frame_rot),
            front_wheel_rot: encode_rotation(self.front_wheel_rot),
            rear_wheel_rot: encode_rotation(self.rear_wheel_rot),
        }
    }

    /// Rebuild a pose from a replay record
    ///
    /// Only the side named by the record's direction flag gets rider joints.
    /// Hands and feet sit on their anchors since the record does not carry
    /// them.
    pub fn deserialize(record: &SerializedBikeState, settings: &PhysicsSettings) -> Self {
        let center = record.frame();
        let max_diff = record.max_diff();
        let decode = |code: [i8; 2]| decode8_point(center, max_diff, code);

        let frame_rot = decode_rotation(record.frame_rot);
        let place = |anchor: Vec2| frame_rot * anchor + center;

        let geometry = &settings.geometry;
        let right: SideAnchors = geometry.right();
        let left: SideAnchors = geometry.left();

        let mut state = BikeState {
            center,
            front_wheel: decode(record.front_wheel),
            rear_wheel: decode(record.rear_wheel),
            frame_rot,
            front_wheel_rot: decode_rotation(record.front_wheel_rot),
            rear_wheel_rot: decode_rotation(record.rear_wheel_rot),
            swing_anchor: place(right.swing),
            front_anchor: place(right.front),
            swing_anchor_alt: place(left.swing),
            front_anchor_alt: place(left.front),
            engine_rpm: decode_unit8(
                record.engine_rpm,
                settings.engine_rpm_min,
                settings.engine_rpm_max,
            ),
            game_time: record.game_time,
            ..BikeState::default()
        };

        let Some(dir) = record.flags.dir() else {
            return state;
        };

        let anchors = match dir {
            DriveDir::Right => right,
            DriveDir::Left => left,
        };

        state.dir = dir;
        let rider = state.active_rider_mut();
        rider.hand = place(anchors.hand);
        rider.elbow = decode(record.elbow);
        rider.shoulder = decode(record.shoulder);
        rider.lower_body = decode(record.lower_body);
        rider.knee = decode(record.knee);
        rider.foot = place(anchors.foot);
        rider.place_head(geometry.neck_length);

        state
    }

    /// Full-joint interpolation between two decoded poses
    ///
    /// Starts from `a`. When the direction changes between the two poses the
    /// result is `a` unchanged. Wheel rotations snap to `b`, engine RPM only
    /// moves for `t <= 1`.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let mut out = *a;
        if a.dir != b.dir {
            return out;
        }

        out.center = a.center.lerp(b.center, t);
        out.front_wheel = a.front_wheel.lerp(b.front_wheel, t);
        out.rear_wheel = a.rear_wheel.lerp(b.rear_wheel, t);

        if t <= 1.0 {
            out.engine_rpm = a.engine_rpm + (b.engine_rpm - a.engine_rpm) * t;
        }

        out.frame_rot = orthonormalize(a.frame_rot + (b.frame_rot - a.frame_rot) * t);
        out.front_wheel_rot = b.front_wheel_rot;
        out.rear_wheel_rot = b.rear_wheel_rot;

        match a.dir {
            DriveDir::Right => {
                out.rider = a.rider.lerp(&b.rider, t);
                out.swing_anchor = a.swing_anchor.lerp(b.swing_anchor, t);
                out.front_anchor = a.front_anchor.lerp(b.front_anchor, t);
            }
            DriveDir::Left => {
                out.rider_alt = a.rider_alt.lerp(&b.rider_alt, t);
                out.swing_anchor_alt = a.swing_anchor_alt.lerp(b.swing_anchor_alt, t);
                out.front_anchor_alt = a.front_anchor_alt.lerp(b.front_anchor_alt, t);
            }
        }

        out.game_time = a.game_time + (b.game_time - a.game_time) * t;
        out
    }
}
