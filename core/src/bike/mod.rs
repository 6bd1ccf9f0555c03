//! Bike pose and its replay encoding
//!
//! [`BikeState`] is the decoded pose the simulation produces each tick and
//! a ghost renders. [`SerializedBikeState`] is the 40-byte record stored in
//! replay files.

mod serialized;
mod settings;
mod state;


pub use serialized::{SERIALIZED_STATE_SIZE, SerializedBikeState, StateFlags};
pub use settings::{BikeGeometry, PhysicsSettings, SideAnchors};
pub use state::{BikeState, DriveDir, RiderPose};
