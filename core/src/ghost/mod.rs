//! Ghost playback
//!
//! A ghost replays a recorded run next to the live player. Replays store a
//! few dozen states per second; each game tick the ghost brackets the
//! current time with a [`StateWindow`] and blends the two states around it,
//! unless they are too far apart in time or space (or the recorded rider was
//! teleported), in which case it holds the older one.
//!
//! Game events recorded with the run are applied to the level as the ghost
//! reaches them and reverted when time moves back.

mod engine;
mod window;


pub use engine::{Ghost, VELOCITY_SCALE, format_time};
pub use window::{StateWindow, WINDOW_SIZE};
