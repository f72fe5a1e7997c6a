//! Sensors - Stateless queries over the scene at call time
//!
//! - `ProximityDetector`: offsets to every other entity within a radius
//! - `SoundDetector`: ball/ally/enemy presence flags within a hearing radius
//!
//! Both read a `WorldView` rebuilt by the controller from physics poses;
//! neither keeps state between calls.

mod proximity;
mod sound;
mod world;

pub use proximity::ProximityDetector;
pub use sound::{SoundCues, SoundDetector};
pub use world::{EntityKind, WorldEntity, WorldView};
