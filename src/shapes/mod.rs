//! Shapes module - generators that decide which grid cells a shape covers
//!
//! This module provides:
//! - `Generator` trait: bounds + per-cell membership
//! - Generators: `Circle` (ring/disc) and `Star` (star polygon)
//! - `Bounds` and the geometry helpers they are built on
//! - `Scene` for compositing several generators with change tracking

mod bounds;
mod circle;
mod controls;
mod events;
pub mod math;
mod scene;
mod star;
mod traits;

pub use bounds::Bounds;
pub use circle::{Circle, RingMode};
pub use controls::{Control, ControlKind, ControlValue, Controllable};
pub use events::{ChangeEmitter, Subscription};
pub use scene::{Scene, SceneEntry};
pub use star::{Star, MAX_POINTS, MIN_POINTS};
pub use traits::{frame_to_local, to_local, BoxedGenerator, Generator, ShapeGenerator};

/// Largest diameter any generator accepts; keeps rasterization bounded
pub const MAX_SIZE: f64 = 2000.0;

/// Round and clamp a requested diameter to `0..=MAX_SIZE`
fn clamp_size(size: f64) -> u32 {
    if size.is_nan() {
        return 0;
    }
    size.round().clamp(0.0, MAX_SIZE) as u32
}
