//! Generator trait definition
//!
//! The `Generator` trait is the core abstraction for grid shapes.
//! Any type that implements `Generator` can be composited into a scene and
//! rasterized alongside other generators.
//!
//! ## Coordinate Systems
//!
//! The rasterizer walks absolute cell coordinates inside a *frame* (the union
//! of every generator's bounds). Each generator maps those cells into its own
//! centered space before testing membership, so shapes of different native
//! sizes all end up centered on the same grid.

use super::bounds::Bounds;
use super::controls::Controllable;

/// A shape that can be rasterized onto the cell grid
pub trait Generator {
    /// The rectangle this shape occupies at its native size
    fn bounds(&self) -> Bounds;

    /// Whether the cell at absolute grid position (x, y) is part of the shape
    ///
    /// # Arguments
    /// * `x`, `y` - Cell coordinates inside `frame`
    /// * `frame` - The bounds of the whole rasterization pass, used to center
    ///   the shape (not necessarily this generator's own bounds)
    fn is_filled(&self, x: i64, y: i64, frame: &Bounds) -> bool;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn is_filled(&self, x: i64, y: i64, frame: &Bounds) -> bool {
        (**self).is_filled(x, y, frame)
    }
}

/// A generator that also exposes controls and change notification
///
/// This is what a [`Scene`](super::Scene) stores.
pub trait ShapeGenerator: Generator + Controllable {}

impl<T: Generator + Controllable> ShapeGenerator for T {}

/// A boxed generator for dynamic dispatch
pub type BoxedGenerator = Box<dyn ShapeGenerator>;

/// Map an absolute cell coordinate into centered local space
///
/// Cell centers sit at half-integers, so a frame of even extent has no cell
/// on the exact center line.
pub fn to_local(coord: i64, frame_max: i64) -> f64 {
    -0.5 * (frame_max as f64 - 2.0 * (coord as f64 + 0.5))
}

/// Map an absolute cell into centered local (x, y) for a frame
pub fn frame_to_local(x: i64, y: i64, frame: &Bounds) -> (f64, f64) {
    (to_local(x, frame.max_x), to_local(y, frame.max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_even_frame() {
        // 10 wide: cells 0..10 map to -4.5..=4.5
        assert!((to_local(0, 10) - (-4.5)).abs() < 1e-12);
        assert!((to_local(4, 10) - (-0.5)).abs() < 1e-12);
        assert!((to_local(5, 10) - 0.5).abs() < 1e-12);
        assert!((to_local(9, 10) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_to_local_odd_frame() {
        // 11 wide: the middle cell lands exactly on the origin
        assert!(to_local(5, 11).abs() < 1e-12);
    }

    #[test]
    fn test_frame_to_local() {
        let frame = Bounds::new(0, 20, 0, 10);
        let (x, y) = frame_to_local(10, 5, &frame);
        assert!((x - 0.5).abs() < 1e-12);
        assert!((y - 0.5).abs() < 1e-12);
    }
}
