//! Geometry helpers shared by the generators
//!
//! All coordinates here are in a generator's local, centered space:
//! (0, 0) is the middle of the shape and one unit is one grid cell.

use crate::error::ShapeError;

/// Segments flatter than this (relative to their length) in x are vertical
const VERTICAL_TOLERANCE: f64 = 1e-9;

/// Euclidean distance of (x, y) from the origin
pub fn distance(x: f64, y: f64) -> f64 {
    distance_scaled(x, y, 1.0)
}

/// Distance from the origin with the x axis divided by `ratio`
///
/// A ratio of 2.0 squashes a circle into an ellipse twice as wide as it is
/// tall, which is how non-square bounding boxes would be filled. A zero or
/// non-finite ratio is treated as 1.0.
pub fn distance_scaled(x: f64, y: f64, ratio: f64) -> f64 {
    let ratio = if ratio == 0.0 || !ratio.is_finite() { 1.0 } else { ratio };
    let sx = x / ratio;
    (y * y + sx * sx).sqrt()
}

/// Perpendicular distance from (x, y) to the line `y = gradient * x + intercept`
///
/// Exact for every finite gradient, including zero. Vertical lines cannot be
/// written in this form; use [`Line::Vertical`] for those.
pub fn distance_to_line(x: f64, y: f64, gradient: f64, intercept: f64) -> f64 {
    (gradient * x - y + intercept).abs() / (gradient * gradient + 1.0).sqrt()
}

/// Greatest common divisor (gcd(n, 0) == n)
pub fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// An infinite line through two points
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line {
    /// `y = gradient * x + intercept`
    Sloped { gradient: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl Line {
    /// Build the line passing through `a` and `b`
    ///
    /// Returns [`ShapeError::DegenerateLine`] when the points coincide, since
    /// no unique line exists.
    pub fn through(a: (f64, f64), b: (f64, f64)) -> Result<Self, ShapeError> {
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let span = dx.abs().max(dy.abs());

        if span <= f64::EPSILON {
            return Err(ShapeError::DegenerateLine { x: a.0, y: a.1 });
        }

        if dx.abs() <= span * VERTICAL_TOLERANCE {
            return Ok(Line::Vertical {
                x: (a.0 + b.0) / 2.0,
            });
        }

        let gradient = dy / dx;
        Ok(Line::Sloped {
            gradient,
            intercept: a.1 - gradient * a.0,
        })
    }

    /// Perpendicular distance from (x, y) to this line
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        match *self {
            Line::Sloped {
                gradient,
                intercept,
            } => distance_to_line(x, y, gradient, intercept),
            Line::Vertical { x: lx } => (x - lx).abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!(distance(0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_scaled() {
        // Halving x makes (4, 0) as far as (2, 0)
        assert!((distance_scaled(4.0, 0.0, 2.0) - 2.0).abs() < 1e-12);
        assert!((distance_scaled(0.0, 3.0, 2.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_scaled_zero_ratio() {
        assert_eq!(distance_scaled(3.0, 4.0, 0.0), 5.0);
        assert_eq!(distance_scaled(3.0, 4.0, f64::NAN), 5.0);
    }

    #[test]
    fn test_distance_to_line() {
        // y = x, point (1, 0) sits sqrt(2)/2 away
        let d = distance_to_line(1.0, 0.0, 1.0, 0.0);
        assert!((d - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);

        // Horizontal line y = 2
        assert!((distance_to_line(10.0, 5.0, 0.0, 2.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_through_sloped() {
        let line = Line::through((0.0, 1.0), (2.0, 5.0)).unwrap();
        assert_eq!(
            line,
            Line::Sloped {
                gradient: 2.0,
                intercept: 1.0
            }
        );
    }

    #[test]
    fn test_line_through_vertical() {
        let line = Line::through((3.0, -1.0), (3.0, 7.0)).unwrap();
        assert_eq!(line, Line::Vertical { x: 3.0 });
        assert!((line.distance_to(5.0, 100.0) - 2.0).abs() < 1e-12);
        assert!(line.distance_to(1.0, 0.0).is_finite());
    }

    #[test]
    fn test_line_through_nearly_vertical() {
        // cos(pi/2) style rounding noise must not produce a huge gradient
        let line = Line::through((6.1e-17, -10.0), (-1.8e-16, 10.0)).unwrap();
        assert!(matches!(line, Line::Vertical { .. }));
    }

    #[test]
    fn test_line_through_coincident() {
        let err = Line::through((1.0, 1.0), (1.0, 1.0)).unwrap_err();
        assert!(matches!(err, ShapeError::DegenerateLine { .. }));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(8, 2), 2);
        assert_eq!(gcd(5, 2), 1);
        assert_eq!(gcd(9, 3), 3);
        assert_eq!(gcd(7, 0), 7);
    }
}
