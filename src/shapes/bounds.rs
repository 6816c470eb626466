//! Axis-aligned cell rectangles

use crate::error::ShapeError;

/// An integer rectangle in the shared cell space
///
/// Iteration over a bounds is half-open: x runs over `min_x..max_x` and
/// y over `min_y..max_y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Bounds {
    /// Create a rectangle, ordering each axis so that min <= max
    pub fn new(min_x: i64, max_x: i64, min_y: i64, max_y: i64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
        }
    }

    /// A `size` x `size` square anchored at the origin
    pub fn square(size: i64) -> Self {
        Self::new(0, size, 0, size)
    }

    pub fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i64 {
        self.max_y - self.min_y
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Bounds) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    /// The smallest rectangle enclosing every input
    ///
    /// # Errors
    /// [`ShapeError::EmptyBounds`] if `bounds` yields nothing.
    pub fn encompass<I>(bounds: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Bounds>,
    {
        let mut iter = bounds.into_iter();
        let first = iter.next().ok_or(ShapeError::EmptyBounds)?;

        Ok(iter.fold(first, |acc, b| Bounds {
            min_x: acc.min_x.min(b.min_x),
            max_x: acc.max_x.max(b.max_x),
            min_y: acc.min_y.min(b.min_y),
            max_y: acc.max_y.max(b.max_y),
        }))
    }
}
