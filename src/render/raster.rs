//! Rasterization - sample generators onto the cell grid
//!
//! Every cell of the union frame is visited exactly once, each generator is
//! asked whether it covers that cell, and the answers are OR-ed together.
//! Cost is O(width x height x generators); there is no incremental update,
//! callers simply rasterize again after a change.

use std::fmt;

use crate::error::ShapeError;
use crate::shapes::{Bounds, Generator};

/// Block counts derived from a raster
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    /// Number of filled cells
    pub blocks: usize,
    /// `blocks / 64`
    pub stacks_of_64: f64,
    /// `blocks / 16`
    pub stacks_of_16: f64,
}

impl Stats {
    pub fn from_count(blocks: usize) -> Self {
        Self {
            blocks,
            stacks_of_64: blocks as f64 / 64.0,
            stacks_of_16: blocks as f64 / 16.0,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "blocks: {}, stacks of 64: {:.1}, stacks of 16: {:.1}",
            self.blocks, self.stacks_of_64, self.stacks_of_16
        )
    }
}

/// The filled/empty state of every cell in a frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    frame: Bounds,
    width: usize,
    height: usize,
    /// Row-major, `width * height` cells
    cells: Vec<bool>,
    filled_count: usize,
}

impl Raster {
    /// The union bounds this raster covers
    pub fn frame(&self) -> Bounds {
        self.frame
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn filled_count(&self) -> usize {
        self.filled_count
    }

    pub fn stats(&self) -> Stats {
        Stats::from_count(self.filled_count)
    }

    /// Whether the cell at absolute (x, y) is filled; false outside the frame
    pub fn get(&self, x: i64, y: i64) -> bool {
        let frame = &self.frame;
        if x < frame.min_x || x >= frame.max_x || y < frame.min_y || y >= frame.max_y {
            return false;
        }
        let col = (x - frame.min_x) as usize;
        let row = (y - frame.min_y) as usize;
        self.cells[row * self.width + col]
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// One slice per row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width.max(1))
    }

    /// `(x, y, filled)` for every cell in absolute coordinates
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, bool)> + '_ {
        let frame = self.frame;
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, &filled)| {
            let x = frame.min_x + (i % width) as i64;
            let y = frame.min_y + (i / width) as i64;
            (x, y, filled)
        })
    }
}

/// Rasterize the union of `generators`
///
/// The frame is the union of every generator's bounds. Order does not affect
/// the result.
///
/// # Errors
/// [`ShapeError::EmptyBounds`] if no generators are given.
pub fn rasterize<'a, G, I>(generators: I) -> Result<Raster, ShapeError>
where
    G: Generator + ?Sized + 'a,
    I: IntoIterator<Item = &'a G>,
{
    let generators: Vec<&G> = generators.into_iter().collect();
    let frame = Bounds::encompass(generators.iter().map(|g| g.bounds()))?;

    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let mut cells = Vec::with_capacity(width * height);
    let mut filled_count = 0;

    for y in frame.min_y..frame.max_y {
        for x in frame.min_x..frame.max_x {
            let filled = generators.iter().any(|g| g.is_filled(x, y, &frame));
            if filled {
                filled_count += 1;
            }
            cells.push(filled);
        }
    }

    log::debug!(
        "Rasterized {} generator(s) over {}x{}: {} filled",
        generators.len(),
        width,
        height,
        filled_count
    );

    Ok(Raster {
        frame,
        width,
        height,
        cells,
        filled_count,
    })
}
