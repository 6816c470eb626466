//! Star polygon generator
//!
//! Draws the star polygon {n/k}: `n` points spaced evenly on a circle, each
//! joined to the point `k` steps further round. `k` is picked from `n` so the
//! supported range (3 to 9 points) always looks like a pointed star.
//!
//! When `n` and `k` share a factor the jumps never visit every point from a
//! single start; the polygon then splits into `gcd(n, k)` separate cycles
//! (8 points with a jump of 2 gives two overlapping squares).

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::ShapeError;
use crate::settings::StateItem;

use super::bounds::Bounds;
use super::clamp_size;
use super::controls::{Control, ControlValue, Controllable};
use super::events::ChangeEmitter;
use super::math::{distance, gcd, Line};
use super::traits::{frame_to_local, Generator};

pub const MIN_POINTS: u32 = 3;
pub const MAX_POINTS: u32 = 9;

/// A stroked star centered in its frame
#[derive(Debug)]
pub struct Star {
    state: StateItem,
    change: ChangeEmitter,

    size: u32,
    /// Maximum distance from a line for a cell to count as stroked
    thickness: f64,
    points: u32,

    // Derived from size and points, rebuilt eagerly by the setters
    radius: f64,
    point_jump: u32,
    cycles: Vec<Vec<usize>>,
    lines: Vec<Line>,
}

impl Star {
    /// Create a star from the `size`, `thickness` and `points` stored in `state`
    pub fn new(state: StateItem) -> Self {
        let size = clamp_size(state.get_or("size", 32.0));
        let thickness = state.get_or("thickness", 1.0_f64).max(0.0);
        let points = clamp_points(state.get_or("points", 5.0));

        let mut star = Self {
            state,
            change: ChangeEmitter::new(),
            size,
            thickness,
            points,
            radius: size as f64 / 2.0,
            point_jump: point_jump(points),
            cycles: Vec::new(),
            lines: Vec::new(),
        };
        star.generate_lines();
        star
    }

    /// Create a star with explicit parameters and private state
    pub fn with_params(size: f64, thickness: f64, points: u32) -> Self {
        let mut star = Self::new(StateItem::detached("star"));
        star.set_size(size);
        star.set_thickness(thickness);
        star.set_points(points as f64);
        star
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn point_jump(&self) -> u32 {
        self.point_jump
    }

    /// The traced point-index cycles, one `Vec` per closed loop
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// The cached stroke lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Set the diameter, clamped to `0..=2000`
    pub fn set_size(&mut self, size: f64) {
        self.size = clamp_size(size);
        self.radius = self.size as f64 / 2.0;
        self.state.set("size", self.size);
        self.generate_lines();
    }

    /// Set the stroke threshold; negative values clamp to zero
    pub fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness.max(0.0);
        self.state.set("thickness", self.thickness);
    }

    /// Set the number of points, clamped to `3..=9`
    pub fn set_points(&mut self, points: f64) {
        self.points = clamp_points(points);
        self.point_jump = point_jump(self.points);
        self.state.set("points", self.points);
        self.generate_lines();
    }

    fn generate_lines(&mut self) {
        let n = self.points as usize;
        self.cycles = trace_cycles(n, self.point_jump as usize);
        self.lines.clear();

        if self.radius <= 0.0 {
            log::debug!("Star has zero radius, no lines to draw");
            return;
        }

        let vertices = points_on_circle(n, self.radius);
        for cycle in &self.cycles {
            let edges = cycle.iter().zip(cycle.iter().cycle().skip(1));
            for (&from, &to) in edges {
                match Line::through(vertices[from], vertices[to]) {
                    Ok(line) => self.lines.push(line),
                    Err(e) => log::warn!("Skipping star edge {} -> {}: {}", from, to, e),
                }
            }
        }

        log::debug!(
            "Star {{{}/{}}}: {} cycle(s), {} line(s)",
            n,
            self.point_jump,
            self.cycles.len(),
            self.lines.len()
        );
    }

    /// Membership in local, centered coordinates
    pub fn contains_local(&self, x: f64, y: f64) -> bool {
        distance(x, y) < self.radius
            && self
                .lines
                .iter()
                .any(|line| line.distance_to(x, y) < self.thickness)
    }
}

fn clamp_points(points: f64) -> u32 {
    if points.is_nan() {
        return MIN_POINTS;
    }
    points.round().clamp(MIN_POINTS as f64, MAX_POINTS as f64) as u32
}

/// The step between joined points: `ceil(points / 4)`
fn point_jump(points: u32) -> u32 {
    points.div_ceil(4)
}

/// `n` points on a circle, starting at the top and going clockwise
/// (y grows downwards on the grid)
fn points_on_circle(n: usize, radius: f64) -> Vec<(f64, f64)> {
    let interval = TAU / n as f64;
    (0..n)
        .map(|i| {
            let angle = i as f64 * interval - FRAC_PI_2;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Split `0..n` into the cycles produced by repeatedly stepping `jump`
///
/// Each point appears in exactly one cycle, in visiting order.
fn trace_cycles(n: usize, jump: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let jump = jump % n;
    if jump == 0 {
        return (0..n).map(|i| vec![i]).collect();
    }

    (0..gcd(n, jump))
        .map(|start| {
            let mut cycle = vec![start];
            let mut index = (start + jump) % n;
            while index != start {
                cycle.push(index);
                index = (index + jump) % n;
            }
            cycle
        })
        .collect()
}

impl Generator for Star {
    fn bounds(&self) -> Bounds {
        Bounds::square(self.size as i64)
    }

    fn is_filled(&self, x: i64, y: i64, frame: &Bounds) -> bool {
        let (lx, ly) = frame_to_local(x, y, frame);
        self.contains_local(lx, ly)
    }
}

impl Controllable for Star {
    fn controls(&self) -> Vec<Control> {
        vec![
            Control::number("Star", "size", self.size as f64),
            Control::number("Star", "thickness", self.thickness),
            Control::range(
                "Star",
                "points",
                self.points as f64,
                MIN_POINTS as f64,
                MAX_POINTS as f64,
                1.0,
            ),
        ]
    }

    fn apply_control(&mut self, label: &str, value: ControlValue) -> Result<(), ShapeError> {
        match label {
            "size" => self.set_size(value.as_number(label)?),
            "thickness" => self.set_thickness(value.as_number(label)?),
            "points" => self.set_points(value.as_number(label)?),
            _ => return Err(ShapeError::UnknownControl(label.to_string())),
        }
        self.change.trigger();
        Ok(())
    }

    fn change_emitter(&self) -> &ChangeEmitter {
        &self.change
    }
}
