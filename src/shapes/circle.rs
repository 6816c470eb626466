//! Ring / disc generator
//!
//! A circle of a given diameter, drawn either as an annulus of a chosen
//! thickness, a solid disc, or a one-cell outline.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::settings::StateItem;

use super::bounds::Bounds;
use super::controls::{Control, ControlValue, Controllable};
use super::events::ChangeEmitter;
use super::math::distance;
use super::traits::{frame_to_local, Generator};
use super::clamp_size;

/// How the ring's cells are chosen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingMode {
    /// Cells between `radius - thickness` and `radius`
    #[default]
    Thickness,
    /// Every cell inside the radius
    Filled,
    /// Outline cells with an empty neighbour in any of 8 directions
    Thick,
    /// Outline cells with an empty neighbour in one of the 4 axis directions
    Thin,
}

impl RingMode {
    pub const ALL: &[RingMode] = &[
        RingMode::Thickness,
        RingMode::Filled,
        RingMode::Thick,
        RingMode::Thin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RingMode::Thickness => "thickness",
            RingMode::Filled => "filled",
            RingMode::Thick => "thick",
            RingMode::Thin => "thin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

const AXIS_NEIGHBOURS: [(f64, f64); 4] = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];
const DIAGONAL_NEIGHBOURS: [(f64, f64); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)];

/// A ring centered in its frame
#[derive(Debug)]
pub struct Circle {
    state: StateItem,
    change: ChangeEmitter,

    size: u32,
    thickness: f64,
    mode: RingMode,

    /// Always `size / 2`
    radius: f64,
}

impl Circle {
    /// Create a ring from the `size`, `thickness` and `mode` stored in `state`
    pub fn new(state: StateItem) -> Self {
        let size = clamp_size(state.get_or("size", 32.0));
        let thickness = state.get_or("thickness", 1.0_f64).max(0.0);
        let mode = state.get_or("mode", RingMode::default());

        Self {
            state,
            change: ChangeEmitter::new(),
            size,
            thickness,
            mode,
            radius: size as f64 / 2.0,
        }
    }

    /// Create a ring with explicit parameters and private state
    pub fn with_params(size: f64, thickness: f64) -> Self {
        let mut circle = Self::new(StateItem::detached("circle"));
        circle.set_size(size);
        circle.set_thickness(thickness);
        circle
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mode(&self) -> RingMode {
        self.mode
    }

    /// Set the diameter, clamped to `0..=2000`
    pub fn set_size(&mut self, size: f64) {
        self.size = clamp_size(size);
        self.radius = self.size as f64 / 2.0;
        self.state.set("size", self.size);
    }

    /// Set the ring width; negative values clamp to zero
    pub fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness.max(0.0);
        self.state.set("thickness", self.thickness);
    }

    pub fn set_mode(&mut self, mode: RingMode) {
        self.mode = mode;
        self.state.set("mode", mode);
    }

    fn disc(&self, x: f64, y: f64) -> bool {
        distance(x, y) <= self.radius
    }

    fn has_empty_neighbour(&self, x: f64, y: f64, diagonals: bool) -> bool {
        let axis = AXIS_NEIGHBOURS.iter();
        let diag = DIAGONAL_NEIGHBOURS.iter().filter(|_| diagonals);
        axis.chain(diag).any(|(dx, dy)| !self.disc(x + dx, y + dy))
    }

    /// Membership in local, centered coordinates
    pub fn contains_local(&self, x: f64, y: f64) -> bool {
        match self.mode {
            RingMode::Filled => self.disc(x, y),
            RingMode::Thick => self.disc(x, y) && self.has_empty_neighbour(x, y, true),
            RingMode::Thin => self.disc(x, y) && self.has_empty_neighbour(x, y, false),
            RingMode::Thickness => {
                if self.thickness <= 0.0 || self.thickness >= self.radius {
                    return self.disc(x, y);
                }
                let d = distance(x, y);
                d <= self.radius && !(d <= self.radius - self.thickness)
            }
        }
    }
}

impl Generator for Circle {
    fn bounds(&self) -> Bounds {
        Bounds::square(self.size as i64)
    }

    fn is_filled(&self, x: i64, y: i64, frame: &Bounds) -> bool {
        let (lx, ly) = frame_to_local(x, y, frame);
        self.contains_local(lx, ly)
    }
}

impl Controllable for Circle {
    fn controls(&self) -> Vec<Control> {
        vec![
            Control::number("Shape", "size", self.size as f64),
            Control::range(
                "Shape",
                "thickness",
                self.thickness,
                0.0,
                self.radius.max(0.5),
                0.5,
            ),
            Control::select(
                "Render",
                "border",
                RingMode::ALL.iter().map(RingMode::name).collect(),
                self.mode.name(),
            ),
        ]
    }

    fn apply_control(&mut self, label: &str, value: ControlValue) -> Result<(), ShapeError> {
        match label {
            "size" => self.set_size(value.as_number(label)?),
            "thickness" => self.set_thickness(value.as_number(label)?),
            "border" | "mode" => {
                let name = value.as_choice(label)?;
                let mode = RingMode::from_name(name).ok_or_else(|| ShapeError::InvalidControlValue {
                    control: label.to_string(),
                    expected: "ring mode",
                })?;
                self.set_mode(mode);
            }
            _ => return Err(ShapeError::UnknownControl(label.to_string())),
        }
        self.change.trigger();
        Ok(())
    }

    fn change_emitter(&self) -> &ChangeEmitter {
        &self.change
    }
}
