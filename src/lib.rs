//! shape-grid - plan circles and stars block by block
//!
//! Shapes are described by *generators* that answer, cell by cell, whether
//! a grid position is part of the shape. Several generators are composited
//! on one grid by OR-ing their answers, and the result can be counted,
//! rendered to SVG, or exported as PNG.
//!
//! ```
//! use shape_grid::render::rasterize;
//! use shape_grid::shapes::{Circle, Generator, Star};
//!
//! let ring = Circle::with_params(32.0, 2.0);
//! let star = Star::with_params(32.0, 1.0, 5);
//! let raster = rasterize([&ring as &dyn Generator, &star]).unwrap();
//! println!("{}", raster.stats());
//! ```

pub mod error;
pub mod render;
pub mod settings;
pub mod shapes;

pub use error::{ExportError, SettingsError, ShapeError};
