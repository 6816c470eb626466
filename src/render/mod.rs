//! Render module - turning generators into cells and cells into images
//!
//! This module provides:
//! - Rasterization of a generator set into a boolean cell grid
//! - SVG rendering of that grid with midline colouring and grid lines
//! - PNG export of the same layout

pub mod palette;
mod png;
mod raster;
mod svg;

pub use png::{save_png, to_image};
pub use raster::{rasterize, Raster, Stats};
pub use svg::{to_svg, SvgRenderer, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
