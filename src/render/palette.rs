//! Cell layout and colours shared by the SVG and PNG renderers
//!
//! Each cell is a 5px square followed by a 1px grid line, so cell `col`
//! starts at `6 * col + 4` and grid lines sit at `6 * n + 3`. The image is
//! one pitch larger than the grid in each direction to leave a margin.

/// Side of a drawn cell in pixels
pub const CELL_SIZE: u32 = 5;
/// Width of a grid line in pixels
pub const BORDER_SIZE: u32 = 1;
/// Distance between neighbouring cells
pub const CELL_PITCH: u32 = CELL_SIZE + BORDER_SIZE;
/// Grid lines at multiples of this offset are drawn darker
pub const MAJOR_GRID_INTERVAL: u32 = 32;
/// Grid line opacity
pub const GRID_OPACITY: f64 = 0.6;

/// An sRGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// `#RRGGBB`
    pub fn hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Mix `self` over `under` at `alpha`
    pub fn blend_over(&self, under: Rgb, alpha: f64) -> Rgb {
        let mix = |top: u8, bottom: u8| {
            (top as f64 * alpha + bottom as f64 * (1.0 - alpha)).round() as u8
        };
        let [r, g, b] = self.0;
        let [ur, ug, ub] = under.0;
        Rgb([mix(r, ur), mix(g, ug), mix(b, ub)])
    }
}

pub const BACKGROUND: Rgb = Rgb([0xFF, 0xFF, 0xFF]);
pub const FILLED: Rgb = Rgb([0xFF, 0x00, 0x00]);
pub const FILLED_MIDLINE: Rgb = Rgb([0x80, 0x80, 0x80]);
pub const MIDLINE_LIGHT: Rgb = Rgb([0xEE, 0xEE, 0xEE]);
pub const MIDLINE_LIGHTER: Rgb = Rgb([0xF8, 0xF8, 0xF8]);
pub const GRID_MINOR: Rgb = Rgb([0xBB, 0xBB, 0xBB]);
pub const GRID_MAJOR: Rgb = Rgb([0x25, 0x25, 0x25]);

/// Image size in pixels for a grid of `width` x `height` cells
pub fn image_size(width: usize, height: usize) -> (u32, u32) {
    (
        CELL_PITCH * (width as u32 + 1),
        CELL_PITCH * (height as u32 + 1),
    )
}

/// Whether (col, row) lies on the grid's vertical or horizontal center line
///
/// Only grids with an odd extent have a center line.
pub fn on_midline(col: usize, row: usize, width: usize, height: usize) -> bool {
    let mid_x = width as f64 / 2.0 - 0.5;
    let mid_y = height as f64 / 2.0 - 0.5;
    col as f64 == mid_x || row as f64 == mid_y
}

/// The colour to draw cell (col, row) with, or `None` to leave it blank
pub fn cell_color(
    col: usize,
    row: usize,
    width: usize,
    height: usize,
    filled: bool,
) -> Option<Rgb> {
    let midline = on_midline(col, row, width, height);
    match (filled, midline) {
        (true, true) => Some(FILLED_MIDLINE),
        (true, false) => Some(FILLED),
        (false, true) if (col & 1) ^ (row & 1) == 1 => Some(MIDLINE_LIGHT),
        (false, true) => Some(MIDLINE_LIGHTER),
        (false, false) => None,
    }
}

/// Colour of the grid line starting `offset` pixels into the image
pub fn grid_color(offset: u32) -> Rgb {
    if offset % MAJOR_GRID_INTERVAL == 0 {
        GRID_MAJOR
    } else {
        GRID_MINOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(FILLED.hex(), "#FF0000");
        assert_eq!(GRID_MINOR.hex(), "#BBBBBB");
    }

    #[test]
    fn test_blend() {
        let grey = Rgb([0, 0, 0]).blend_over(BACKGROUND, 0.5);
        assert_eq!(grey, Rgb([128, 128, 128]));
        assert_eq!(FILLED.blend_over(BACKGROUND, 1.0), FILLED);
    }

    #[test]
    fn test_midline_only_for_odd_extent() {
        assert!(on_midline(2, 0, 5, 4));
        assert!(!on_midline(1, 0, 4, 4));
        assert!(on_midline(0, 3, 4, 7));
    }

    #[test]
    fn test_cell_color() {
        assert_eq!(cell_color(0, 0, 5, 5, true), Some(FILLED));
        assert_eq!(cell_color(2, 0, 5, 5, true), Some(FILLED_MIDLINE));
        assert_eq!(cell_color(2, 1, 5, 5, false), Some(MIDLINE_LIGHT));
        assert_eq!(cell_color(2, 0, 5, 5, false), Some(MIDLINE_LIGHTER));
        assert_eq!(cell_color(0, 0, 5, 5, false), None);
    }

    #[test]
    fn test_grid_color() {
        assert_eq!(grid_color(0), GRID_MAJOR);
        assert_eq!(grid_color(6), GRID_MINOR);
        assert_eq!(grid_color(96), GRID_MAJOR);
    }
}
