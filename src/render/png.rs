//! PNG export
//!
//! Draws the same cell layout as the SVG renderer straight into a pixel
//! buffer, so no SVG rasterizer is needed.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::ExportError;

use super::palette::{
    cell_color, grid_color, image_size, Rgb, BACKGROUND, CELL_PITCH, CELL_SIZE, GRID_OPACITY,
};
use super::raster::Raster;

/// Pixel offset of the first cell; grid lines sit one pixel before each cell
const CELL_OFFSET: u32 = CELL_PITCH / 2 + 1;

/// Images above this many pixels (4096 x 4096) log a memory warning
const LARGE_IMAGE_PIXELS: u64 = 1 << 24;

fn is_large(img_width: u32, img_height: u32) -> bool {
    img_width as u64 * img_height as u64 > LARGE_IMAGE_PIXELS
}

fn rgba(color: Rgb) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, 255])
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb) {
    let x1 = (x0 + w).min(img.width());
    let y1 = (y0 + h).min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, rgba(color));
        }
    }
}

fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Rgb) {
    let Rgba([r, g, b, _]) = *img.get_pixel(x, y);
    let mixed = color.blend_over(Rgb([r, g, b]), GRID_OPACITY);
    img.put_pixel(x, y, rgba(mixed));
}

/// Draw `raster` as an image: white background, coloured cells, grid lines
///
/// The buffer is 4 bytes per pixel at 6px per cell, so a 2000 x 2000 grid
/// needs about 576 MB.
pub fn to_image(raster: &Raster) -> RgbaImage {
    let (width, height) = (raster.width(), raster.height());
    let (img_width, img_height) = image_size(width, height);
    if is_large(img_width, img_height) {
        log::warn!(
            "Drawing a {}x{} PNG ({} MB in memory)",
            img_width,
            img_height,
            img_width as u64 * img_height as u64 * 4 / 1_000_000
        );
    }
    let mut img = RgbaImage::from_pixel(img_width, img_height, rgba(BACKGROUND));

    for (row, cells) in raster.rows().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            if let Some(color) = cell_color(col, row, width, height, filled) {
                let x0 = col as u32 * CELL_PITCH + CELL_OFFSET;
                let y0 = row as u32 * CELL_PITCH + CELL_OFFSET;
                fill_rect(&mut img, x0, y0, CELL_SIZE, CELL_SIZE, color);
            }
        }
    }

    let line_offset = CELL_OFFSET - 1;
    for offset in (0..img_width).step_by(CELL_PITCH as usize) {
        let x = offset + line_offset;
        if x < img_width {
            for y in 0..img_height {
                blend_pixel(&mut img, x, y, grid_color(offset));
            }
        }
    }
    for offset in (0..img_height).step_by(CELL_PITCH as usize) {
        let y = offset + line_offset;
        if y < img_height {
            for x in 0..img_width {
                blend_pixel(&mut img, x, y, grid_color(offset));
            }
        }
    }

    img
}

/// Render `raster` and save it as a PNG at `path`
pub fn save_png(raster: &Raster, path: &Path) -> Result<(), ExportError> {
    let img = to_image(raster);
    img.save_with_format(path, image::ImageFormat::Png)?;
    log::info!(
        "Wrote {}x{} PNG to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palette::{FILLED, FILLED_MIDLINE};
    use crate::render::rasterize;
    use crate::shapes::{Circle, RingMode};

    fn disc(size: f64) -> Raster {
        let mut circle = Circle::with_params(size, 0.0);
        circle.set_mode(RingMode::Filled);
        rasterize([&circle]).unwrap()
    }

    #[test]
    fn test_image_size() {
        let img = to_image(&disc(9.0));
        assert_eq!(img.dimensions(), (60, 60));
    }

    #[test]
    fn test_cells_are_drawn() {
        let raster = disc(9.0);
        let img = to_image(&raster);

        // Center cell (4, 4) is on both midlines
        let center = 4 * CELL_PITCH + CELL_OFFSET + 2;
        assert_eq!(*img.get_pixel(center, center), rgba(FILLED_MIDLINE));

        // Cell (3, 3) is filled and off the midlines
        let inner = 3 * CELL_PITCH + CELL_OFFSET + 2;
        assert_eq!(*img.get_pixel(inner, inner), rgba(FILLED));

        // Corner cell (0, 0) lies outside the disc
        let corner = CELL_OFFSET + 2;
        assert_eq!(*img.get_pixel(corner, corner), rgba(BACKGROUND));
    }

    #[test]
    fn test_large_image_threshold() {
        assert!(!is_large(4096, 4096));
        assert!(is_large(4097, 4096));
        // The largest grid the size clamp allows
        let (w, h) = image_size(2000, 2000);
        assert_eq!((w, h), (12006, 12006));
        assert!(is_large(w, h));
    }

    #[test]
    fn test_grid_lines_are_blended() {
        let img = to_image(&disc(9.0));
        let Rgba([r, g, b, a]) = *img.get_pixel(CELL_OFFSET - 1, 30);
        assert_eq!(a, 255);
        assert!(r < 255 && r == g && g == b);
    }
}
