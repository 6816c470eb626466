//! SVG renderer
//!
//! Turns a [`Raster`] into an SVG document: one `<rect>` per visible cell
//! plus a 1px grid. The document's intrinsic size follows the cell layout in
//! [`palette`](super::palette); its displayed size follows `scale`, with the
//! height derived from the aspect ratio.

use std::path::Path;

use crate::error::{ExportError, ShapeError};
use crate::settings::StateItem;
use crate::shapes::{ChangeEmitter, Control, ControlValue, Controllable};

use super::palette::{
    cell_color, grid_color, image_size, BORDER_SIZE, CELL_PITCH, CELL_SIZE, GRID_OPACITY,
};
use super::raster::Raster;

pub const MIN_SCALE: f64 = 50.0;
pub const MAX_SCALE: f64 = 3000.0;
pub const DEFAULT_SCALE: f64 = 544.0;

/// Renders rasters to SVG and keeps the last one for export
#[derive(Debug)]
pub struct SvgRenderer {
    state: StateItem,
    change: ChangeEmitter,
    /// Displayed width in px
    scale: f64,
    last: Option<Raster>,
}

impl SvgRenderer {
    /// Create a renderer using the `scale` stored in `state`
    pub fn new(state: StateItem) -> Self {
        let scale = clamp_scale(state.get_or("scale", DEFAULT_SCALE));
        Self {
            state,
            change: ChangeEmitter::new(),
            scale,
            last: None,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the displayed width, clamped to `50..=3000`
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
        self.state.set("scale", self.scale);
    }

    /// Render `raster` and remember it for [`document`](Self::document)
    pub fn render(&mut self, raster: &Raster) -> String {
        self.last = Some(raster.clone());
        to_svg(raster, self.scale)
    }

    /// The last rendered raster at the current scale
    pub fn document(&self) -> Option<String> {
        self.last.as_ref().map(|r| to_svg(r, self.scale))
    }

    /// Write the last rendered document to `path`
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let svg = self.document().ok_or(ExportError::NothingRendered)?;
        std::fs::write(path, svg)?;
        log::info!("Wrote SVG to {}", path.display());
        Ok(())
    }
}

impl Controllable for SvgRenderer {
    fn controls(&self) -> Vec<Control> {
        vec![Control::range("Render", "scale", self.scale, MIN_SCALE, MAX_SCALE, 1.0)]
    }

    fn apply_control(&mut self, label: &str, value: ControlValue) -> Result<(), ShapeError> {
        match label {
            "scale" => self.set_scale(value.as_number(label)?),
            _ => return Err(ShapeError::UnknownControl(label.to_string())),
        }
        self.change.trigger();
        Ok(())
    }

    fn change_emitter(&self) -> &ChangeEmitter {
        &self.change
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return DEFAULT_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Build the SVG document for `raster`, displayed `scale` px wide
pub fn to_svg(raster: &Raster, scale: f64) -> String {
    let (width, height) = (raster.width(), raster.height());
    let (svg_width, svg_height) = image_size(width, height);
    let aspect = svg_height as f64 / svg_width as f64;
    let half_pitch = CELL_PITCH as f64 / 2.0;

    let mut text = format!(
        r#"<svg id="shape_grid" xmlns="http://www.w3.org/2000/svg" data-w="{w}" data-h="{h}" width="{sw}px" height="{sh}px" viewBox="0 0 {w} {h}">"#,
        w = svg_width,
        h = svg_height,
        sw = scale,
        sh = scale * aspect,
    );

    let frame = raster.frame();
    for (row, cells) in raster.rows().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            let Some(color) = cell_color(col, row, width, height, filled) else {
                continue;
            };
            let xp = (col + 1) as f64 * CELL_PITCH as f64 - half_pitch + 0.5;
            let yp = (row + 1) as f64 * CELL_PITCH as f64 - half_pitch + 0.5;
            text.push_str(&format!(
                r#"<rect x="{}" y="{}" fill="{}" width="{}" height="{}" class="{}" data-x="{}" data-y="{}"/>"#,
                xp,
                yp,
                color.hex(),
                CELL_SIZE,
                CELL_SIZE,
                if filled { "filled" } else { "" },
                frame.min_x + col as i64,
                frame.min_y + row as i64,
            ));
        }
    }

    let line_offset = CELL_SIZE as f64 / 2.0;
    for ix in (0..svg_width).step_by(CELL_PITCH as usize) {
        text.push_str(&format!(
            r#"<rect x="{}" y="0" fill="{}" width="{}" height="{}" opacity="{}"/>"#,
            ix as f64 + line_offset,
            grid_color(ix).hex(),
            BORDER_SIZE,
            svg_height,
            GRID_OPACITY,
        ));
    }
    for iy in (0..svg_height).step_by(CELL_PITCH as usize) {
        text.push_str(&format!(
            r#"<rect x="0" y="{}" fill="{}" width="{}" height="{}" opacity="{}"/>"#,
            iy as f64 + line_offset,
            grid_color(iy).hex(),
            svg_width,
            BORDER_SIZE,
            GRID_OPACITY,
        ));
    }

    text.push_str("</svg>");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rasterize;
    use crate::shapes::{Circle, RingMode};

    fn disc(size: f64) -> Raster {
        let mut circle = Circle::with_params(size, 0.0);
        circle.set_mode(RingMode::Filled);
        rasterize([&circle]).unwrap()
    }

    #[test]
    fn test_document_size() {
        let svg = to_svg(&disc(9.0), 544.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"data-w="60" data-h="60""#));
        assert!(svg.contains(r#"width="544px" height="544px""#));
    }

    #[test]
    fn test_one_rect_per_filled_cell() {
        let raster = disc(10.0);
        let svg = to_svg(&raster, 300.0);
        assert_eq!(svg.matches(r#"class="filled""#).count(), raster.filled_count());
    }

    #[test]
    fn test_midline_cells_are_grey() {
        // Odd size has a center column and row
        let svg = to_svg(&disc(9.0), 300.0);
        assert!(svg.contains(r##"x="27.5" y="27.5" fill="#808080""##));
    }

    #[test]
    fn test_grid_lines() {
        let svg = to_svg(&disc(9.0), 300.0);
        // 60px image, one line every 6px in each direction
        assert_eq!(svg.matches(r#"opacity="0.6""#).count(), 20);
        assert!(svg.contains(r##"x="2.5" y="0" fill="#252525""##));
    }

    #[test]
    fn test_scale_is_clamped_and_stored() {
        let state = StateItem::detached("svg");
        let mut renderer = SvgRenderer::new(state.clone());
        assert_eq!(renderer.scale(), DEFAULT_SCALE);

        renderer.apply_control("scale", ControlValue::Number(10.0)).unwrap();
        assert_eq!(renderer.scale(), MIN_SCALE);
        assert_eq!(state.get::<f64>("scale"), Some(MIN_SCALE));
    }

    #[test]
    fn test_document_follows_scale() {
        let mut renderer = SvgRenderer::new(StateItem::detached("svg"));
        assert!(renderer.document().is_none());

        renderer.render(&disc(9.0));
        renderer.set_scale(1000.0);
        let svg = renderer.document().unwrap();
        assert!(svg.contains(r#"width="1000px""#));
    }
}
