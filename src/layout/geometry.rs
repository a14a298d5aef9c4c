use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::spec::LayoutSpec;

/// Largest surface side the CPU rasterizer accepts.
pub const MAX_SURFACE_DIM: u32 = u16::MAX as u32;

/// Zero-based grid address of a photo slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    /// Row index.
    pub row: u32,
    /// Column index.
    pub col: u32,
}

/// Row-major slot for photo `index` in a grid with `cols` columns.
pub fn grid_cell(index: usize, cols: u32) -> GridCell {
    let cols = cols.max(1) as usize;
    GridCell {
        row: (index / cols) as u32,
        col: (index % cols) as u32,
    }
}

/// Resolved sizes for one layout at one export width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeGeometry {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Spacing between cells.
    pub gap: f64,
    /// Outer margin.
    pub padding: f64,
    /// Width of one photo cell.
    pub cell_width: f64,
    /// Height of one photo cell.
    pub cell_height: f64,
    /// Height of the grid area including padding.
    pub content_height: f64,
    /// Exact export width.
    pub export_width: f64,
    /// Exact export height (`content_height + branding reserve`).
    pub export_height: f64,
    /// Pixel width of the output surface.
    pub surface_width: u32,
    /// Pixel height of the output surface (`floor(export_height)`).
    pub surface_height: u32,
}

impl CompositeGeometry {
    /// Size a layout for the given export width and branding band.
    pub fn compute(
        layout: &LayoutSpec,
        export_width: u32,
        branding_reserve: f64,
    ) -> BoothResult<Self> {
        layout.validate()?;
        if export_width == 0 || export_width > MAX_SURFACE_DIM {
            return Err(BoothError::configuration(format!(
                "export width must be in 1..={MAX_SURFACE_DIM}, got {export_width}"
            )));
        }
        if !branding_reserve.is_finite() || branding_reserve < 0.0 {
            return Err(BoothError::configuration(format!(
                "branding reserve must be finite and >= 0, got {branding_reserve}"
            )));
        }

        let rows = f64::from(layout.rows);
        let cols = f64::from(layout.cols);
        let width = f64::from(export_width);

        let available_w = width - 2.0 * layout.padding - (cols - 1.0) * layout.gap;
        let cell_width = available_w / cols;
        let cell_height = cell_width / layout.aspect_ratio;
        if !(cell_width > 0.0) || !(cell_height > 0.0) || !cell_height.is_finite() {
            return Err(BoothError::configuration(format!(
                "layout '{}': padding and gaps leave no room for cells at width {export_width} \
                 (cell {cell_width:.3}x{cell_height:.3})",
                layout.id
            )));
        }

        let content_height = rows * cell_height + (rows - 1.0) * layout.gap + 2.0 * layout.padding;
        let export_height = content_height + branding_reserve;
        let surface_height = export_height.floor();
        if !(surface_height >= 1.0) || surface_height > f64::from(MAX_SURFACE_DIM) {
            return Err(BoothError::configuration(format!(
                "layout '{}': export height {export_height:.1} exceeds the surface limit \
                 {MAX_SURFACE_DIM}",
                layout.id
            )));
        }

        Ok(Self {
            rows: layout.rows,
            cols: layout.cols,
            gap: layout.gap,
            padding: layout.padding,
            cell_width,
            cell_height,
            content_height,
            export_width: width,
            export_height,
            surface_width: export_width,
            surface_height: surface_height as u32,
        })
    }

    /// Number of photo slots.
    pub fn capacity(&self) -> usize {
        (self.rows as usize).saturating_mul(self.cols as usize)
    }

    /// Top-left corner of slot `index`.
    pub fn cell_origin(&self, index: usize) -> Point {
        let GridCell { row, col } = grid_cell(index, self.cols);
        Point::new(
            self.padding + f64::from(col) * (self.cell_width + self.gap),
            self.padding + f64::from(row) * (self.cell_height + self.gap),
        )
    }

    /// Target box of slot `index`.
    pub fn cell_rect(&self, index: usize) -> Rect {
        let o = self.cell_origin(index);
        Rect::new(o.x, o.y, o.x + self.cell_width, o.y + self.cell_height)
    }

    /// Absolute position of a canvas-relative anchor on the output surface.
    pub fn canvas_point(&self, x_frac: f64, y_frac: f64) -> Point {
        Point::new(
            x_frac * f64::from(self.surface_width),
            y_frac * f64::from(self.surface_height),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
