use super::*;
use crate::foundation::core::Rgba8;

fn layout(rows: u32, cols: u32, gap: f64, padding: f64, aspect_ratio: f64) -> LayoutSpec {
    LayoutSpec {
        id: "t".to_owned(),
        name: String::new(),
        rows,
        cols,
        gap,
        padding,
        bg_color: Rgba8::WHITE,
        aspect_ratio,
        decorations: vec![],
    }
}

#[test]
fn grid_cell_is_row_major() {
    assert_eq!(grid_cell(4, 3), GridCell { row: 1, col: 1 });
    assert_eq!(grid_cell(0, 3), GridCell { row: 0, col: 0 });
    assert_eq!(grid_cell(5, 3), GridCell { row: 1, col: 2 });
    assert_eq!(grid_cell(3, 1), GridCell { row: 3, col: 0 });
}

#[test]
fn strip_of_four_sizes_match_reference_math() {
    let g = CompositeGeometry::compute(&layout(4, 1, 20.0, 50.0, 4.0 / 3.0), 1200, 100.0).unwrap();
    assert_eq!(g.cell_width, 1100.0);
    assert!((g.cell_height - 825.0).abs() < 1e-9);
    assert!((g.content_height - (4.0 * 825.0 + 3.0 * 20.0 + 100.0)).abs() < 1e-9);
    assert_eq!(g.surface_width, 1200);
    assert_eq!(g.surface_height, 3560);
}

#[test]
fn surface_height_truncates_fractional_export_height() {
    let g = CompositeGeometry::compute(&layout(1, 3, 15.0, 40.0, 1.5), 1200, 100.0).unwrap();
    assert!((g.cell_width - 1090.0 / 3.0).abs() < 1e-9);
    assert_eq!(g.surface_height, g.export_height.floor() as u32);
}

#[test]
fn cell_origins_follow_padding_and_gap() {
    let g = CompositeGeometry::compute(&layout(2, 3, 15.0, 40.0, 1.0), 1200, 100.0).unwrap();
    let w = g.cell_width;
    let o = g.cell_origin(4);
    assert!((o.x - (40.0 + w + 15.0)).abs() < 1e-9);
    assert!((o.y - (40.0 + w + 15.0)).abs() < 1e-9);
    let r = g.cell_rect(0);
    assert_eq!(r.x0, 40.0);
    assert!((r.width() - w).abs() < 1e-9);
}

#[test]
fn oversized_padding_is_configuration_error() {
    let err = CompositeGeometry::compute(&layout(1, 5, 50.0, 1000.0, 1.0), 1200, 100.0)
        .unwrap_err();
    assert!(matches!(err, BoothError::Configuration(_)));
}

#[test]
fn exact_zero_cell_width_is_rejected() {
    // 1200 - 2*550 - 100 = 0
    let err = CompositeGeometry::compute(&layout(1, 2, 100.0, 550.0, 1.0), 1200, 100.0)
        .unwrap_err();
    assert!(matches!(err, BoothError::Configuration(_)));
}

#[test]
fn surface_taller_than_rasterizer_limit_is_rejected() {
    let err =
        CompositeGeometry::compute(&layout(100, 1, 0.0, 0.0, 0.01), 1200, 100.0).unwrap_err();
    assert!(matches!(err, BoothError::Configuration(_)));
}

#[test]
fn canvas_point_uses_final_surface_size() {
    let g = CompositeGeometry::compute(&layout(2, 2, 20.0, 50.0, 1.0), 1200, 100.0).unwrap();
    let p = g.canvas_point(0.5, 1.0);
    assert_eq!(p.x, 600.0);
    assert_eq!(p.y, f64::from(g.surface_height));
}
