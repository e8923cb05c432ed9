//! Tests for the drawing-surface contract and the render routines.

use super::*;
use crate::collection::ModelCollectionController;
use crate::config::EngineConfig;
use crate::core::point::Point3D;
use crate::model::{FillType, ModelKind, Polygon3D, PolygonSide, VolumetricModel};

/// `n` separate triangles at depth 10, projected, each lit in a colour
/// whose red channel is its polygon index.
fn strip(n: usize) -> VolumetricModel {
    let mut vertices = Vec::new();
    let mut polygons = Vec::new();
    for i in 0..n {
        let x = i as f32;
        vertices.extend([
            Point3D::new(x, 0.0, 10.0),
            Point3D::new(x + 1.0, 0.0, 10.0),
            Point3D::new(x, 1.0, 10.0),
        ]);
        let mut p = Polygon3D::new([3 * i, 3 * i + 1, 3 * i + 2]);
        p.normal_z = -1.0;
        p.lighting_color = [Color::from_argb(255, i as u8, 0, 0), Color::from_argb(255, i as u8, 0, 1)];
        polygons.push(p);
    }
    let mut m = VolumetricModel::from_parts(ModelKind::Other(-1), vertices, polygons, false).unwrap();
    m.vertices_mut().create_screen_vertex(100.0, 50, -50);
    m
}

fn colors(commands: &[DrawCommand]) -> Vec<Color> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillPolygon { color, .. }
            | DrawCommand::DrawPolygon { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::Lines { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

fn red(commands: &[DrawCommand]) -> Vec<u8> {
    colors(commands).into_iter().map(|c| c.r).collect()
}

// =============================================================================
// RECORDING SURFACE
// =============================================================================

#[test]
fn recording_surface_needs_a_buffer() {
    assert!(matches!(
        RecordingSurface::new(10, 10, 0).unwrap_err(),
        Graph3dError::InvalidParameter { .. }
    ));
}

#[test]
fn bad_buffer_index_is_reported() {
    let s = RecordingSurface::new(10, 10, 2).unwrap();
    let err = s
        .fill_polygon(Color::WHITE, &[Point2D::ZERO; 3], 2)
        .unwrap_err();
    assert!(matches!(err, Graph3dError::IndexOutOfRange { index: 2, len: 2, .. }));
    assert!(s.render(5).is_err());
    assert!(s.commands(5).is_empty());
}

#[test]
fn clear_merge_and_present() {
    let s = RecordingSurface::new(640, 480, 2).unwrap();
    s.draw_line(Color::WHITE, Point2D::ZERO, Point2D::ONE, 0).unwrap();
    s.clear_surfaces(Color::BLACK).unwrap();
    assert_eq!(s.commands(0), vec![DrawCommand::Clear(Color::BLACK)]);

    s.draw_rectangle(Color::WHITE, 1.0, 2.0, 3.0, 4.0, 0).unwrap();
    s.draw_text("fps", Color::WHITE, 0.0, 0.0, 1).unwrap();
    s.merge_buffers().unwrap();
    let merged = s.commands(0);
    assert_eq!(merged.len(), 4);
    assert!(matches!(merged[3], DrawCommand::Text { ref text, .. } if text == "fps"));
    assert!(s.commands(1).is_empty());

    s.render(0).unwrap();
    assert_eq!(s.presented(), vec![0]);
    assert_eq!((s.width(), s.height(), s.buffer_count()), (640, 480, 2));
}

// =============================================================================
// PARTITIONING
// =============================================================================

#[test]
fn partitions_keep_stack_order_and_drop_nothing() {
    let model = strip(5);
    let s = RecordingSurface::new(100, 100, 2).unwrap();
    model.show_polygon_model(&s, PolygonSide::AllSides).unwrap();
    assert_eq!(red(&s.commands(0)), vec![0, 1, 2]);
    assert_eq!(red(&s.commands(1)), vec![3, 4]);
    s.merge_buffers().unwrap();
    assert_eq!(red(&s.commands(0)), vec![0, 1, 2, 3, 4]);
}

#[test]
fn more_buffers_than_polygons() {
    let model = strip(2);
    let s = RecordingSurface::new(100, 100, 4).unwrap();
    model.show_polygon_model(&s, PolygonSide::AllSides).unwrap();
    assert_eq!(red(&s.commands(0)), vec![0]);
    assert_eq!(red(&s.commands(1)), vec![1]);
    assert!(s.commands(2).is_empty());
    assert!(s.commands(3).is_empty());
}

#[test]
fn screen_coordinates_reach_the_surface() {
    let model = strip(1);
    let s = RecordingSurface::new(100, 100, 1).unwrap();
    model.show_polygon_model(&s, PolygonSide::FrontSide).unwrap();
    match &s.commands(0)[0] {
        DrawCommand::FillPolygon { points, .. } => {
            assert_eq!(points[0], Point2D::new(50.0, 50.0));
            assert_eq!(points[1], Point2D::new(60.0, 50.0));
            assert_eq!(points[2], Point2D::new(50.0, 40.0));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

// =============================================================================
// SIDE SELECTION
// =============================================================================

#[test]
fn side_selection_follows_screen_normal() {
    let mut model = strip(3);
    // 0: faces the viewer; 1: turned away, single-sided; 2: turned away, double-sided.
    model
        .edit_polygons(|p| {
            p[1].normal_z = 1.0;
            p[2].normal_z = 1.0;
            p[2].double_sided = true;
        })
        .unwrap();

    let front = RecordingSurface::new(100, 100, 1).unwrap();
    model.show_polygon_model(&front, PolygonSide::FrontSide).unwrap();
    assert_eq!(red(&front.commands(0)), vec![0]);

    let rear = RecordingSurface::new(100, 100, 1).unwrap();
    model.show_polygon_model(&rear, PolygonSide::RearSide).unwrap();
    assert_eq!(colors(&rear.commands(0)), vec![Color::from_argb(255, 2, 0, 1)]);

    let all = RecordingSurface::new(100, 100, 1).unwrap();
    model.show_polygon_model(&all, PolygonSide::AllSides).unwrap();
    assert_eq!(
        colors(&all.commands(0)),
        vec![
            Color::from_argb(255, 0, 0, 0),
            Color::from_argb(255, 1, 0, 1),
            Color::from_argb(255, 2, 0, 1),
        ]
    );
}

#[test]
fn auto_draws_rear_pass_then_front_pass() {
    let mut model = strip(2);
    model
        .edit_polygons(|p| {
            p[0].normal_z = 1.0;
            p[0].double_sided = true;
        })
        .unwrap();
    let s = RecordingSurface::new(100, 100, 1).unwrap();
    model.show_polygon_wide_model(&s, PolygonSide::Auto).unwrap();
    let commands = s.commands(0);
    assert!(commands.iter().all(|c| matches!(c, DrawCommand::DrawPolygon { .. })));
    assert_eq!(red(&commands), vec![0, 1]);
}

// =============================================================================
// STYLES
// =============================================================================

#[test]
fn show_model_follows_fill_type() {
    let mut model = strip(3);
    model
        .edit_polygons(|p| {
            p[1].fill_type = FillType::Wide;
            p[2].fill_type = FillType::SquareWide;
        })
        .unwrap();
    let s = RecordingSurface::new(100, 100, 1).unwrap();
    model.show_model(&s, PolygonSide::AllSides).unwrap();
    let commands = s.commands(0);
    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], DrawCommand::FillPolygon { .. }));
    assert!(matches!(commands[1], DrawCommand::DrawPolygon { .. }));
    match (&commands[2], &commands[3]) {
        (DrawCommand::Line { from: a, to: b, .. }, DrawCommand::Line { from: c, to: d, .. }) => {
            assert_eq!((*a, *b), (Point2D::new(70.0, 50.0), Point2D::new(80.0, 50.0)));
            assert_eq!((*c, *d), (Point2D::new(70.0, 40.0), Point2D::new(70.0, 50.0)));
        }
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn cell_model_uses_special_colour_on_request() {
    let model = strip(1);
    let special = Color::from_argb(255, 9, 9, 9);

    let s = RecordingSurface::new(100, 100, 1).unwrap();
    model
        .show_wide_only_cell_model(&s, special, PolygonSide::AllSides, 2.0, true)
        .unwrap();
    match &s.commands(0)[0] {
        DrawCommand::Lines { color, points, width } => {
            assert_eq!(*color, special);
            assert_eq!(*width, 2.0);
            assert_eq!(
                points,
                &vec![Point2D::new(50.0, 40.0), Point2D::new(50.0, 50.0), Point2D::new(60.0, 50.0)]
            );
        }
        other => panic!("unexpected command {other:?}"),
    }

    let lit = RecordingSurface::new(100, 100, 1).unwrap();
    model
        .show_wide_only_cell_model(&lit, special, PolygonSide::AllSides, 1.0, false)
        .unwrap();
    assert_eq!(colors(&lit.commands(0)), vec![Color::from_argb(255, 0, 0, 0)]);
}

#[test]
fn inactive_polygons_are_not_drawn() {
    let mut model = strip(4);
    model.filter_polygon_by_xy_pos(65.0, 100.0);
    let s = RecordingSurface::new(100, 100, 1).unwrap();
    model.show_polygon_model(&s, PolygonSide::AllSides).unwrap();
    assert_eq!(s.commands(0).len(), model.active_polygons().len());
    assert!(model.active_polygons().len() < 4);
}

// =============================================================================
// COLLECTION
// =============================================================================

fn sorted(mut m: VolumetricModel) -> VolumetricModel {
    let cfg = EngineConfig::default().serial();
    m.calculate_polygon_centers(&cfg);
    m.sort_active_polygon_indexes(&cfg);
    m
}

#[test]
fn collection_draws_merged_stack() {
    let mut near = strip(1);
    near.vertices_mut().move_by(0.0, 0.0, -5.0);
    let mut c = ModelCollectionController::new(2).unwrap();
    c.set_slot(0, Some(sorted(near))).unwrap();
    c.set_slot(1, Some(sorted(strip(2)))).unwrap();
    c.create_active_polygon_buffer();
    c.merge_active_polygon();

    let s = RecordingSurface::new(100, 100, 1).unwrap();
    c.show_polygon_model(&s, PolygonSide::AllSides).unwrap();
    let commands = s.commands(0);
    assert_eq!(commands.len(), 3);
    // The nearer model's polygon comes last.
    assert_eq!(
        c.active_polygons().last().map(|r| r.model_index),
        Some(0)
    );

    let wide = RecordingSurface::new(100, 100, 1).unwrap();
    c.show_wide_model(&wide, PolygonSide::FrontSide).unwrap();
    assert!(wide
        .commands(0)
        .iter()
        .all(|cmd| matches!(cmd, DrawCommand::DrawPolygon { .. })));
}

#[test]
fn single_slot_collection_draws_its_model() {
    let mut c = ModelCollectionController::new(1).unwrap();
    c.set_slot(0, Some(sorted(strip(3)))).unwrap();
    c.create_active_polygon_buffer();
    c.merge_active_polygon();
    let s = RecordingSurface::new(100, 100, 1).unwrap();
    c.show_model(&s, PolygonSide::AllSides).unwrap();
    assert_eq!(s.commands(0).len(), 3);

    let empty = ModelCollectionController::new(1).unwrap();
    empty.show_model(&s, PolygonSide::AllSides).unwrap();
    assert_eq!(s.commands(0).len(), 3);
}

#[test]
fn drawing_errors_carry_context() {
    let model = strip(1);
    let s = RecordingSurface::new(100, 100, 1).unwrap();
    let bad = BadSurface(&s);
    let err = model.show_model(&bad, PolygonSide::AllSides).unwrap_err();
    assert_eq!(err.breadcrumbs(), vec![("VolumetricModel", "show_model")]);
}

/// Reports one buffer more than it has.
struct BadSurface<'a>(&'a RecordingSurface);

impl DrawingSurface for BadSurface<'_> {
    fn width(&self) -> u32 {
        self.0.width()
    }
    fn height(&self) -> u32 {
        self.0.height()
    }
    fn buffer_count(&self) -> usize {
        self.0.buffer_count() + 1
    }
    fn clear_surfaces(&self, color: Color) -> Graph3dResult<()> {
        self.0.clear_surfaces(color)
    }
    fn fill_polygon(&self, color: Color, points: &[Point2D; 3], buffer: usize) -> Graph3dResult<()> {
        self.0.fill_polygon(color, points, buffer + 1)
    }
    fn draw_polygon(&self, color: Color, points: &[Point2D; 3], buffer: usize) -> Graph3dResult<()> {
        self.0.draw_polygon(color, points, buffer)
    }
    fn draw_line(&self, color: Color, from: Point2D, to: Point2D, buffer: usize) -> Graph3dResult<()> {
        self.0.draw_line(color, from, to, buffer)
    }
    fn draw_lines(&self, color: Color, points: &[Point2D], width: f32, buffer: usize) -> Graph3dResult<()> {
        self.0.draw_lines(color, points, width, buffer)
    }
    fn fill_ellipse(&self, color: Color, x: f32, y: f32, w: f32, h: f32, buffer: usize) -> Graph3dResult<()> {
        self.0.fill_ellipse(color, x, y, w, h, buffer)
    }
    fn draw_rectangle(&self, color: Color, x: f32, y: f32, w: f32, h: f32, buffer: usize) -> Graph3dResult<()> {
        self.0.draw_rectangle(color, x, y, w, h, buffer)
    }
    fn draw_text(&self, text: &str, color: Color, x: f32, y: f32, buffer: usize) -> Graph3dResult<()> {
        self.0.draw_text(text, color, x, y, buffer)
    }
    fn merge_buffers(&self) -> Graph3dResult<()> {
        self.0.merge_buffers()
    }
    fn render(&self, buffer: usize) -> Graph3dResult<()> {
        self.0.render(buffer)
    }
}
