use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::repo::{EdgeKind, NodeKind};

pub(super) const NODE_RADIUS: f32 = 15.0;
pub(super) const NODE_OUTLINE_WIDTH: f32 = 1.0;
pub(super) const SELECTED_OUTLINE_WIDTH: f32 = 3.0;
pub(super) const EDGE_WIDTH: f32 = 2.0;
pub(super) const LABEL_FONT_SIZE: f32 = 12.0;
pub(super) const LABEL_MAX_CHARS: usize = 20;

pub(super) const NODE_OUTLINE_COLOR: Color32 = Color32::from_rgb(55, 65, 81);
pub(super) const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
pub(super) const SEARCH_MATCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);
pub(super) const LABEL_COLOR: Color32 = Color32::WHITE;
pub(super) const COMMIT_NODE_COLOR: Color32 = Color32::from_rgb(16, 185, 129);
pub(super) const FILE_NODE_COLOR: Color32 = Color32::from_rgb(245, 158, 11);

pub(super) fn node_fill_color(kind: &NodeKind) -> Color32 {
    match kind {
        NodeKind::Commit { .. } => COMMIT_NODE_COLOR,
        NodeKind::File { .. } => FILE_NODE_COLOR,
    }
}

pub(super) fn edge_stroke_color(kind: EdgeKind) -> Color32 {
    match kind {
        EdgeKind::CommitParent => Color32::from_rgb(59, 130, 246),
        EdgeKind::CommitToFile => Color32::from_rgb(16, 185, 129),
        EdgeKind::FileEvolution => Color32::from_rgb(245, 158, 11),
        EdgeKind::Other => Color32::from_rgb(107, 114, 128),
    }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(17, 24, 39));

    let step = (64.0 * zoom.clamp(0.5, 2.0)).max(24.0);
    let origin = rect.center() + pan;
    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(55, 65, 81, 60));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            grid_stroke,
        );
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            grid_stroke,
        );
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}
