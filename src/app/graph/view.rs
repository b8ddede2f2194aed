use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::util::truncate_label;

use super::super::ViewModel;
use super::super::render_utils::{
    EDGE_WIDTH, LABEL_COLOR, LABEL_FONT_SIZE, LABEL_MAX_CHARS, NODE_OUTLINE_COLOR,
    NODE_OUTLINE_WIDTH, NODE_RADIUS, SEARCH_MATCH_COLOR, SELECTED_OUTLINE_WIDTH, SELECTION_COLOR,
    blend_color, circle_visible, dim_color, draw_background,
};
use super::super::viewport::{self, ViewTransform};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.view.pan, self.view.zoom);

        if self.render_graph.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "This repository has no commit graph nodes yet.",
                FontId::proportional(14.0),
                Color32::from_gray(180),
            );
            return;
        }

        let Some(transform) = ViewTransform::new(rect, self.render_graph.bounds, &self.view) else {
            return;
        };
        self.handle_zoom(ui, rect, &response, &transform);
        self.handle_pan(&response);

        // Input may have moved pan/zoom this frame; draw with the fresh mapping.
        let Some(transform) = ViewTransform::new(rect, self.render_graph.bounds, &self.view) else {
            return;
        };

        self.ensure_search_matches();

        let zoom = transform.zoom();
        let cache = &mut self.render_graph;
        cache.view_scratch.screen_positions.clear();
        cache.view_scratch.screen_radii.clear();
        for node in &cache.nodes {
            cache
                .view_scratch
                .screen_positions
                .push(transform.graph_to_screen(node.graph_pos));
            cache.view_scratch.screen_radii.push(NODE_RADIUS * zoom);
        }

        let hovered = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|position| rect.contains(*position))
            .and_then(|position| {
                viewport::hit_test_nodes(
                    position,
                    &cache.view_scratch.screen_positions,
                    &cache.view_scratch.screen_radii,
                )
            });

        if hovered.is_some() && !self.view.is_panning() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_selection = if response.clicked_by(egui::PointerButton::Primary) {
            response.interact_pointer_pos().map(|click| {
                viewport::hit_test_nodes(
                    click,
                    &cache.view_scratch.screen_positions,
                    &cache.view_scratch.screen_radii,
                )
                .map(|index| cache.nodes[index].id.clone())
            })
        } else {
            None
        };

        for edge in &cache.edges {
            let start = cache.view_scratch.screen_positions[edge.source];
            let end = cache.view_scratch.screen_positions[edge.target];
            painter.line_segment([start, end], Stroke::new(EDGE_WIDTH * zoom, edge.color));
        }

        let search_active = self.search_cache.is_some();
        let selected_id = self.view.selected.as_deref();

        for (index, node) in cache.nodes.iter().enumerate() {
            let position = cache.view_scratch.screen_positions[index];
            let radius = cache.view_scratch.screen_radii[index];
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = selected_id == Some(node.id.as_str());
            let is_hovered = hovered == Some(index);
            let is_search_match = self
                .search_cache
                .as_ref()
                .is_some_and(|matches| matches.members.contains(&index));

            let mut fill = node.fill;
            if search_active && !is_search_match {
                fill = dim_color(fill, 0.45);
            }
            if is_hovered {
                fill = blend_color(fill, Color32::WHITE, 0.25);
            }

            painter.circle_filled(position, radius, fill);

            let (outline_width, outline_color) = if is_selected {
                (SELECTED_OUTLINE_WIDTH * zoom, SELECTION_COLOR)
            } else if is_search_match {
                (NODE_OUTLINE_WIDTH * zoom, SEARCH_MATCH_COLOR)
            } else {
                (NODE_OUTLINE_WIDTH * zoom, NODE_OUTLINE_COLOR)
            };
            painter.circle_stroke(position, radius, Stroke::new(outline_width, outline_color));
        }

        // Labels last so no circle covers them.
        for (index, node) in cache.nodes.iter().enumerate() {
            let position = cache.view_scratch.screen_positions[index];
            if !circle_visible(rect, position, cache.view_scratch.screen_radii[index]) {
                continue;
            }

            painter.text(
                position,
                Align2::CENTER_CENTER,
                truncate_label(&node.label, LABEL_MAX_CHARS),
                FontId::proportional(LABEL_FONT_SIZE * zoom),
                LABEL_COLOR,
            );
        }

        if let Some(index) = hovered
            && let Some(node) = self.graph.node(&cache.nodes[index].id)
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {}", node.label, node.kind.name()),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if let Some(selection) = pending_selection {
            self.view.select(selection);
        }
    }
}
