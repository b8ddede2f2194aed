use eframe::egui::{self, Rect, Ui};

use super::super::ViewModel;
use super::super::viewport::{ViewTransform, ZOOM_STEP};

impl ViewModel {
    pub(in crate::app) fn handle_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        transform: &ViewTransform,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let factor = if scroll > 0.0 {
            ZOOM_STEP
        } else {
            1.0 / ZOOM_STEP
        };
        let anchor = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        self.view.apply_zoom(factor, anchor, transform);
    }

    pub(in crate::app) fn handle_pan(&mut self, response: &egui::Response) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.view.begin_pan(pointer);
        } else if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.view.update_pan(pointer);
        }

        // Covers pointer-up and the pointer leaving the canvas mid-drag; the
        // move handler must not outlive the drag.
        if response.drag_stopped_by(egui::PointerButton::Primary)
            || (self.view.is_panning() && !response.dragged())
        {
            self.view.end_pan();
        }
    }
}
