use eframe::egui::{self, Align, Color32, Context, Layout};

use crate::repo::CommitGraph;

use super::super::ViewModel;
use super::super::graph::build_render_graph;
use super::super::viewport::ViewState;

impl ViewModel {
    pub(in crate::app) fn new(graph: CommitGraph) -> Self {
        Self {
            render_graph: build_render_graph(&graph),
            graph,
            view: ViewState::new(),
            search: String::new(),
            search_cache: None,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, reload_requested: &mut bool, is_loading: bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("commitmap");
                    ui.separator();
                    ui.label(format!("document: {}", self.graph.source_path));
                    ui.label(format!("nodes: {}", self.graph.node_count()));
                    ui.label(format!("edges: {}", self.graph.edge_count()));
                    if self.render_graph.skipped_edges > 0 {
                        ui.colored_label(
                            Color32::from_rgb(245, 158, 11),
                            format!("skipped edges: {}", self.render_graph.skipped_edges),
                        );
                    }
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload graph"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.view.reset_view();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("zoom: {:.2}x", self.view.zoom));
                    });
                });
            });

        egui::SidePanel::left("overview")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_overview(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Loading commit graph...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }
}
