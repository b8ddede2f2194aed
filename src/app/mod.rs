use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, Context, Pos2};

use crate::repo::{CommitGraph, load_commit_graph};

mod graph;
mod render_utils;
mod ui;
mod viewport;

use viewport::{GraphBounds, ViewState};

pub struct CommitMapApp {
    graph_path: String,
    state: AppState,
    reload_rx: Option<Receiver<Result<CommitGraph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CommitGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: CommitGraph,
    view: ViewState,
    search: String,
    search_cache: Option<SearchMatches>,
    render_graph: RenderGraph,
}

struct SearchMatches {
    query: String,
    ordered: Vec<usize>,
    members: HashSet<usize>,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    index_by_id: HashMap<String, usize>,
    bounds: GraphBounds,
    skipped_edges: usize,
    view_scratch: ViewScratch,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

struct RenderNode {
    id: String,
    label: String,
    graph_pos: Pos2,
    fill: Color32,
}

struct RenderEdge {
    source: usize,
    target: usize,
    color: Color32,
}

impl CommitMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph_path: String) -> Self {
        let state = Self::start_load(graph_path.clone());
        Self {
            graph_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(graph_path: String) -> Receiver<Result<CommitGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_commit_graph(&graph_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(graph_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(graph_path),
        }
    }
}

impl eframe::App for CommitMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading commit graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load commit graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.graph_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.graph_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            // A freshly loaded graph replaces the old one
                            // wholesale; view state and selection reset.
                            transition = Some(match result {
                                Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
