use std::collections::HashSet;

use eframe::egui::{self, Color32, RichText, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::repo::EdgeKind;

use super::super::render_utils::{COMMIT_NODE_COLOR, FILE_NODE_COLOR, edge_stroke_color};
use super::super::{SearchMatches, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn legend_node_entry(ui: &mut Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
        ui.painter().circle_filled(rect.center(), 5.0, color);
        ui.label(label);
    });
}

fn legend_edge_entry(ui: &mut Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
        ui.painter().line_segment(
            [rect.left_center(), rect.right_center()],
            Stroke::new(2.0, color),
        );
        ui.label(label);
    });
}

impl ViewModel {
    const SEARCH_RESULT_ROWS: usize = 30;

    pub(in crate::app) fn draw_overview(&mut self, ui: &mut Ui) {
        ui.heading("Repository graph");
        ui.add_space(6.0);

        let statistics = self.graph.statistics;
        egui::Grid::new("graph_statistics")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Commits");
                ui.label(statistics.total_commits.to_string());
                ui.end_row();
                ui.label("File changes");
                ui.label(statistics.total_file_changes.to_string());
                ui.end_row();
                ui.label("Unique files");
                ui.label(statistics.unique_files.to_string());
                ui.end_row();
                ui.label("Avg files/commit");
                ui.label(format!("{:.1}", statistics.average_files_per_commit));
                ui.end_row();
            });

        ui.separator();
        ui.label(RichText::new("Legend").strong());
        legend_node_entry(ui, COMMIT_NODE_COLOR, "Commits");
        legend_node_entry(ui, FILE_NODE_COLOR, "Files");
        for kind in [
            EdgeKind::CommitParent,
            EdgeKind::CommitToFile,
            EdgeKind::FileEvolution,
        ] {
            legend_edge_entry(ui, edge_stroke_color(kind), kind.label());
        }

        ui.separator();
        ui.label(RichText::new("Search nodes").strong());
        if ui.text_edit_singleline(&mut self.search).changed() {
            self.search_cache = None;
        }
        self.ensure_search_matches();

        let Some(matches) = &self.search_cache else {
            return;
        };

        if matches.ordered.is_empty() {
            ui.small("No nodes match the search.");
            return;
        }

        ui.small(format!("{} matching node(s)", matches.ordered.len()));
        let mut pending = None;
        egui::ScrollArea::vertical()
            .id_salt("search_results")
            .max_height(260.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for &index in matches.ordered.iter().take(Self::SEARCH_RESULT_ROWS) {
                    let node = &self.render_graph.nodes[index];
                    if ui.link(&node.label).on_hover_text(node.id.as_str()).clicked() {
                        pending = Some(node.id.clone());
                    }
                }
            });

        if let Some(id) = pending {
            self.view.select(Some(id));
        }
    }

    pub(in crate::app) fn ensure_search_matches(&mut self) {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_cache = None;
            return;
        }
        if self
            .search_cache
            .as_ref()
            .is_some_and(|cache| cache.query == query)
        {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .render_graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                fuzzy_match_score(&matcher, &node.label, query)
                    .or_else(|| fuzzy_match_score(&matcher, &node.id, query))
                    .map(|score| (score, index))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        let ordered = scored.into_iter().map(|(_, index)| index).collect::<Vec<_>>();
        let members = ordered.iter().copied().collect::<HashSet<_>>();
        self.search_cache = Some(SearchMatches {
            query: query.to_string(),
            ordered,
            members,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::repo::{CommitGraph, GraphNode, GraphStatistics, NodeKind, RawPosition};

    use super::super::super::ViewModel;

    fn graph_with_labels(labels: &[(&str, &str)]) -> CommitGraph {
        let mut nodes = HashMap::new();
        for (id, label) in labels {
            nodes.insert(
                id.to_string(),
                GraphNode {
                    id: id.to_string(),
                    label: label.to_string(),
                    kind: NodeKind::Commit {
                        sha: id.to_string(),
                        message: label.to_string(),
                        author: String::new(),
                        timestamp: String::new(),
                    },
                    position: RawPosition {
                        x: 0.0,
                        y: 0.0,
                        level: 0,
                    },
                },
            );
        }
        let statistics = GraphStatistics::derive(&nodes);
        CommitGraph {
            source_path: "test.json".to_string(),
            nodes,
            edges: Vec::new(),
            statistics,
        }
    }

    #[test]
    fn empty_query_clears_the_match_cache() {
        let mut model = ViewModel::new(graph_with_labels(&[("c1", "fix parser")]));
        model.search = "parser".to_string();
        model.ensure_search_matches();
        assert!(model.search_cache.is_some());

        model.search = "   ".to_string();
        model.ensure_search_matches();
        assert!(model.search_cache.is_none());
    }

    #[test]
    fn matches_are_found_case_insensitively() {
        let mut model = ViewModel::new(graph_with_labels(&[
            ("c1", "Fix Parser crash"),
            ("c2", "update readme"),
        ]));
        model.search = "parser".to_string();
        model.ensure_search_matches();

        let matches = model.search_cache.as_ref().unwrap();
        assert_eq!(matches.ordered.len(), 1);
        let index = matches.ordered[0];
        assert_eq!(model.render_graph.nodes[index].label, "Fix Parser crash");
    }

    #[test]
    fn cache_is_reused_for_the_same_query() {
        let mut model = ViewModel::new(graph_with_labels(&[("c1", "fix parser")]));
        model.search = "fix".to_string();
        model.ensure_search_matches();
        let first = model.search_cache.as_ref().unwrap().ordered.clone();

        model.ensure_search_matches();
        assert_eq!(model.search_cache.as_ref().unwrap().ordered, first);
    }
}
