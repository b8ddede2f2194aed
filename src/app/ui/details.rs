use eframe::egui::{RichText, Ui};

use crate::repo::NodeKind;
use crate::util::short_sha;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Node Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.view.selected.clone() else {
            ui.label("Click a node in the graph to inspect it.");
            return;
        };

        let Some(node) = self.graph.node(&selected_id) else {
            ui.label("Selected node no longer exists in the displayed graph.");
            return;
        };

        ui.label(RichText::new(&node.label).strong());
        ui.small(node.id.as_str());
        ui.add_space(6.0);

        ui.label(format!("Kind: {}", node.kind.name()));
        match &node.kind {
            NodeKind::Commit {
                sha,
                message,
                author,
                timestamp,
            } => {
                ui.label(format!("SHA: {}", short_sha(sha)));
                ui.small(RichText::new(sha).monospace());
                ui.label(format!("Message: {message}"));
                ui.label(format!("Author: {author}"));
                ui.label(format!("Timestamp: {timestamp}"));
            }
            NodeKind::File {
                file_path,
                change_type,
                additions,
                deletions,
                commit_sha,
            } => {
                ui.label(format!("File path: {file_path}"));
                ui.label(format!("Change type: {change_type}"));
                ui.label(format!("Additions: +{additions}"));
                ui.label(format!("Deletions: -{deletions}"));
                if let Some(commit_sha) = commit_sha {
                    ui.label(format!("In commit: {}", short_sha(commit_sha)));
                }
            }
        }

        ui.separator();
        ui.label(format!(
            "Layout: ({:.0}, {:.0}) at level {}",
            node.position.x, node.position.y, node.position.level
        ));

        if let Some(&index) = self.render_graph.index_by_id.get(&selected_id) {
            let connected = self
                .render_graph
                .edges
                .iter()
                .filter(|edge| edge.source == index || edge.target == index)
                .count();
            ui.label(format!("Connected edges: {connected}"));
        }
    }
}
