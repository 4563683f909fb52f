//! Repository tree rendering.

use argos_io::RepoTreeItem;
use eframe::egui;

/// Renders the trees and returns the path of a clicked array node.
pub(crate) fn repo_tree(
    ui: &mut egui::Ui,
    items: &[RepoTreeItem],
    selected: Option<&str>,
) -> Option<String> {
    let mut clicked = None;
    for item in items {
        show_item(ui, item, selected, &mut clicked);
    }
    clicked
}

fn show_item(
    ui: &mut egui::Ui,
    item: &RepoTreeItem,
    selected: Option<&str>,
    clicked: &mut Option<String>,
) {
    match item {
        RepoTreeItem::Group(group) => {
            egui::CollapsingHeader::new(group.node_name())
                .id_salt(group.node_path())
                .default_open(true)
                .show(ui, |ui| {
                    for child in group.children() {
                        show_item(ui, child, selected, clicked);
                    }
                });
        }
        RepoTreeItem::Array(array) => {
            let is_selected = selected == Some(array.node_path());
            let label = format!("{}  {:?}", array.node_name(), array.shape());
            let response = ui
                .selectable_label(is_selected, label)
                .on_hover_text(format!("{} ({})", array.node_path(), array.element_type()));
            if response.clicked() {
                *clicked = Some(array.node_path().to_string());
            }
        }
    }
}
