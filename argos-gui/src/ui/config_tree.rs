//! Config tree rendering and the egui views of the editor widgets.

use argos_core::{ConfigTreeItem, EditSession, EditorWidget};
use eframe::egui;

use crate::util::decimals_to_usize;

/// What the user asked for in the config tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigAction {
    StartEditing(String),
    CancelEditing,
}

/// Renders the children of `root`. The item being edited shows its editor
/// instead of its value.
pub(crate) fn config_tree(
    ui: &mut egui::Ui,
    root: &ConfigTreeItem,
    mut session: Option<&mut EditSession>,
) -> Option<ConfigAction> {
    let mut action = None;
    show_children(ui, root, "", &mut session, &mut action);
    action
}

fn show_children(
    ui: &mut egui::Ui,
    item: &ConfigTreeItem,
    prefix: &str,
    session: &mut Option<&mut EditSession>,
    action: &mut Option<ConfigAction>,
) {
    for child in item.children() {
        let path = if prefix.is_empty() {
            child.node_name().to_string()
        } else {
            format!("{prefix}/{}", child.node_name())
        };

        if child.has_children() {
            egui::CollapsingHeader::new(child.node_name())
                .id_salt(("config", &path))
                .default_open(true)
                .show(ui, |ui| show_children(ui, child, &path, session, action));
            continue;
        }

        ui.horizontal(|ui| {
            ui.label(child.node_name());
            let editing = session.as_deref_mut().filter(|s| s.path() == path);
            if let Some(session) = editing {
                editor_widget(ui, session.widget_mut(), &path);
                if ui.small_button("✖").on_hover_text("Cancel").clicked() {
                    *action = Some(ConfigAction::CancelEditing);
                }
                return;
            }

            let hover = format!(
                "default: {}\n{}",
                child.display_default_value(),
                child.debug_info()
            );
            let response = ui
                .selectable_label(false, child.display_value())
                .on_hover_text(hover);
            if response.clicked() && child.is_editable() {
                *action = Some(ConfigAction::StartEditing(path.clone()));
            }
        });
    }
}

/// Renders a widget model and forwards user input to it.
fn editor_widget(ui: &mut egui::Ui, widget: EditorWidget<'_>, id: &str) {
    match widget {
        EditorWidget::ComboBox(combo) => {
            let mut activated = None;
            egui::ComboBox::from_id_salt(("editor", id))
                .selected_text(combo.current_text().to_string())
                .show_ui(ui, |ui| {
                    for index in 0..combo.count() {
                        let text = combo.item_text(index).unwrap_or_default().to_string();
                        let is_current = combo.current_index() == Some(index);
                        if ui.selectable_label(is_current, text).clicked() {
                            activated = Some(index);
                        }
                    }
                });
            if let Some(index) = activated {
                combo.activate(index);
            }
        }
        EditorWidget::SpinBox(spin) => {
            let mut value = spin.value();
            let response = ui.add(
                egui::DragValue::new(&mut value)
                    .range(spin.minimum()..=spin.maximum())
                    .speed(spin.single_step())
                    .fixed_decimals(decimals_to_usize(spin.decimals())),
            );
            if response.changed() {
                spin.set_value(value);
            }
            if ui.small_button("-").clicked() {
                spin.step_by(-1);
            }
            if ui.small_button("+").clicked() {
                spin.step_by(1);
            }
        }
        EditorWidget::CheckBox(check_box) => {
            let mut checked = check_box.is_checked();
            if ui.checkbox(&mut checked, "").changed() {
                check_box.set_checked(checked);
            }
        }
        EditorWidget::LineEdit(line_edit) => {
            let response = ui.text_edit_singleline(line_edit.text_mut());
            if response.lost_focus() {
                line_edit.finish_editing();
            }
        }
    }
}
