//! Main window rendering.

use eframe::egui;
use rfd::FileDialog;

use super::config_tree::{config_tree, ConfigAction};
use super::plot_view::plot_view;
use super::repo_tree::repo_tree;
use crate::inspector::Inspector;
use crate::window::MainWindow;

impl MainWindow {
    /// Renders the window and applies the edits made in this frame.
    pub(crate) fn show(&mut self, ctx: &egui::Context) {
        let mut open = self.open;
        egui::Window::new(self.title())
            .id(egui::Id::new(("main_window", self.window_number)))
            .open(&mut open)
            .default_size([1000.0, 650.0])
            .show(ctx, |ui| self.show_contents(ui));
        self.open = open;
        self.process_edit_events();
    }

    fn show_contents(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open...").clicked() {
                if let Some(paths) = FileDialog::new()
                    .add_filter("HDF5", &argos_io::HDF5_EXTENSIONS)
                    .pick_files()
                {
                    self.open_files(&paths);
                }
            }
            if ui.button("Reset config").clicked() {
                self.reset_config();
            }
        });
        ui.separator();

        egui::SidePanel::left(egui::Id::new(("side_panel", self.window_number)))
            .resizable(true)
            .default_width(280.0)
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.strong("Data");
                    if let Some(path) =
                        repo_tree(ui, self.repository(), self.selected_rti())
                    {
                        self.select_rti(&path);
                    }
                    self.show_slicer(ui);

                    ui.separator();
                    ui.strong("Inspector config");
                    let action =
                        config_tree(ui, self.inspector.config(), self.edit_session.as_mut());
                    match action {
                        Some(ConfigAction::StartEditing(path)) => self.start_editing(&path),
                        Some(ConfigAction::CancelEditing) => self.cancel_editing(),
                        None => {}
                    }
                });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            if let Some(error) = self.last_error() {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                });
            } else if let Some(plot) = self.inspector().plot() {
                plot_view(ui, &self.inspector().plot_id(), plot);
            }
        });
    }

    /// Axis dimension selector and slice indices of the other dimensions.
    fn show_slicer(&mut self, ui: &mut egui::Ui) {
        let Some(rti) = self.collector.rti() else {
            return;
        };
        let names = rti.dimension_names().to_vec();
        let shape = rti.shape().to_vec();

        if let Some(&axis_dim) = self.collector.axes().first() {
            let mut dim = axis_dim;
            ui.horizontal(|ui| {
                ui.label("X-axis");
                egui::ComboBox::from_id_salt(("x_axis", self.window_number))
                    .selected_text(names[axis_dim].clone())
                    .show_ui(ui, |ui| {
                        for (d, name) in names.iter().enumerate() {
                            ui.selectable_value(&mut dim, d, name.as_str());
                        }
                    });
            });
            if dim != axis_dim {
                self.set_axis_dimension(0, dim);
            }
        }

        let mut changed = None;
        for dim in self.collector.sliced_dimensions() {
            let mut index = self.collector.slice_index(dim).unwrap_or(0);
            let max = shape[dim].saturating_sub(1);
            ui.horizontal(|ui| {
                ui.label(names[dim].as_str());
                if ui
                    .add(egui::DragValue::new(&mut index).range(0..=max))
                    .changed()
                {
                    changed = Some((dim, index));
                }
            });
        }
        if let Some((dim, index)) = changed {
            self.set_slice_index(dim, index);
        }
    }
}
