//! Main window: repository tree, inspector config and the inspector view.

use std::path::{Path, PathBuf};

use argos_core::EditSession;
use argos_io::{ArrayCollector, RepoTreeItem};

use crate::context::AppContext;
use crate::inspector::{Inspector, InspectorError, LinePlot1d};
use crate::settings::WindowSettings;

/// One top-level window with its own data selection and inspector.
#[derive(Debug)]
pub struct MainWindow {
    pub(crate) window_number: usize,
    pub(crate) context: AppContext,
    pub(crate) files: Vec<PathBuf>,
    pub(crate) repository: Vec<RepoTreeItem>,
    pub(crate) selected_rti: Option<String>,
    pub(crate) collector: ArrayCollector,
    pub(crate) inspector: LinePlot1d,
    pub(crate) edit_session: Option<EditSession>,
    /// Error of the last failed action, shown in place of the plot.
    pub(crate) last_error: Option<String>,
    pub(crate) open: bool,
}

impl MainWindow {
    /// # Errors
    /// Fails if the inspector cannot be created.
    pub fn new(window_number: usize, context: AppContext) -> Result<Self, InspectorError> {
        let inspector = LinePlot1d::new(window_number, &context)?;
        let collector = ArrayCollector::new(inspector.axes_names().len());
        let mut window = Self {
            window_number,
            context,
            files: Vec::new(),
            repository: Vec::new(),
            selected_rti: None,
            collector,
            inspector,
            edit_session: None,
            last_error: None,
            open: true,
        };
        window.redraw();
        Ok(window)
    }

    pub fn window_number(&self) -> usize {
        self.window_number
    }

    pub fn title(&self) -> String {
        format!("Argos #{} ({})", self.window_number, self.context.profile)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn repository(&self) -> &[RepoTreeItem] {
        &self.repository
    }

    pub fn selected_rti(&self) -> Option<&str> {
        self.selected_rti.as_deref()
    }

    pub fn collector(&self) -> &ArrayCollector {
        &self.collector
    }

    pub fn inspector(&self) -> &LinePlot1d {
        &self.inspector
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Opens data files and adds them to the repository tree.
    ///
    /// Files that fail to open are skipped; the last failure is kept as the
    /// window's error.
    pub fn open_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            self.open_file(path);
        }
    }

    fn open_file(&mut self, path: &Path) {
        match argos_io::open_file(path) {
            Ok(root) => {
                self.files.push(path.to_path_buf());
                self.repository.push(root);
            }
            Err(e) => {
                log::error!("Unable to open {}: {e}", path.display());
                self.last_error = Some(format!("Unable to open {}: {e}", path.display()));
            }
        }
    }

    /// Shows the array at `node_path` in the inspector.
    ///
    /// Selecting a group or an unknown path clears the selection.
    pub fn select_rti(&mut self, node_path: &str) {
        let array = self
            .repository
            .iter()
            .find_map(|root| root.find(node_path))
            .and_then(RepoTreeItem::as_array);
        match array {
            Some(array) => {
                self.collector.set_rti(array.clone());
                self.selected_rti = Some(node_path.to_string());
            }
            None => {
                self.collector.clear();
                self.selected_rti = None;
            }
        }
        self.redraw();
    }

    /// Redraws the inspector from the config and the current selection.
    pub fn redraw(&mut self) {
        self.last_error = match self.inspector.draw_contents(&self.collector) {
            Ok(()) => None,
            Err(InspectorError::NoData) if self.selected_rti.is_none() => None,
            Err(e) => Some(e.to_string()),
        };
    }

    /// Sets the slice index of a data dimension and redraws.
    pub fn set_slice_index(&mut self, dim: usize, index: usize) {
        match self.collector.set_slice_index(dim, index) {
            Ok(()) => self.redraw(),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Shows data dimension `dim` on the inspector axis `axis` and redraws.
    pub fn set_axis_dimension(&mut self, axis: usize, dim: usize) {
        match self.collector.set_axis_dimension(axis, dim) {
            Ok(()) => self.redraw(),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Config path of the item being edited.
    pub fn editing_path(&self) -> Option<&str> {
        self.edit_session.as_ref().map(EditSession::path)
    }

    pub fn edit_session_mut(&mut self) -> Option<&mut EditSession> {
        self.edit_session.as_mut()
    }

    /// Opens an editor for the config item at `path`, ending any other edit.
    pub fn start_editing(&mut self, path: &str) {
        self.edit_session = None;
        match EditSession::open(self.inspector.config(), path) {
            Ok(session) => self.edit_session = Some(session),
            Err(e) => log::debug!("Not editing {path:?}: {e}"),
        }
    }

    /// Ends the current edit without committing.
    pub fn cancel_editing(&mut self) {
        self.edit_session = None;
    }

    /// Applies the notifications of the open editor and redraws on commit.
    pub fn process_edit_events(&mut self) {
        let Some(session) = self.edit_session.as_mut() else {
            return;
        };
        match session.process_events(self.inspector.config_mut()) {
            Ok(status) => {
                if status.committed {
                    self.redraw();
                }
                if status.closed {
                    self.edit_session = None;
                }
            }
            Err(e) => {
                log::warn!("Edit of {:?} rejected: {e}", session.path());
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Restores all config items to their defaults.
    pub fn reset_config(&mut self) {
        self.edit_session = None;
        self.inspector.config_mut().reset_to_default(true);
        self.redraw();
    }

    pub fn view_settings(&self) -> WindowSettings {
        WindowSettings {
            files: self.files.clone(),
            selected_rti: self.selected_rti.clone(),
            inspector_config: self.inspector.config().values_by_path().into_iter().collect(),
        }
    }

    /// Reopens the files, config and selection of a saved window.
    pub fn apply_view_settings(&mut self, settings: &WindowSettings) {
        self.open_files(&settings.files);
        let applied = self
            .inspector
            .config_mut()
            .apply_values(settings.inspector_config.clone());
        log::debug!("Applied {applied} config values to window {}", self.window_number);
        match &settings.selected_rti {
            Some(path) => self.select_rti(path),
            None => self.redraw(),
        }
    }

    /// Ends editing and releases the inspector.
    pub fn finalize(&mut self) {
        self.edit_session = None;
        self.inspector.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use argos_core::{Collector, CtiValue, EditorWidget};
    use argos_io::ArrayRti;
    use ndarray::{ArrayD, IxDyn};

    fn window() -> MainWindow {
        let mut window = MainWindow::new(0, AppContext::default()).unwrap();
        let mut root = RepoTreeItem::group("data.h5");
        root.insert_child(RepoTreeItem::Array(ArrayRti::new(
            "line",
            ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.0, 2.0, 3.0]).unwrap(),
        )))
        .unwrap();
        window.repository.push(root);
        window
    }

    #[test]
    fn test_new_window_has_no_error() {
        let window = MainWindow::new(1, AppContext::default()).unwrap();
        assert!(window.last_error().is_none());
        assert!(window.is_open());
        assert_eq!(window.title(), "Argos #1 (Panoptes)");
    }

    #[test]
    fn test_select_rti_draws_data() {
        let mut window = window();
        window.select_rti("/data.h5/line");
        assert_eq!(window.selected_rti(), Some("/data.h5/line"));
        assert!(window.last_error().is_none());
        let plot = window.inspector().plot().unwrap();
        assert_eq!(plot.data.as_deref(), Some(&[1.0, 2.0, 3.0][..]));

        window.select_rti("/data.h5");
        assert!(window.selected_rti().is_none());
        assert!(window.collector().rti_node_path().is_none());
    }

    #[test]
    fn test_editing_commits_and_redraws() {
        let mut window = window();
        window.select_rti("/data.h5/line");
        window.start_editing("logarithmic/Y-axis");
        assert_eq!(window.editing_path(), Some("logarithmic/Y-axis"));

        if let Some(session) = window.edit_session_mut() {
            if let EditorWidget::CheckBox(check_box) = session.widget_mut() {
                check_box.toggle();
            }
        }
        window.process_edit_events();
        assert!(window.inspector().plot().unwrap().log_y);
        // Check boxes stay open until the selection changes.
        assert!(window.editing_path().is_some());

        window.start_editing("grid");
        assert!(window.editing_path().is_none());
    }

    #[test]
    fn test_view_settings_restore_config_and_selection() {
        let mut source = window();
        source.select_rti("/data.h5/line");
        source
            .inspector
            .config_mut()
            .find_mut("pen width")
            .unwrap()
            .set_data(3.0)
            .unwrap();
        let settings = source.view_settings();
        assert_eq!(
            settings.inspector_config.get("pen width"),
            Some(&CtiValue::Float(3.0))
        );

        let mut target = window();
        target.apply_view_settings(&settings);
        assert_eq!(target.selected_rti(), Some("/data.h5/line"));
        assert_relative_eq!(
            target.inspector().config().config_float("pen width").unwrap(),
            3.0
        );
    }

    #[test]
    fn test_reset_config() {
        let mut window = window();
        window
            .inspector
            .config_mut()
            .find_mut("grid/X-axis")
            .unwrap()
            .set_data(false)
            .unwrap();
        window.reset_config();
        assert!(window.inspector().plot().unwrap().grid_x);
    }

    #[test]
    fn test_unsupported_file_sets_error() {
        let mut window = window();
        window.open_files(&[PathBuf::from("notes.txt")]);
        assert!(window.last_error().unwrap().contains("notes.txt"));
        assert_eq!(window.repository().len(), 1);
    }
}
