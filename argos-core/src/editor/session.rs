//! Edit session: one editor bound to one config tree item by path.

use crate::config::ConfigTreeItem;
use crate::editor::{CtiEditor, EditorDelegate, EditorEvent, EditorWidget};
use crate::Result;

/// Outcome of [`EditSession::process_events`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStatus {
    /// The editor's data was written to the item.
    pub committed: bool,
    /// The editor asked to be closed and has been finalized.
    pub closed: bool,
}

/// An open editor for the item at `path`.
///
/// The session owns the editor and the delegate queue the editor reports
/// to. Dropping the session finalizes the editor, so cancelling an edit is
/// simply dropping it.
#[derive(Debug)]
pub struct EditSession {
    path: String,
    editor: Box<dyn CtiEditor>,
    delegate: EditorDelegate,
}

impl EditSession {
    /// Creates the editor for the item at `path` and loads the item's data.
    ///
    /// Notifications caused by loading the initial data are discarded.
    ///
    /// # Errors
    /// Fails if the path does not resolve, the item is not editable, or the
    /// editor cannot show the item's data.
    pub fn open(root: &ConfigTreeItem, path: &str) -> Result<Self> {
        let item = root.find(path)?;
        let delegate = EditorDelegate::new();
        let mut editor = item.create_editor(&delegate)?;
        editor.set_data(&item.data())?;
        delegate.take_events();
        log::debug!("Opened {} editor for {path:?}", item.cti().type_name());
        Ok(Self {
            path: path.to_string(),
            editor,
            delegate,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn editor(&self) -> &dyn CtiEditor {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> &mut dyn CtiEditor {
        self.editor.as_mut()
    }

    pub fn widget_mut(&mut self) -> EditorWidget<'_> {
        self.editor.widget_mut()
    }

    /// Returns true once the editor has been finalized.
    pub fn is_closed(&self) -> bool {
        self.editor.is_finalized()
    }

    /// Handles the notifications the editor has sent since the last call.
    ///
    /// Commits write the editor's data into the item at the session's path;
    /// a close request finalizes the editor. All notifications are handled
    /// even when a commit fails.
    ///
    /// # Errors
    /// Returns the first commit error.
    pub fn process_events(&mut self, root: &mut ConfigTreeItem) -> Result<SessionStatus> {
        let mut status = SessionStatus::default();
        let mut first_error = None;
        for event in self.delegate.take_events() {
            match event {
                EditorEvent::CommitData => match self.commit(root) {
                    Ok(()) => status.committed = true,
                    Err(e) => {
                        first_error.get_or_insert(e);
                    }
                },
                EditorEvent::CloseEditor => {
                    self.editor.finalize();
                    status.closed = true;
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(status),
        }
    }

    /// Writes the editor's current data into the item.
    ///
    /// # Errors
    /// Fails if the item no longer exists or rejects the data.
    pub fn commit(&mut self, root: &mut ConfigTreeItem) -> Result<()> {
        let data = self.editor.data();
        let item = root.find_mut(&self.path)?;
        item.cti_mut().set_data(&data)?;
        log::debug!("Committed {data:?} to {:?}", self.path);
        Ok(())
    }

    /// Commits and ends the session.
    ///
    /// # Errors
    /// Fails like [`EditSession::commit`]; the editor is finalized either way.
    pub fn commit_and_close(mut self, root: &mut ConfigTreeItem) -> Result<()> {
        let result = self.commit(root);
        self.editor.finalize();
        result
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        self.editor.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoolCti, ColorCti, FloatCti};
    use crate::value::CtiValue;
    use crate::Error;

    fn tree() -> ConfigTreeItem {
        let mut root = ConfigTreeItem::group("root").unwrap();
        root.insert_child(ConfigTreeItem::new("flag", BoolCti::new(false)).unwrap())
            .unwrap();
        root.insert_child(
            ConfigTreeItem::new("width", FloatCti::new(2.0).with_range(0.0, 10.0)).unwrap(),
        )
        .unwrap();
        let color = ColorCti::from_hex("#000000").unwrap();
        root.insert_child(ConfigTreeItem::new("color", color).unwrap())
            .unwrap();
        root
    }

    #[test]
    fn test_open_discards_initial_notifications() {
        let mut root = tree();
        root.find_mut("flag").unwrap().set_data(true).unwrap();
        let mut session = EditSession::open(&root, "flag").unwrap();
        let status = session.process_events(&mut root).unwrap();
        assert_eq!(status, SessionStatus::default());
        assert_eq!(session.editor().data(), CtiValue::Bool(true));
    }

    #[test]
    fn test_open_fails_for_groups_and_unknown_paths() {
        let root = tree();
        assert!(matches!(
            EditSession::open(&root, ""),
            Err(Error::NotEditable(_))
        ));
        assert!(matches!(
            EditSession::open(&root, "missing"),
            Err(Error::PathNotFound(_))
        ));
    }

    #[test]
    fn test_drop_finalizes_without_commit() {
        let root = tree();
        {
            let mut session = EditSession::open(&root, "width").unwrap();
            if let EditorWidget::SpinBox(spin) = session.widget_mut() {
                spin.set_value(7.0);
            }
        }
        assert!((root.config_float("width").unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_commit_keeps_item_and_reports_error() {
        let mut root = tree();
        let mut session = EditSession::open(&root, "color").unwrap();
        if let EditorWidget::LineEdit(edit) = session.widget_mut() {
            edit.set_text("not a color");
            edit.finish_editing();
        }
        assert!(matches!(
            session.process_events(&mut root),
            Err(Error::TypeCoercion { .. })
        ));
        assert_eq!(root.find("color").unwrap().display_value(), "#000000");
    }

    #[test]
    fn test_commit_and_close_ignores_unfinished_text() {
        let mut root = tree();
        let mut session = EditSession::open(&root, "width").unwrap();
        if let EditorWidget::SpinBox(spin) = session.widget_mut() {
            spin.type_text("4.5");
        }
        session.commit_and_close(&mut root).unwrap();
        assert!((root.config_float("width").unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_finished_text_is_committed() {
        let mut root = tree();
        let mut session = EditSession::open(&root, "width").unwrap();
        if let EditorWidget::SpinBox(spin) = session.widget_mut() {
            spin.type_text("4.5");
            spin.finish_editing();
        }
        let status = session.process_events(&mut root).unwrap();
        assert!(status.committed);
        assert!(!status.closed);
        assert!((root.config_float("width").unwrap() - 4.5).abs() < f64::EPSILON);
    }
}
