//! Editor binding between a config tree item and an interactive widget.
//!
//! An editor lives only while a tree cell is in edit mode. It mounts one
//! widget model, mirrors the item's value into it, relays edits to the
//! [`EditorDelegate`] and releases its signal connections in
//! [`CtiEditor::finalize`].

mod session;
pub mod widgets;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::value::CtiValue;
use crate::Result;

pub use session::{EditSession, SessionStatus};
pub use widgets::{CheckBox, ComboBox, ComboItem, LineEdit, SpinBox};

/// Notification sent from an editor to its delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// The editor holds a value that should be written to the item.
    CommitData,
    /// The edit session should end.
    CloseEditor,
}

/// Receives commit and close notifications from editors.
///
/// Cloning yields another handle to the same queue, so the closures an
/// editor connects to its widget signals can each own one.
#[derive(Debug, Clone, Default)]
pub struct EditorDelegate {
    events: Rc<RefCell<VecDeque<EditorEvent>>>,
}

impl EditorDelegate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the editor's data is written to the item.
    pub fn commit_data(&self) {
        self.events.borrow_mut().push_back(EditorEvent::CommitData);
    }

    /// Requests that the edit session ends.
    pub fn close_editor(&self) {
        self.events.borrow_mut().push_back(EditorEvent::CloseEditor);
    }

    /// Commit followed by close; used by single-click editors.
    pub fn commit_and_close(&self) {
        self.commit_data();
        self.close_editor();
    }

    /// Removes and returns all pending notifications in order.
    pub fn take_events(&self) -> Vec<EditorEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Returns true if notifications are waiting.
    pub fn has_pending(&self) -> bool {
        !self.events.borrow().is_empty()
    }
}

/// Mutable view on the widget model an editor has mounted.
///
/// The GUI matches on this to decide how to render the editor.
#[derive(Debug)]
pub enum EditorWidget<'a> {
    ComboBox(&'a mut ComboBox),
    SpinBox(&'a mut SpinBox),
    CheckBox(&'a mut CheckBox),
    LineEdit(&'a mut LineEdit),
}

/// A transient widget binding for one config tree item.
pub trait CtiEditor: std::fmt::Debug {
    /// Puts a value into the widget.
    ///
    /// # Errors
    /// Returns an error if the value cannot be shown by the widget or the
    /// editor is finalized.
    fn set_data(&mut self, data: &CtiValue) -> Result<()>;

    /// Reads the value from the widget.
    fn data(&self) -> CtiValue;

    /// Returns the mounted widget model.
    fn widget_mut(&mut self) -> EditorWidget<'_>;

    /// Detaches all signal handlers. Calling it again has no effect.
    fn finalize(&mut self);

    /// Returns true once [`CtiEditor::finalize`] has run.
    fn is_finalized(&self) -> bool;
}
