//! Boolean config tree item, edited with a check box.

use crate::editor::{CheckBox, CtiEditor, EditorDelegate, EditorWidget};
use crate::signal::ConnectionId;
use crate::value::CtiValue;
use crate::{Error, Result};

/// Config tree item storing a bool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolCti {
    data: bool,
    default_data: bool,
}

impl BoolCti {
    #[must_use]
    pub fn new(default_data: bool) -> Self {
        Self {
            data: default_data,
            default_data,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: bool) -> Self {
        self.data = data;
        self
    }

    pub fn value(&self) -> bool {
        self.data
    }
}

impl super::Cti for BoolCti {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn data(&self) -> CtiValue {
        CtiValue::Bool(self.data)
    }

    fn default_data(&self) -> CtiValue {
        CtiValue::Bool(self.default_data)
    }

    fn set_data(&mut self, value: &CtiValue) -> Result<()> {
        self.data = value.coerce_bool()?;
        Ok(())
    }

    fn reset_to_default(&mut self) {
        self.data = self.default_data;
    }

    fn create_editor(&self, delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>> {
        Ok(Box::new(BoolCtiEditor::new(delegate)))
    }
}

/// Editor with a check box. Every toggle is committed right away.
#[derive(Debug)]
pub struct BoolCtiEditor {
    check_box: CheckBox,
    connection: Option<ConnectionId>,
}

impl BoolCtiEditor {
    pub fn new(delegate: &EditorDelegate) -> Self {
        let check_box = CheckBox::new();
        let handle = delegate.clone();
        let connection = check_box.toggled.connect(move |_| handle.commit_data());
        Self {
            check_box,
            connection: Some(connection),
        }
    }

    pub fn check_box(&mut self) -> &mut CheckBox {
        &mut self.check_box
    }
}

impl CtiEditor for BoolCtiEditor {
    fn set_data(&mut self, data: &CtiValue) -> Result<()> {
        if self.connection.is_none() {
            return Err(Error::EditorFinalized);
        }
        self.check_box.set_checked(data.coerce_bool()?);
        Ok(())
    }

    fn data(&self) -> CtiValue {
        CtiValue::Bool(self.check_box.is_checked())
    }

    fn widget_mut(&mut self) -> EditorWidget<'_> {
        EditorWidget::CheckBox(&mut self.check_box)
    }

    fn finalize(&mut self) {
        if let Some(id) = self.connection.take() {
            self.check_box.toggled.disconnect(id);
        }
    }

    fn is_finalized(&self) -> bool {
        self.connection.is_none()
    }
}
