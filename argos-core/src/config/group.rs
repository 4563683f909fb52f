//! Data-less config tree item that only groups its children.

use crate::editor::{CtiEditor, EditorDelegate};
use crate::value::CtiValue;
use crate::{Error, Result};

/// Grouping node. It holds no value and has no editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupCti;

impl GroupCti {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl super::Cti for GroupCti {
    fn type_name(&self) -> &'static str {
        "group"
    }

    fn data(&self) -> CtiValue {
        CtiValue::None
    }

    fn default_data(&self) -> CtiValue {
        CtiValue::None
    }

    fn set_data(&mut self, value: &CtiValue) -> Result<()> {
        match value {
            CtiValue::None => Ok(()),
            other => Err(other.coercion_error("no value")),
        }
    }

    fn reset_to_default(&mut self) {}

    fn is_editable(&self) -> bool {
        false
    }

    fn create_editor(&self, _delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>> {
        Err(Error::NotEditable(self.type_name().to_string()))
    }
}
