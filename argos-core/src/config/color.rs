//! Color config tree item, edited as `#RRGGBB` text.

use crate::editor::{CtiEditor, EditorDelegate, EditorWidget, LineEdit};
use crate::signal::ConnectionId;
use crate::value::{Color, CtiValue};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCti {
    data: Color,
    default_data: Color,
}

impl ColorCti {
    #[must_use]
    pub fn new(default_data: Color) -> Self {
        Self {
            data: default_data,
            default_data,
        }
    }

    /// Creates the item from a `#RRGGBB` string.
    ///
    /// # Errors
    /// Returns [`Error::TypeCoercion`] if the string is not a valid color.
    pub fn from_hex(default_data: &str) -> Result<Self> {
        Ok(Self::new(default_data.parse()?))
    }

    pub fn value(&self) -> Color {
        self.data
    }
}

impl super::Cti for ColorCti {
    fn type_name(&self) -> &'static str {
        "color"
    }

    fn data(&self) -> CtiValue {
        CtiValue::Color(self.data)
    }

    fn default_data(&self) -> CtiValue {
        CtiValue::Color(self.default_data)
    }

    fn set_data(&mut self, value: &CtiValue) -> Result<()> {
        self.data = value.coerce_color()?;
        Ok(())
    }

    fn reset_to_default(&mut self) {
        self.data = self.default_data;
    }

    fn create_editor(&self, delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>> {
        Ok(Box::new(ColorCtiEditor::new(delegate)))
    }
}

/// Editor with a line edit; commits when editing finishes.
#[derive(Debug)]
pub struct ColorCtiEditor {
    line_edit: LineEdit,
    connection: Option<ConnectionId>,
}

impl ColorCtiEditor {
    pub fn new(delegate: &EditorDelegate) -> Self {
        let line_edit = LineEdit::new();
        let handle = delegate.clone();
        let connection = line_edit
            .editing_finished
            .connect(move |_| handle.commit_data());
        Self {
            line_edit,
            connection: Some(connection),
        }
    }

    pub fn line_edit(&mut self) -> &mut LineEdit {
        &mut self.line_edit
    }
}

impl CtiEditor for ColorCtiEditor {
    fn set_data(&mut self, data: &CtiValue) -> Result<()> {
        if self.connection.is_none() {
            return Err(Error::EditorFinalized);
        }
        self.line_edit.set_text(data.coerce_color()?.to_string());
        Ok(())
    }

    /// Returns the parsed color, or the raw text when it does not parse so
    /// that committing it reports the coercion error.
    fn data(&self) -> CtiValue {
        let text = self.line_edit.text();
        text.parse::<Color>()
            .map_or_else(|_| CtiValue::from(text), CtiValue::Color)
    }

    fn widget_mut(&mut self) -> EditorWidget<'_> {
        EditorWidget::LineEdit(&mut self.line_edit)
    }

    fn finalize(&mut self) {
        if let Some(id) = self.connection.take() {
            self.line_edit.editing_finished.disconnect(id);
        }
    }

    fn is_finalized(&self) -> bool {
        self.connection.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cti;

    #[test]
    fn test_color_from_text() {
        let mut cti = ColorCti::from_hex("#3F8E3A").unwrap();
        assert_eq!(cti.display_value(), "#3F8E3A");
        cti.set_data(&CtiValue::from("#ff0000")).unwrap();
        assert_eq!(cti.value(), Color::new(255, 0, 0));
        assert!(cti.set_data(&CtiValue::Float(1.0)).is_err());
        assert!(ColorCti::from_hex("red").is_err());
    }

    #[test]
    fn test_editor_returns_raw_text_when_invalid() {
        let delegate = EditorDelegate::new();
        let mut editor = ColorCtiEditor::new(&delegate);
        editor.set_data(&CtiValue::Color(Color::new(1, 2, 3))).unwrap();
        assert_eq!(editor.line_edit().text(), "#010203");

        editor.line_edit().set_text("#zzzzzz");
        editor.line_edit().finish_editing();
        assert!(delegate.has_pending());
        assert_eq!(editor.data(), CtiValue::from("#zzzzzz"));
    }
}
