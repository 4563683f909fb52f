//! Integer config tree item.

use crate::editor::{CtiEditor, EditorDelegate, EditorWidget, SpinBox};
use crate::signal::ConnectionId;
use crate::value::CtiValue;
use crate::{Error, Result};

use super::float::fmt_bound;

/// Config tree item storing an `i64`, edited with a spin box without decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntCti {
    data: i64,
    default_data: i64,
    min_value: Option<i64>,
    max_value: Option<i64>,
    step_size: i64,
}

impl IntCti {
    #[must_use]
    pub fn new(default_data: i64) -> Self {
        Self {
            data: default_data,
            default_data,
            min_value: None,
            max_value: None,
            step_size: 1,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: i64) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min_value: i64, max_value: i64) -> Self {
        self.min_value = Some(min_value);
        self.max_value = Some(max_value);
        self
    }

    /// Sets the editing increment. Non-positive steps are ignored.
    #[must_use]
    pub fn with_step(mut self, step_size: i64) -> Self {
        if step_size > 0 {
            self.step_size = step_size;
        } else {
            log::warn!("Ignoring invalid step size {step_size}, keeping {}", self.step_size);
        }
        self
    }

    pub fn value(&self) -> i64 {
        self.data
    }

    pub fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<i64> {
        self.max_value
    }

    pub fn step_size(&self) -> i64 {
        self.step_size
    }
}

impl super::Cti for IntCti {
    fn type_name(&self) -> &'static str {
        "int"
    }

    fn data(&self) -> CtiValue {
        CtiValue::Int(self.data)
    }

    fn default_data(&self) -> CtiValue {
        CtiValue::Int(self.default_data)
    }

    fn set_data(&mut self, value: &CtiValue) -> Result<()> {
        self.data = value.coerce_int()?;
        Ok(())
    }

    fn reset_to_default(&mut self) {
        self.data = self.default_data;
    }

    fn debug_info(&self) -> String {
        format!(
            "min = {}, max = {}, step = {}",
            fmt_bound(self.min_value),
            fmt_bound(self.max_value),
            self.step_size
        )
    }

    fn create_editor(&self, delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>> {
        Ok(Box::new(IntCtiEditor::new(self, delegate)))
    }
}

/// Editor with a spin box showing whole numbers.
#[derive(Debug)]
pub struct IntCtiEditor {
    spin_box: SpinBox,
    connection: Option<ConnectionId>,
}

impl IntCtiEditor {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(cti: &IntCti, delegate: &EditorDelegate) -> Self {
        let mut spin_box = SpinBox::new();
        spin_box.set_decimals(0);
        spin_box.set_minimum(cti.min_value.unwrap_or(i64::MIN) as f64);
        spin_box.set_maximum(cti.max_value.unwrap_or(i64::MAX) as f64);
        spin_box.set_single_step(cti.step_size as f64);
        spin_box.set_keyboard_tracking(false);

        let handle = delegate.clone();
        let connection = spin_box
            .value_changed
            .connect(move |_| handle.commit_data());
        Self {
            spin_box,
            connection: Some(connection),
        }
    }

    pub fn spin_box(&mut self) -> &mut SpinBox {
        &mut self.spin_box
    }
}

impl CtiEditor for IntCtiEditor {
    fn set_data(&mut self, data: &CtiValue) -> Result<()> {
        if self.connection.is_none() {
            return Err(Error::EditorFinalized);
        }
        let value = data.coerce_float()?;
        self.spin_box.set_value(value);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn data(&self) -> CtiValue {
        CtiValue::Int(self.spin_box.value() as i64)
    }

    fn widget_mut(&mut self) -> EditorWidget<'_> {
        EditorWidget::SpinBox(&mut self.spin_box)
    }

    fn finalize(&mut self) {
        if let Some(id) = self.connection.take() {
            self.spin_box.value_changed.disconnect(id);
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
    fn test_set_data_truncates_floats() {
        let mut cti = IntCti::new(0);
        cti.set_data(&CtiValue::Float(7.9)).unwrap();
        assert_eq!(cti.value(), 7);
        assert!(cti.set_data(&CtiValue::from("seven")).is_err());
        assert_eq!(cti.display_value(), "7");
    }

    #[test]
    fn test_editor_rounds_and_clamps() {
        let delegate = EditorDelegate::new();
        let cti = IntCti::new(5).with_range(0, 10).with_step(2);
        let mut editor = IntCtiEditor::new(&cti, &delegate);
        editor.set_data(&cti.data()).unwrap();
        assert_eq!(editor.data(), CtiValue::Int(5));

        editor.spin_box().set_value(2.6);
        assert_eq!(editor.data(), CtiValue::Int(3));
        editor.spin_box().step_by(10);
        assert_eq!(editor.data(), CtiValue::Int(10));
        assert_eq!(cti.debug_info(), "min = 0, max = 10, step = 2");
    }
}
