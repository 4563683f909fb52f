//! Floating point config tree item and its spin box editor.

use crate::editor::{CtiEditor, EditorDelegate, EditorWidget, SpinBox};
use crate::signal::ConnectionId;
use crate::value::CtiValue;
use crate::{Error, Result};

/// Config tree item storing an `f64`.
///
/// The bounds only apply to editing: the editor clamps values to
/// `[min_value, max_value]`, while [`super::Cti::set_data`] only coerces.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatCti {
    data: f64,
    default_data: f64,
    min_value: Option<f64>,
    max_value: Option<f64>,
    step_size: f64,
    decimals: u32,
}

impl FloatCti {
    /// Creates an unbounded item with step 1 and two decimals.
    #[must_use]
    pub fn new(default_data: f64) -> Self {
        Self {
            data: default_data,
            default_data,
            min_value: None,
            max_value: None,
            step_size: 1.0,
            decimals: 2,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: f64) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_min(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    #[must_use]
    pub fn with_range(self, min_value: f64, max_value: f64) -> Self {
        self.with_min(min_value).with_max(max_value)
    }

    /// Sets the editing increment. Non-positive steps are ignored.
    #[must_use]
    pub fn with_step(mut self, step_size: f64) -> Self {
        if step_size.is_finite() && step_size > 0.0 {
            self.step_size = step_size;
        } else {
            log::warn!("Ignoring invalid step size {step_size}, keeping {}", self.step_size);
        }
        self
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn value(&self) -> f64 {
        self.data
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Formats a value with the configured number of decimals.
    pub fn data_to_string(&self, data: f64) -> String {
        format!("{:.*}", self.decimals as usize, data)
    }
}

impl super::Cti for FloatCti {
    fn type_name(&self) -> &'static str {
        "float"
    }

    fn data(&self) -> CtiValue {
        CtiValue::Float(self.data)
    }

    fn default_data(&self) -> CtiValue {
        CtiValue::Float(self.default_data)
    }

    fn set_data(&mut self, value: &CtiValue) -> Result<()> {
        self.data = value.coerce_float()?;
        Ok(())
    }

    fn reset_to_default(&mut self) {
        self.data = self.default_data;
    }

    fn display_value(&self) -> String {
        self.data_to_string(self.data)
    }

    fn display_default_value(&self) -> String {
        self.data_to_string(self.default_data)
    }

    fn debug_info(&self) -> String {
        format!(
            "min = {}, max = {}, step = {}, decimals = {}",
            fmt_bound(self.min_value),
            fmt_bound(self.max_value),
            self.step_size,
            self.decimals
        )
    }

    fn create_editor(&self, delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>> {
        Ok(Box::new(FloatCtiEditor::new(self, delegate)))
    }
}

pub(super) fn fmt_bound<T: std::fmt::Display>(bound: Option<T>) -> String {
    bound.map_or_else(|| "None".to_string(), |b| b.to_string())
}

/// Editor with a spin box.
///
/// Keyboard tracking is off, so typed text is only committed when editing
/// finishes. Each value change is pushed to the delegate as a commit so
/// dependent views can refresh while the editor stays open.
#[derive(Debug)]
pub struct FloatCtiEditor {
    spin_box: SpinBox,
    connection: Option<ConnectionId>,
}

impl FloatCtiEditor {
    pub fn new(cti: &FloatCti, delegate: &EditorDelegate) -> Self {
        let mut spin_box = SpinBox::new();
        spin_box.set_decimals(cti.decimals);
        spin_box.set_minimum(cti.min_value.unwrap_or(f64::MIN));
        spin_box.set_maximum(cti.max_value.unwrap_or(f64::MAX));
        spin_box.set_single_step(cti.step_size);
        spin_box.set_keyboard_tracking(false);

        let handle = delegate.clone();
        let connection = spin_box.value_changed.connect(move |value: &f64| {
            log::debug!("Float editor value changed: {value}");
            handle.commit_data();
        });
        Self {
            spin_box,
            connection: Some(connection),
        }
    }

    pub fn spin_box(&mut self) -> &mut SpinBox {
        &mut self.spin_box
    }
}

impl CtiEditor for FloatCtiEditor {
    fn set_data(&mut self, data: &CtiValue) -> Result<()> {
        if self.connection.is_none() {
            return Err(Error::EditorFinalized);
        }
        self.spin_box.set_value(data.coerce_float()?);
        Ok(())
    }

    fn data(&self) -> CtiValue {
        CtiValue::Float(self.spin_box.value())
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
