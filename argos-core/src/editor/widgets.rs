//! Toolkit-neutral widget models mounted by config tree editors.
//!
//! Each model keeps the state a real widget would hold and exposes the
//! widget's notifications as [`Signal`]s. The GUI renders these models and
//! forwards user interaction through the `activate`, `set_value`, `toggle`
//! and `finish_editing` style methods, which emit the same notifications a
//! native widget would.

use crate::signal::Signal;
use crate::value::CtiValue;

/// One entry of a [`ComboBox`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComboItem {
    /// Text shown for the entry.
    pub label: String,
    /// Opaque payload attached to the entry.
    pub user_data: Option<CtiValue>,
}

/// Selection widget with a list of labeled entries.
#[derive(Debug, Default)]
pub struct ComboBox {
    items: Vec<ComboItem>,
    current_index: Option<usize>,
    /// Emitted when the user picks an entry, even if it was already current.
    pub activated: Signal<usize>,
    /// Emitted when the current index changes, by the user or programmatically.
    pub current_index_changed: Signal<usize>,
}

impl ComboBox {
    /// Creates an empty combo box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends entries without payloads. The first entry becomes current.
    pub fn add_items<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(labels.into_iter().map(|label| ComboItem {
            label: label.into(),
            user_data: None,
        }));
        if self.current_index.is_none() && !self.items.is_empty() {
            self.current_index = Some(0);
        }
    }

    /// Attaches a payload to an entry. Returns `false` for a bad index.
    pub fn set_item_data(&mut self, index: usize, data: CtiValue) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.user_data = Some(data);
                true
            }
            None => false,
        }
    }

    /// Returns the entries.
    pub fn items(&self) -> &[ComboItem] {
        &self.items
    }

    /// Returns the number of entries.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the label of an entry.
    pub fn item_text(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.label.as_str())
    }

    /// Returns the payload of an entry.
    pub fn item_data(&self, index: usize) -> Option<&CtiValue> {
        self.items.get(index).and_then(|item| item.user_data.as_ref())
    }

    /// Returns the current index, `None` when the box is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Returns the label of the current entry.
    pub fn current_text(&self) -> &str {
        self.current_index
            .and_then(|i| self.item_text(i))
            .unwrap_or_default()
    }

    /// Programmatically selects an entry. Out of range indices are ignored.
    pub fn set_current_index(&mut self, index: usize) {
        if index >= self.items.len() || self.current_index == Some(index) {
            return;
        }
        self.current_index = Some(index);
        self.current_index_changed.emit(&index);
    }

    /// Selects an entry as the user would, emitting `activated`.
    pub fn activate(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.set_current_index(index);
        self.activated.emit(&index);
    }
}

/// Numeric stepper for floating point values.
#[derive(Debug)]
pub struct SpinBox {
    value: f64,
    minimum: f64,
    maximum: f64,
    single_step: f64,
    decimals: u32,
    keyboard_tracking: bool,
    pending_text: Option<String>,
    /// Emitted with the new value whenever the value changes.
    pub value_changed: Signal<f64>,
    /// Emitted when the user finishes editing (enter or focus out).
    pub editing_finished: Signal<()>,
}

impl Default for SpinBox {
    fn default() -> Self {
        Self {
            value: 0.0,
            minimum: 0.0,
            maximum: 99.99,
            single_step: 1.0,
            decimals: 2,
            keyboard_tracking: true,
            pending_text: None,
            value_changed: Signal::new(),
            editing_finished: Signal::new(),
        }
    }
}

impl SpinBox {
    /// Creates a spin box with the range `[0, 99.99]` and two decimals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn single_step(&self) -> f64 {
        self.single_step
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn keyboard_tracking(&self) -> bool {
        self.keyboard_tracking
    }

    /// Text typed but not yet applied (keyboard tracking off).
    pub fn pending_text(&self) -> Option<&str> {
        self.pending_text.as_deref()
    }

    /// Sets the lower bound, raising the upper bound if needed.
    pub fn set_minimum(&mut self, minimum: f64) {
        self.minimum = self.round(minimum);
        if self.maximum < self.minimum {
            self.maximum = self.minimum;
        }
        self.set_value(self.value);
    }

    /// Sets the upper bound, lowering the lower bound if needed.
    pub fn set_maximum(&mut self, maximum: f64) {
        self.maximum = self.round(maximum);
        if self.minimum > self.maximum {
            self.minimum = self.maximum;
        }
        self.set_value(self.value);
    }

    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        self.set_minimum(minimum);
        self.set_maximum(maximum);
    }

    pub fn set_single_step(&mut self, step: f64) {
        if step.is_finite() && step >= 0.0 {
            self.single_step = step;
        }
    }

    /// Sets the display precision. Bounds and value are rounded to it.
    pub fn set_decimals(&mut self, decimals: u32) {
        self.decimals = decimals;
        self.minimum = self.round(self.minimum);
        self.maximum = self.round(self.maximum);
        self.set_value(self.value);
    }

    /// Enables or disables committing every keystroke.
    pub fn set_keyboard_tracking(&mut self, enabled: bool) {
        self.keyboard_tracking = enabled;
    }

    /// Sets the value, clamped to the range and rounded to the decimals.
    ///
    /// Emits `value_changed` if the resulting value differs. NaN is ignored.
    #[allow(clippy::float_cmp)]
    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        let new_value = self.round(value.clamp(self.minimum, self.maximum));
        if new_value != self.value {
            self.value = new_value;
            self.value_changed.emit(&new_value);
        }
    }

    /// Moves the value by a number of single steps.
    pub fn step_by(&mut self, steps: i32) {
        self.set_value(self.value + f64::from(steps) * self.single_step);
    }

    /// Replaces the typed text.
    ///
    /// With keyboard tracking the text is applied immediately, otherwise it
    /// is kept until [`SpinBox::finish_editing`].
    pub fn type_text(&mut self, text: &str) {
        if self.keyboard_tracking {
            if let Ok(value) = text.trim().parse::<f64>() {
                self.set_value(value);
            }
        } else {
            self.pending_text = Some(text.to_string());
        }
    }

    /// Applies pending text and emits `editing_finished`.
    pub fn finish_editing(&mut self) {
        if let Some(text) = self.pending_text.take() {
            if let Ok(value) = text.trim().parse::<f64>() {
                self.set_value(value);
            }
        }
        self.editing_finished.emit(&());
    }

    /// Returns the value formatted with the configured decimals.
    pub fn text(&self) -> String {
        format!("{:.*}", self.decimals as usize, self.value)
    }

    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(i32::try_from(self.decimals).unwrap_or(i32::MAX));
        let scaled = value * factor;
        if scaled.is_finite() && factor.is_finite() {
            scaled.round() / factor
        } else {
            value
        }
    }
}

/// Two-state toggle.
#[derive(Debug, Default)]
pub struct CheckBox {
    checked: bool,
    /// Emitted with the new state when the state changes.
    pub toggled: Signal<bool>,
}

impl CheckBox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state, emitting `toggled` if it changes.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.toggled.emit(&checked);
        }
    }

    /// Flips the state as a user click would.
    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }
}

/// Single line text input.
#[derive(Debug, Default)]
pub struct LineEdit {
    text: String,
    /// Emitted when the user finishes editing (enter or focus out).
    pub editing_finished: Signal<()>,
}

impl LineEdit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for text input widgets.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn finish_editing(&mut self) {
        self.editing_finished.emit(&());
    }
}
