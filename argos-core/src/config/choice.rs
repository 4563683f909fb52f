//! Config tree item for a choice between labels, edited with a combo box.

use crate::editor::{ComboBox, CtiEditor, EditorDelegate, EditorWidget};
use crate::signal::ConnectionId;
use crate::value::CtiValue;
use crate::{Error, Result};

/// Config tree item storing the index of the selected choice.
///
/// `data` must lie in `[0, choices.len())`. This is a caller contract: it is
/// not checked when the data is set, but [`super::Cti::config_value`] fails
/// for an out of range index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceCti {
    data: usize,
    default_data: usize,
    choices: Vec<String>,
    user_data: Vec<CtiValue>,
}

impl ChoiceCti {
    /// Creates a choice item without user data.
    pub fn new<I, S>(default_data: usize, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: default_data,
            default_data,
            choices: choices.into_iter().map(Into::into).collect(),
            user_data: Vec::new(),
        }
    }

    /// Creates a choice item whose config value is taken from `user_data`.
    ///
    /// # Errors
    /// Returns [`Error::ChoiceSizeMismatch`] unless `user_data` is empty or as
    /// long as `choices`.
    pub fn with_user_data<I, S>(
        default_data: usize,
        choices: I,
        user_data: Vec<CtiValue>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cti = Self::new(default_data, choices);
        if !user_data.is_empty() && user_data.len() != cti.choices.len() {
            return Err(Error::ChoiceSizeMismatch {
                choices: cti.choices.len(),
                user_data: user_data.len(),
            });
        }
        cti.user_data = user_data;
        Ok(cti)
    }

    #[must_use]
    pub fn with_data(mut self, data: usize) -> Self {
        self.data = data;
        self
    }

    /// Returns the selected index.
    pub fn index(&self) -> usize {
        self.data
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn user_data(&self) -> &[CtiValue] {
        &self.user_data
    }

    fn label(&self, index: usize) -> String {
        self.choices
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("<invalid choice {index}>"))
    }
}

impl super::Cti for ChoiceCti {
    fn type_name(&self) -> &'static str {
        "choice"
    }

    fn data(&self) -> CtiValue {
        CtiValue::from(self.data)
    }

    fn default_data(&self) -> CtiValue {
        CtiValue::from(self.default_data)
    }

    fn set_data(&mut self, value: &CtiValue) -> Result<()> {
        let index = value.coerce_int()?;
        self.data = usize::try_from(index).map_err(|_| value.coercion_error("choice index"))?;
        Ok(())
    }

    fn reset_to_default(&mut self) {
        self.data = self.default_data;
    }

    fn config_value(&self) -> Result<CtiValue> {
        let out_of_range = || Error::ChoiceIndexOutOfRange {
            index: self.data,
            len: self.choices.len(),
        };
        if self.user_data.is_empty() {
            self.choices
                .get(self.data)
                .map(|label| CtiValue::Text(label.clone()))
                .ok_or_else(out_of_range)
        } else {
            self.user_data.get(self.data).cloned().ok_or_else(out_of_range)
        }
    }

    fn display_value(&self) -> String {
        self.label(self.data)
    }

    fn display_default_value(&self) -> String {
        self.label(self.default_data)
    }

    fn debug_info(&self) -> String {
        format!("{:?}", self.choices)
    }

    fn create_editor(&self, delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>> {
        Ok(Box::new(ChoiceCtiEditor::new(self, delegate)))
    }
}

/// Editor with a combo box.
///
/// Picking an entry commits and closes the editor at once; there is no
/// separate confirmation step. The editor exchanges the stored index, not
/// the user data.
#[derive(Debug)]
pub struct ChoiceCtiEditor {
    combo_box: ComboBox,
    connection: Option<ConnectionId>,
}

impl ChoiceCtiEditor {
    pub fn new(cti: &ChoiceCti, delegate: &EditorDelegate) -> Self {
        let mut combo_box = ComboBox::new();
        combo_box.add_items(cti.choices.iter().cloned());
        for (index, datum) in cti.user_data.iter().enumerate() {
            combo_box.set_item_data(index, datum.clone());
        }

        let handle = delegate.clone();
        let connection = combo_box
            .activated
            .connect(move |_| handle.commit_and_close());
        Self {
            combo_box,
            connection: Some(connection),
        }
    }

    pub fn combo_box(&mut self) -> &mut ComboBox {
        &mut self.combo_box
    }
}

impl CtiEditor for ChoiceCtiEditor {
    fn set_data(&mut self, data: &CtiValue) -> Result<()> {
        if self.connection.is_none() {
            return Err(Error::EditorFinalized);
        }
        let index = usize::try_from(data.coerce_int()?)
            .map_err(|_| data.coercion_error("choice index"))?;
        if index >= self.combo_box.count() {
            log::warn!(
                "Choice index {index} out of range (0..{}), keeping current entry",
                self.combo_box.count()
            );
        }
        self.combo_box.set_current_index(index);
        Ok(())
    }

    fn data(&self) -> CtiValue {
        self.combo_box
            .current_index()
            .map_or(CtiValue::None, CtiValue::from)
    }

    fn widget_mut(&mut self) -> EditorWidget<'_> {
        EditorWidget::ComboBox(&mut self.combo_box)
    }

    fn finalize(&mut self) {
        if let Some(id) = self.connection.take() {
            self.combo_box.activated.disconnect(id);
        }
    }

    fn is_finalized(&self) -> bool {
        self.connection.is_none()
    }
}
