//! Config tree items (CTIs): the settings model of inspectors.
//!
//! A [`ConfigTreeItem`] is a named node that owns a typed value through the
//! [`Cti`] capability trait and an ordered list of children. Inspectors build
//! a tree once and read the values back by slash-delimited path, e.g.
//! `grid/alpha`.
//!
//! Each variant module holds the item type together with the editor that
//! edits it.

mod bool_cti;
mod choice;
mod color;
mod float;
mod group;
mod int;

use std::fmt;

use crate::editor::{CtiEditor, EditorDelegate};
use crate::value::{Color, CtiValue};
use crate::{Error, Result};

pub use bool_cti::{BoolCti, BoolCtiEditor};
pub use choice::{ChoiceCti, ChoiceCtiEditor};
pub use color::{ColorCti, ColorCtiEditor};
pub use float::{FloatCti, FloatCtiEditor};
pub use group::GroupCti;
pub use int::{IntCti, IntCtiEditor};

/// Capabilities of a typed settings node.
pub trait Cti: fmt::Debug {
    /// Short name of the variant, used in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Returns the current value.
    fn data(&self) -> CtiValue;

    /// Returns the default value.
    fn default_data(&self) -> CtiValue;

    /// Coerces `value` to the stored type and makes it the current value.
    ///
    /// # Errors
    /// Returns [`Error::TypeCoercion`] if the value cannot be converted. The
    /// current value is left unchanged in that case.
    fn set_data(&mut self, value: &CtiValue) -> Result<()>;

    /// Restores the default value.
    fn reset_to_default(&mut self);

    /// Returns the value consumers should use.
    ///
    /// # Errors
    /// Variants that map their data through a lookup table fail when the
    /// data does not index into it.
    fn config_value(&self) -> Result<CtiValue> {
        Ok(self.data())
    }

    /// String representation of the value for the tree view.
    fn display_value(&self) -> String {
        self.data().to_string()
    }

    /// String representation of the default value for the tree view.
    fn display_default_value(&self) -> String {
        self.default_data().to_string()
    }

    /// Diagnostic summary of the item's configuration.
    fn debug_info(&self) -> String {
        String::new()
    }

    /// Returns false for items without an editor.
    fn is_editable(&self) -> bool {
        true
    }

    /// Creates the editor for this item.
    ///
    /// # Errors
    /// Returns [`Error::NotEditable`] for items without an editor.
    fn create_editor(&self, delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>>;
}

/// A named node in a settings tree.
#[derive(Debug)]
pub struct ConfigTreeItem {
    node_name: String,
    cti: Box<dyn Cti>,
    children: Vec<ConfigTreeItem>,
}

impl ConfigTreeItem {
    /// Creates a leaf node.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNodeName`] if the name is empty or contains a
    /// slash.
    pub fn new(node_name: impl Into<String>, cti: impl Cti + 'static) -> Result<Self> {
        let node_name = node_name.into();
        if node_name.is_empty() || node_name.contains('/') {
            return Err(Error::InvalidNodeName(node_name));
        }
        Ok(Self {
            node_name,
            cti: Box::new(cti),
            children: Vec::new(),
        })
    }

    /// Creates a data-less node that groups children.
    ///
    /// # Errors
    /// See [`ConfigTreeItem::new`].
    pub fn group(node_name: impl Into<String>) -> Result<Self> {
        Self::new(node_name, GroupCti::new())
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn cti(&self) -> &dyn Cti {
        self.cti.as_ref()
    }

    pub fn cti_mut(&mut self) -> &mut dyn Cti {
        self.cti.as_mut()
    }

    pub fn children(&self) -> &[ConfigTreeItem] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the direct child with the given name.
    pub fn child(&self, node_name: &str) -> Option<&ConfigTreeItem> {
        self.children.iter().find(|c| c.node_name == node_name)
    }

    pub fn child_mut(&mut self, node_name: &str) -> Option<&mut ConfigTreeItem> {
        self.children.iter_mut().find(|c| c.node_name == node_name)
    }

    /// Appends a child and returns a reference to it.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateChild`] if a sibling has the same name.
    pub fn insert_child(&mut self, child: ConfigTreeItem) -> Result<&mut ConfigTreeItem> {
        if self.child(&child.node_name).is_some() {
            return Err(Error::DuplicateChild {
                parent: self.node_name.clone(),
                child: child.node_name,
            });
        }
        self.children.push(child);
        let last = self.children.len() - 1;
        Ok(&mut self.children[last])
    }

    /// Resolves a slash-delimited path relative to this node.
    ///
    /// The empty path resolves to the node itself.
    ///
    /// # Errors
    /// Returns [`Error::PathNotFound`] if any segment does not match a child.
    pub fn find(&self, path: &str) -> Result<&ConfigTreeItem> {
        let mut item = self;
        for segment in split_path(path) {
            item = item
                .child(segment)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        }
        Ok(item)
    }

    /// Mutable variant of [`ConfigTreeItem::find`].
    ///
    /// # Errors
    /// Returns [`Error::PathNotFound`] if any segment does not match a child.
    pub fn find_mut(&mut self, path: &str) -> Result<&mut ConfigTreeItem> {
        let mut item = self;
        for segment in split_path(path) {
            item = item
                .child_mut(segment)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        }
        Ok(item)
    }

    /// Returns the config value of the descendant at `path`.
    ///
    /// # Errors
    /// Fails if the path does not resolve or the value cannot be determined.
    pub fn config_value(&self, path: &str) -> Result<CtiValue> {
        self.find(path)?.cti.config_value()
    }

    /// Returns the boolean config value at `path`.
    ///
    /// # Errors
    /// Fails if the path does not resolve or the value is not a bool.
    pub fn config_bool(&self, path: &str) -> Result<bool> {
        self.config_value(path)?
            .as_bool()
            .ok_or_else(|| unexpected(path, "bool"))
    }

    /// Returns the numeric config value at `path` as a float.
    ///
    /// # Errors
    /// Fails if the path does not resolve or the value is not numeric.
    pub fn config_float(&self, path: &str) -> Result<f64> {
        self.config_value(path)?
            .as_float()
            .ok_or_else(|| unexpected(path, "number"))
    }

    /// Returns the integer config value at `path`.
    ///
    /// # Errors
    /// Fails if the path does not resolve or the value is not an integer.
    pub fn config_int(&self, path: &str) -> Result<i64> {
        self.config_value(path)?
            .as_int()
            .ok_or_else(|| unexpected(path, "integer"))
    }

    /// Returns the color config value at `path`.
    ///
    /// # Errors
    /// Fails if the path does not resolve or the value is not a color.
    pub fn config_color(&self, path: &str) -> Result<Color> {
        self.config_value(path)?
            .as_color()
            .ok_or_else(|| unexpected(path, "color"))
    }

    pub fn data(&self) -> CtiValue {
        self.cti.data()
    }

    pub fn default_data(&self) -> CtiValue {
        self.cti.default_data()
    }

    /// Sets the value of this node, see [`Cti::set_data`].
    ///
    /// # Errors
    /// Returns [`Error::TypeCoercion`] if the value cannot be converted.
    pub fn set_data(&mut self, value: impl Into<CtiValue>) -> Result<()> {
        self.cti.set_data(&value.into())
    }

    pub fn display_value(&self) -> String {
        self.cti.display_value()
    }

    pub fn display_default_value(&self) -> String {
        self.cti.display_default_value()
    }

    pub fn debug_info(&self) -> String {
        self.cti.debug_info()
    }

    pub fn is_editable(&self) -> bool {
        self.cti.is_editable()
    }

    /// Creates the editor for this node.
    ///
    /// # Errors
    /// Returns [`Error::NotEditable`] naming this node for group nodes.
    pub fn create_editor(&self, delegate: &EditorDelegate) -> Result<Box<dyn CtiEditor>> {
        if !self.cti.is_editable() {
            return Err(Error::NotEditable(self.node_name.clone()));
        }
        self.cti.create_editor(delegate)
    }

    /// Restores the default value, optionally for all descendants too.
    pub fn reset_to_default(&mut self, reset_children: bool) {
        self.cti.reset_to_default();
        if reset_children {
            for child in &mut self.children {
                child.reset_to_default(true);
            }
        }
    }

    /// Returns all descendants depth first with their paths relative to this node.
    pub fn walk(&self) -> Vec<(String, &ConfigTreeItem)> {
        let mut items = Vec::new();
        self.walk_into("", &mut items);
        items
    }

    fn walk_into<'a>(&'a self, prefix: &str, items: &mut Vec<(String, &'a ConfigTreeItem)>) {
        for child in &self.children {
            let path = if prefix.is_empty() {
                child.node_name.clone()
            } else {
                format!("{prefix}/{}", child.node_name)
            };
            items.push((path.clone(), child));
            child.walk_into(&path, items);
        }
    }

    /// Returns the data of every editable descendant keyed by path.
    pub fn values_by_path(&self) -> Vec<(String, CtiValue)> {
        self.walk()
            .into_iter()
            .filter(|(_, item)| item.is_editable())
            .map(|(path, item)| (path, item.data()))
            .collect()
    }

    /// Sets descendant values by path and returns how many were applied.
    ///
    /// Unknown paths, values that fail coercion and values without a valid
    /// config value are skipped with a warning, leaving the item unchanged,
    /// so that stale persisted settings do not prevent start-up.
    pub fn apply_values<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = (String, CtiValue)>,
    {
        let mut applied = 0;
        for (path, value) in values {
            match self.apply_value(&path, &value) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("Ignoring config value for {path:?}: {e}"),
            }
        }
        applied
    }

    fn apply_value(&mut self, path: &str, value: &CtiValue) -> Result<()> {
        let item = self.find_mut(path)?;
        let previous = item.cti.data();
        item.cti.set_data(value)?;
        if let Err(e) = item.cti.config_value() {
            item.cti.set_data(&previous)?;
            return Err(e);
        }
        Ok(())
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.trim_matches('/');
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

fn unexpected(path: &str, expected: &'static str) -> Error {
    Error::UnexpectedValueType {
        path: path.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ConfigTreeItem {
        let mut root = ConfigTreeItem::group("inspector").unwrap();
        root.insert_child(ConfigTreeItem::new("width", FloatCti::new(1.0)).unwrap())
            .unwrap();
        let grid = root
            .insert_child(ConfigTreeItem::group("grid").unwrap())
            .unwrap();
        grid.insert_child(ConfigTreeItem::new("X-axis", BoolCti::new(true)).unwrap())
            .unwrap();
        grid.insert_child(
            ConfigTreeItem::new("alpha", FloatCti::new(0.25).with_decimals(2)).unwrap(),
        )
        .unwrap();
        root
    }

    #[test]
    fn test_path_lookup() {
        let root = sample_tree();
        assert!(root.config_bool("grid/X-axis").unwrap());
        assert!((root.config_float("grid/alpha").unwrap() - 0.25).abs() < f64::EPSILON);
        assert!((root.config_float("/width").unwrap() - 1.0).abs() < f64::EPSILON);
        assert_eq!(root.find("").unwrap().node_name(), "inspector");
    }

    #[test]
    fn test_path_lookup_fails_on_unmatched_segment() {
        let root = sample_tree();
        assert_eq!(
            root.config_value("grid/Y-axis").unwrap_err(),
            Error::PathNotFound("grid/Y-axis".to_string())
        );
        assert!(root.config_value("grid//alpha").is_err());
        assert!(root.config_value("nope/alpha").is_err());
    }

    #[test]
    fn test_typed_lookup_rejects_wrong_type() {
        let root = sample_tree();
        assert!(matches!(
            root.config_bool("width"),
            Err(Error::UnexpectedValueType { .. })
        ));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_bad_names() {
        let mut root = sample_tree();
        let dup = ConfigTreeItem::new("width", FloatCti::new(2.0)).unwrap();
        assert!(matches!(
            root.insert_child(dup),
            Err(Error::DuplicateChild { .. })
        ));
        assert!(matches!(
            ConfigTreeItem::group("a/b"),
            Err(Error::InvalidNodeName(_))
        ));
        assert!(ConfigTreeItem::group("").is_err());
    }

    #[test]
    fn test_walk_and_values_by_path() {
        let root = sample_tree();
        let paths: Vec<String> = root.walk().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["width", "grid", "grid/X-axis", "grid/alpha"]);

        let values = root.values_by_path();
        assert_eq!(values.len(), 3);
        assert_eq!(values[1], ("grid/X-axis".to_string(), CtiValue::Bool(true)));
    }

    #[test]
    fn test_apply_values_skips_unknown_paths() {
        let mut root = sample_tree();
        let applied = root.apply_values(vec![
            ("grid/alpha".to_string(), CtiValue::Float(0.5)),
            ("grid/beta".to_string(), CtiValue::Float(0.5)),
            ("width".to_string(), CtiValue::from("thick")),
        ]);
        assert_eq!(applied, 1);
        assert!((root.config_float("grid/alpha").unwrap() - 0.5).abs() < f64::EPSILON);
        assert!((root.config_float("width").unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_values_rolls_back_invalid_choice() {
        let mut root = sample_tree();
        root.insert_child(
            ConfigTreeItem::new("pen style", ChoiceCti::new(0, ["a", "b", "c"])).unwrap(),
        )
        .unwrap();

        let applied = root.apply_values(vec![
            ("pen style".to_string(), CtiValue::Int(9)),
            ("grid/alpha".to_string(), CtiValue::Float(0.5)),
        ]);
        assert_eq!(applied, 1);
        assert_eq!(root.config_value("pen style").unwrap(), CtiValue::from("a"));
        assert_eq!(root.find("pen style").unwrap().data(), CtiValue::Int(0));

        assert_eq!(
            root.apply_values(vec![("pen style".to_string(), CtiValue::Int(2))]),
            1
        );
        assert_eq!(root.config_value("pen style").unwrap(), CtiValue::from("c"));
    }

    #[test]
    fn test_edit_session_opens_on_invalid_choice() {
        let mut root = sample_tree();
        root.insert_child(
            ConfigTreeItem::new("pen style", ChoiceCti::new(1, ["a", "b", "c"])).unwrap(),
        )
        .unwrap();
        root.find_mut("pen style").unwrap().set_data(9_i64).unwrap();

        let mut session = crate::editor::EditSession::open(&root, "pen style").unwrap();
        assert_eq!(session.editor().data(), CtiValue::Int(0));
        if let crate::editor::EditorWidget::ComboBox(combo) = session.widget_mut() {
            combo.activate(2);
        }
        assert!(session.process_events(&mut root).unwrap().committed);
        assert_eq!(root.config_value("pen style").unwrap(), CtiValue::from("c"));
    }

    #[test]
    fn test_reset_to_default_recursive() {
        let mut root = sample_tree();
        root.find_mut("grid/alpha").unwrap().set_data(0.75).unwrap();
        root.find_mut("grid/X-axis").unwrap().set_data(false).unwrap();

        root.find_mut("grid").unwrap().reset_to_default(false);
        assert!(!root.config_bool("grid/X-axis").unwrap());

        root.reset_to_default(true);
        assert!(root.config_bool("grid/X-axis").unwrap());
        assert!((root.config_float("grid/alpha").unwrap() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_is_not_editable() {
        let root = sample_tree();
        let delegate = EditorDelegate::new();
        assert_eq!(
            root.find("grid").unwrap().create_editor(&delegate).unwrap_err(),
            Error::NotEditable("grid".to_string())
        );
    }
}
