//! Repository tree items (RTIs): the browsable tree of a data file.
//!
//! Paths are slash-delimited and start at the file's root item, e.g.
//! `/measurement.h5/entry/temperature`.

use std::sync::Arc;

use ndarray::ArrayD;

use crate::{Error, Result};

/// A dataset node. Numeric datasets carry their data converted to `f64`.
#[derive(Debug, Clone)]
pub struct ArrayRti {
    node_name: String,
    node_path: String,
    data: Option<Arc<ArrayD<f64>>>,
    shape: Vec<usize>,
    element_type: String,
    unit: String,
    dimension_names: Vec<String>,
    dimension_units: Vec<String>,
}

impl ArrayRti {
    /// Creates a numeric array node.
    pub fn new(node_name: impl Into<String>, data: ArrayD<f64>) -> Self {
        Self::with_element_type(node_name, data, "float64")
    }

    /// Creates a numeric array node whose stored type was `element_type`.
    pub fn with_element_type(
        node_name: impl Into<String>,
        data: ArrayD<f64>,
        element_type: impl Into<String>,
    ) -> Self {
        let node_name = node_name.into();
        let shape = data.shape().to_vec();
        Self {
            node_path: format!("/{node_name}"),
            node_name,
            data: Some(Arc::new(data)),
            dimension_names: default_dimension_names(shape.len()),
            dimension_units: vec![String::new(); shape.len()],
            shape,
            element_type: element_type.into(),
            unit: String::new(),
        }
    }

    /// Creates a node for a dataset that holds no numbers (strings, compounds).
    pub fn non_numeric(
        node_name: impl Into<String>,
        shape: Vec<usize>,
        element_type: impl Into<String>,
    ) -> Self {
        let node_name = node_name.into();
        Self {
            node_path: format!("/{node_name}"),
            node_name,
            data: None,
            dimension_names: default_dimension_names(shape.len()),
            dimension_units: vec![String::new(); shape.len()],
            shape,
            element_type: element_type.into(),
            unit: String::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Names the dimensions. Missing names keep their defaults.
    #[must_use]
    pub fn with_dimension_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (slot, name) in self.dimension_names.iter_mut().zip(names) {
            *slot = name.into();
        }
        self
    }

    #[must_use]
    pub fn with_dimension_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (slot, unit) in self.dimension_units.iter_mut().zip(units) {
            *slot = unit.into();
        }
        self
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn node_path(&self) -> &str {
        &self.node_path
    }

    /// The numeric data, `None` for non-numeric datasets.
    pub fn data(&self) -> Option<&Arc<ArrayD<f64>>> {
        self.data.as_ref()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    pub fn dimension_units(&self) -> &[String] {
        &self.dimension_units
    }
}

fn default_dimension_names(ndim: usize) -> Vec<String> {
    (0..ndim).map(|d| format!("dim-{d}")).collect()
}

/// A group node holding other nodes.
#[derive(Debug, Clone)]
pub struct GroupRti {
    node_name: String,
    node_path: String,
    children: Vec<RepoTreeItem>,
}

impl GroupRti {
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn node_path(&self) -> &str {
        &self.node_path
    }

    pub fn children(&self) -> &[RepoTreeItem] {
        &self.children
    }
}

/// Node of a repository tree.
#[derive(Debug, Clone)]
pub enum RepoTreeItem {
    Group(GroupRti),
    Array(ArrayRti),
}

impl RepoTreeItem {
    /// Creates an empty group node at the root level.
    pub fn group(node_name: impl Into<String>) -> Self {
        let node_name = node_name.into();
        Self::Group(GroupRti {
            node_path: format!("/{node_name}"),
            node_name,
            children: Vec::new(),
        })
    }

    pub fn node_name(&self) -> &str {
        match self {
            Self::Group(g) => &g.node_name,
            Self::Array(a) => &a.node_name,
        }
    }

    pub fn node_path(&self) -> &str {
        match self {
            Self::Group(g) => &g.node_path,
            Self::Array(a) => &a.node_path,
        }
    }

    pub fn children(&self) -> &[RepoTreeItem] {
        match self {
            Self::Group(g) => &g.children,
            Self::Array(_) => &[],
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRti> {
        match self {
            Self::Array(a) => Some(a),
            Self::Group(_) => None,
        }
    }

    /// Appends a child, rewriting the paths of its subtree below this node.
    ///
    /// # Errors
    /// Returns [`Error::NotAGroup`] when called on an array node.
    pub fn insert_child(&mut self, mut child: RepoTreeItem) -> Result<&mut RepoTreeItem> {
        match self {
            Self::Group(group) => {
                child.rebase(&group.node_path);
                group.children.push(child);
                let last = group.children.len() - 1;
                Ok(&mut group.children[last])
            }
            Self::Array(array) => Err(Error::NotAGroup(array.node_path.clone())),
        }
    }

    fn rebase(&mut self, parent_path: &str) {
        let path = format!("{parent_path}/{}", self.node_name());
        match self {
            Self::Array(a) => a.node_path = path,
            Self::Group(g) => {
                for child in &mut g.children {
                    child.rebase(&path);
                }
                g.node_path = path;
            }
        }
    }

    /// Finds the node with the given absolute path in this subtree.
    pub fn find(&self, node_path: &str) -> Option<&RepoTreeItem> {
        if self.node_path() == node_path {
            return Some(self);
        }
        let prefix = format!("{}/", self.node_path());
        if !node_path.starts_with(&prefix) {
            return None;
        }
        self.children().iter().find_map(|c| c.find(node_path))
    }

    /// Number of nodes in this subtree, this node included.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(RepoTreeItem::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn sample() -> RepoTreeItem {
        let mut root = RepoTreeItem::group("file.h5");
        let entry = root.insert_child(RepoTreeItem::group("entry")).unwrap();
        let data = ArrayD::<f64>::zeros(IxDyn(&[4, 3]));
        entry
            .insert_child(RepoTreeItem::Array(ArrayRti::new("temperature", data).with_unit("K")))
            .unwrap();
        root
    }

    #[test]
    fn test_paths_follow_tree_position() {
        let root = sample();
        let item = root.find("/file.h5/entry/temperature").unwrap();
        let array = item.as_array().unwrap();
        assert_eq!(array.node_path(), "/file.h5/entry/temperature");
        assert_eq!(array.shape(), &[4, 3]);
        assert_eq!(array.unit(), "K");
        assert_eq!(array.dimension_names(), &["dim-0", "dim-1"]);
        assert_eq!(root.count(), 3);
        assert!(root.find("/file.h5/other").is_none());
    }

    #[test]
    fn test_rebase_rewrites_subtree() {
        let mut group = RepoTreeItem::group("sub");
        group
            .insert_child(RepoTreeItem::Array(ArrayRti::non_numeric("names", vec![2], "string")))
            .unwrap();
        let mut root = RepoTreeItem::group("root");
        root.insert_child(group).unwrap();
        assert!(root.find("/root/sub/names").is_some());
    }

    #[test]
    fn test_arrays_cannot_hold_children() {
        let mut array = RepoTreeItem::Array(ArrayRti::non_numeric("x", vec![], "string"));
        assert!(array.insert_child(RepoTreeItem::group("y")).is_err());
    }

    #[test]
    fn test_dimension_names_partial_override() {
        let rti = ArrayRti::new("a", ArrayD::zeros(IxDyn(&[2, 2, 2])))
            .with_dimension_names(["time"])
            .with_dimension_units(["s", "m"]);
        assert_eq!(rti.dimension_names(), &["time", "dim-1", "dim-2"]);
        assert_eq!(rti.dimension_units(), &["s", "m", ""]);
    }
}
