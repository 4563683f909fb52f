//! Array collector: slices the selected array down to an inspector's axes.

use argos_core::Collector;
use ndarray::{ArrayD, Axis};

use crate::rti::ArrayRti;
use crate::{Error, Result};

/// Collector backed by an [`ArrayRti`].
///
/// Every inspector axis shows one data dimension. All other dimensions are
/// sliced at a fixed index. By default the axes show the last dimensions of
/// the array.
#[derive(Debug, Clone)]
pub struct ArrayCollector {
    rti: Option<ArrayRti>,
    n_axes: usize,
    axes: Vec<usize>,
    slice_index: Vec<usize>,
}

impl ArrayCollector {
    /// Creates an empty collector for an inspector with `n_axes` axes.
    pub fn new(n_axes: usize) -> Self {
        Self {
            rti: None,
            n_axes,
            axes: Vec::new(),
            slice_index: Vec::new(),
        }
    }

    /// Selects an array. Resets the axis mapping and all slice indices.
    pub fn set_rti(&mut self, rti: ArrayRti) {
        let ndim = rti.ndim();
        self.axes = if ndim >= self.n_axes {
            (ndim - self.n_axes..ndim).collect()
        } else {
            Vec::new()
        };
        self.slice_index = vec![0; ndim];
        log::debug!(
            "Collector selected {} with shape {:?}",
            rti.node_path(),
            rti.shape()
        );
        self.rti = Some(rti);
    }

    pub fn clear(&mut self) {
        self.rti = None;
        self.axes.clear();
        self.slice_index.clear();
    }

    pub fn rti(&self) -> Option<&ArrayRti> {
        self.rti.as_ref()
    }

    pub fn n_axes(&self) -> usize {
        self.n_axes
    }

    /// Data dimension shown on each axis. Empty if the array has fewer
    /// dimensions than the inspector has axes.
    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    /// Shows data dimension `dim` on `axis`.
    ///
    /// If another axis already shows `dim`, the two axes swap dimensions.
    ///
    /// # Errors
    /// Fails without a selection, or for an unknown axis or dimension.
    pub fn set_axis_dimension(&mut self, axis: usize, dim: usize) -> Result<()> {
        let rti = self.rti.as_ref().ok_or(Error::NoSelection)?;
        if axis >= self.axes.len() {
            return Err(Error::InvalidAxis {
                axis,
                n_axes: self.axes.len(),
            });
        }
        if dim >= rti.ndim() {
            return Err(Error::InvalidDimension {
                dim,
                ndim: rti.ndim(),
            });
        }
        if let Some(other) = self.axes.iter().position(|&d| d == dim) {
            self.axes[other] = self.axes[axis];
        }
        self.axes[axis] = dim;
        Ok(())
    }

    /// Sets the index at which dimension `dim` is sliced, clamped to the
    /// dimension's length.
    ///
    /// # Errors
    /// Fails without a selection, for an unknown dimension, or when `dim` is
    /// shown on an axis.
    pub fn set_slice_index(&mut self, dim: usize, index: usize) -> Result<()> {
        let rti = self.rti.as_ref().ok_or(Error::NoSelection)?;
        if dim >= rti.ndim() {
            return Err(Error::InvalidDimension {
                dim,
                ndim: rti.ndim(),
            });
        }
        if self.axes.contains(&dim) {
            return Err(Error::DimensionIsAxis(dim));
        }
        self.slice_index[dim] = index.min(rti.shape()[dim].saturating_sub(1));
        Ok(())
    }

    pub fn slice_index(&self, dim: usize) -> Option<usize> {
        self.slice_index.get(dim).copied()
    }

    /// Dimensions that are not shown on an axis, in ascending order.
    pub fn sliced_dimensions(&self) -> Vec<usize> {
        (0..self.slice_index.len())
            .filter(|d| !self.axes.contains(d))
            .collect()
    }
}

impl Collector for ArrayCollector {
    fn rti_node_path(&self) -> Option<String> {
        self.rti.as_ref().map(|rti| rti.node_path().to_string())
    }

    fn sliced_array(&self) -> Option<ArrayD<f64>> {
        let rti = self.rti.as_ref()?;
        let data = rti.data()?;
        if self.axes.len() != self.n_axes {
            return None;
        }

        let mut view = data.view();
        // Highest dimension first so the lower dimension numbers stay valid.
        for dim in self.sliced_dimensions().into_iter().rev() {
            let index = self.slice_index[dim];
            if index >= view.len_of(Axis(dim)) {
                return None;
            }
            view = view.index_axis_move(Axis(dim), index);
        }

        let mut remaining = self.axes.clone();
        remaining.sort_unstable();
        let order: Vec<usize> = self
            .axes
            .iter()
            .filter_map(|dim| remaining.iter().position(|d| d == dim))
            .collect();
        Some(view.permuted_axes(order).to_owned())
    }

    fn slices_string(&self) -> String {
        if self.rti.is_none() {
            return String::new();
        }
        let parts: Vec<String> = self
            .slice_index
            .iter()
            .enumerate()
            .map(|(dim, index)| {
                if self.axes.contains(&dim) {
                    ":".to_string()
                } else {
                    index.to_string()
                }
            })
            .collect();
        format!("[{}]", parts.join(", "))
    }

    fn dependent_dimension_name(&self) -> String {
        self.rti
            .as_ref()
            .map(|rti| rti.node_name().to_string())
            .unwrap_or_default()
    }

    fn dependent_dimension_unit(&self) -> String {
        self.rti
            .as_ref()
            .map(|rti| rti.unit().to_string())
            .unwrap_or_default()
    }

    fn independent_dimension_names(&self) -> Vec<String> {
        self.rti.as_ref().map_or_else(Vec::new, |rti| {
            self.axes
                .iter()
                .map(|&d| rti.dimension_names()[d].clone())
                .collect()
        })
    }

    fn independent_dimension_units(&self) -> Vec<String> {
        self.rti.as_ref().map_or_else(Vec::new, |rti| {
            self.axes
                .iter()
                .map(|&d| rti.dimension_units()[d].clone())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array, IxDyn};

    /// `value = 100 * i + 10 * j + k` for shape `[2, 3, 4]`.
    fn cube() -> ArrayRti {
        let data = Array::from_shape_fn(IxDyn(&[2, 3, 4]), |idx| {
            #[allow(clippy::cast_precision_loss)]
            let value = (100 * idx[0] + 10 * idx[1] + idx[2]) as f64;
            value
        });
        ArrayRti::new("cube", data)
            .with_unit("counts")
            .with_dimension_names(["frame", "row", "col"])
            .with_dimension_units(["", "px", "px"])
    }

    #[test]
    fn test_empty_collector() {
        let collector = ArrayCollector::new(1);
        assert!(collector.rti_node_path().is_none());
        assert!(collector.sliced_array().is_none());
        assert_eq!(collector.slices_string(), "");
        assert!(collector.independent_dimension_names().is_empty());
    }

    #[test]
    fn test_default_axis_is_last_dimension() {
        let mut collector = ArrayCollector::new(1);
        collector.set_rti(cube());
        assert_eq!(collector.axes(), &[2]);
        assert_eq!(collector.sliced_dimensions(), vec![0, 1]);
        assert_eq!(collector.slices_string(), "[0, 0, :]");

        collector.set_slice_index(0, 1).unwrap();
        collector.set_slice_index(1, 2).unwrap();
        let sliced = collector.sliced_array().unwrap();
        assert_eq!(sliced.shape(), &[4]);
        assert_relative_eq!(sliced[IxDyn(&[3])], 123.0);
        assert_eq!(collector.slices_string(), "[1, 2, :]");
        assert_eq!(collector.independent_dimension_names(), vec!["col"]);
        assert_eq!(collector.independent_dimension_units(), vec!["px"]);
        assert_eq!(collector.dependent_dimension_name(), "cube");
        assert_eq!(collector.dependent_dimension_unit(), "counts");
    }

    #[test]
    fn test_slice_index_is_clamped() {
        let mut collector = ArrayCollector::new(1);
        collector.set_rti(cube());
        collector.set_slice_index(1, 99).unwrap();
        assert_eq!(collector.slice_index(1), Some(2));
        assert!(matches!(
            collector.set_slice_index(2, 0),
            Err(Error::DimensionIsAxis(2))
        ));
        assert!(matches!(
            collector.set_slice_index(5, 0),
            Err(Error::InvalidDimension { dim: 5, ndim: 3 })
        ));
    }

    #[test]
    fn test_axis_swap_and_transpose() {
        let mut collector = ArrayCollector::new(2);
        collector.set_rti(cube());
        assert_eq!(collector.axes(), &[1, 2]);

        // Showing dimension 2 on axis 0 moves dimension 1 to axis 1.
        collector.set_axis_dimension(0, 2).unwrap();
        assert_eq!(collector.axes(), &[2, 1]);
        assert_eq!(collector.slices_string(), "[0, :, :]");

        let sliced = collector.sliced_array().unwrap();
        assert_eq!(sliced.shape(), &[4, 3]);
        assert_relative_eq!(sliced[IxDyn(&[3, 1])], 13.0);
        assert_eq!(collector.independent_dimension_names(), vec!["col", "row"]);

        assert!(matches!(
            collector.set_axis_dimension(2, 0),
            Err(Error::InvalidAxis { axis: 2, n_axes: 2 })
        ));
    }

    #[test]
    fn test_too_few_dimensions_gives_no_data() {
        let mut collector = ArrayCollector::new(2);
        collector.set_rti(ArrayRti::new("line", ArrayD::zeros(IxDyn(&[5]))));
        assert!(collector.axes().is_empty());
        assert!(collector.sliced_array().is_none());
    }

    #[test]
    fn test_non_numeric_gives_no_data() {
        let mut collector = ArrayCollector::new(1);
        collector.set_rti(ArrayRti::non_numeric("names", vec![3], "string"));
        assert_eq!(collector.rti_node_path().as_deref(), Some("/names"));
        assert!(collector.sliced_array().is_none());
        assert_eq!(collector.slices_string(), "[:]");
    }
}
