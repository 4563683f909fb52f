//! Data access interface consumed by inspectors.

use ndarray::ArrayD;

/// Supplies sliced array data and axis metadata to an inspector.
///
/// Name and unit sequences are aligned with the inspector's axes: element
/// `i` of [`Collector::independent_dimension_names`] describes axis `i` of
/// the array returned by [`Collector::sliced_array`].
pub trait Collector {
    /// Path of the selected repository tree item, `None` if nothing is selected.
    fn rti_node_path(&self) -> Option<String>;

    /// The selected data restricted to the inspector's axes.
    ///
    /// Returns `None` when there is no selection or it holds no numeric data.
    fn sliced_array(&self) -> Option<ArrayD<f64>>;

    /// Describes the current slice, e.g. `[:, 3]`.
    fn slices_string(&self) -> String;

    /// Name of the plotted quantity.
    fn dependent_dimension_name(&self) -> String;

    /// Unit of the plotted quantity, empty if unknown.
    fn dependent_dimension_unit(&self) -> String;

    fn independent_dimension_names(&self) -> Vec<String>;

    fn independent_dimension_units(&self) -> Vec<String>;
}

/// Returns true if the array holds at least one finite number.
///
/// NaN marks missing values, so an all-NaN array holds no real numbers.
pub fn array_has_real_numbers(array: &ArrayD<f64>) -> bool {
    array.iter().any(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_array_has_real_numbers() {
        let empty = ArrayD::<f64>::zeros(IxDyn(&[0]));
        assert!(!array_has_real_numbers(&empty));

        let missing = ArrayD::from_elem(IxDyn(&[3]), f64::NAN);
        assert!(!array_has_real_numbers(&missing));

        let mut partly = missing.clone();
        partly[IxDyn(&[1])] = 2.0;
        assert!(array_has_real_numbers(&partly));
    }
}
