//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O and data selection error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HDF5 library error.
    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// The file type is not supported.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// No repository tree item at the given path.
    #[error("no repository tree item at path: {0:?}")]
    NotFound(String),

    /// Only group nodes can hold children.
    #[error("not a group: {0:?}")]
    NotAGroup(String),

    /// A dimension number outside the selected array.
    #[error("invalid dimension {dim} for array with {ndim} dimensions")]
    InvalidDimension { dim: usize, ndim: usize },

    /// An axis number outside the inspector's axes.
    #[error("invalid axis {axis}, the inspector has {n_axes} axes")]
    InvalidAxis { axis: usize, n_axes: usize },

    /// Slicing was requested for a dimension that is mapped to an axis.
    #[error("dimension {0} is shown on an axis and cannot be sliced")]
    DimensionIsAxis(usize),

    /// No array is selected.
    #[error("no array selected")]
    NoSelection,

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] argos_core::Error),
}
