//! argos-io: Repository tree, array slicing and file loading for Argos.
//!
//! This crate turns data files into a tree of repository tree items (RTIs)
//! and provides [`ArrayCollector`], which slices the selected N-D array down
//! to the axes an inspector shows.
//!

mod collector;
mod error;
#[cfg(feature = "hdf5")]
pub mod hdf5;
pub mod rti;

pub use collector::ArrayCollector;
pub use error::{Error, Result};
pub use rti::{ArrayRti, GroupRti, RepoTreeItem};

use std::path::Path;

/// File extensions handled by the HDF5 loader.
pub const HDF5_EXTENSIONS: [&str; 5] = ["h5", "hdf5", "he5", "nc", "nc4"];

/// Opens a data file as a repository tree.
///
/// # Errors
/// Returns [`Error::UnsupportedFormat`] for unknown extensions (or when the
/// crate is built without the `hdf5` feature), and loader errors otherwise.
pub fn open_file(path: &Path) -> Result<RepoTreeItem> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if HDF5_EXTENSIONS.contains(&extension.as_str()) {
        return open_hdf5_file(path);
    }
    Err(Error::UnsupportedFormat(path.display().to_string()))
}

#[cfg(feature = "hdf5")]
fn open_hdf5_file(path: &Path) -> Result<RepoTreeItem> {
    hdf5::open_hdf5(path)
}

#[cfg(not(feature = "hdf5"))]
fn open_hdf5_file(path: &Path) -> Result<RepoTreeItem> {
    Err(Error::UnsupportedFormat(format!(
        "{} (built without HDF5 support)",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_file_rejects_unknown_extension() {
        let err = open_file(Path::new("data.xyz")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(open_file(Path::new("no_extension")).is_err());
    }
}
