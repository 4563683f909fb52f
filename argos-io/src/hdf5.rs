//! HDF5 loading: turns a file into a repository tree.
//!
//! Groups become [`GroupRti`](crate::GroupRti) nodes. Numeric datasets of any
//! integer, unsigned, float or boolean type are read and converted to `f64`.
//! Other datasets (strings, compounds, references) are listed without data.

use std::path::Path;

use hdf5::types::{FloatSize, H5Type, IntSize, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, File, Group};
use ndarray::ArrayD;

use crate::rti::{ArrayRti, RepoTreeItem};
use crate::Result;

/// Attribute names that hold the unit of a dataset, in lookup order.
const UNIT_ATTRIBUTES: [&str; 2] = ["units", "unit"];

/// Reads the structure and numeric data of an HDF5 file.
///
/// The root node is named after the file. All numeric datasets are read
/// into memory here; nothing is loaded lazily on selection.
///
/// A dataset whose type cannot be described or whose data cannot be read
/// is listed without data, so one bad dataset does not hide the rest of
/// the file.
///
/// # Errors
/// Returns an error if the file or one of its groups cannot be opened.
pub fn open_hdf5(path: &Path) -> Result<RepoTreeItem> {
    let file = File::open(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let mut root = RepoTreeItem::group(file_name);
    read_group(&file, &mut root)?;
    log::info!("Loaded {} ({} nodes)", path.display(), root.count());
    Ok(root)
}

fn read_group(group: &Group, node: &mut RepoTreeItem) -> Result<()> {
    let mut groups = group.groups()?;
    groups.sort_by_key(|g| g.name());
    for sub_group in &groups {
        let child = node.insert_child(RepoTreeItem::group(last_segment(&sub_group.name())))?;
        read_group(sub_group, child)?;
    }

    let mut datasets = group.datasets()?;
    datasets.sort_by_key(|d| d.name());
    for dataset in &datasets {
        node.insert_child(RepoTreeItem::Array(read_dataset(dataset)))?;
    }
    Ok(())
}

fn read_dataset(dataset: &Dataset) -> ArrayRti {
    let name = last_segment(&dataset.name());
    let rti = match dataset.dtype().and_then(|dtype| dtype.to_descriptor()) {
        Ok(descriptor) => match read_numeric(dataset, &descriptor) {
            Ok(Some((data, element_type))) => {
                ArrayRti::with_element_type(name, data, element_type)
            }
            Ok(None) => {
                log::debug!("Dataset {} has non-numeric type {descriptor:?}", dataset.name());
                ArrayRti::non_numeric(name, dataset.shape(), non_numeric_type_name(&descriptor))
            }
            Err(e) => {
                log::warn!("Unable to read dataset {}: {e}", dataset.name());
                ArrayRti::non_numeric(name, dataset.shape(), "opaque")
            }
        },
        Err(e) => {
            log::warn!("Unsupported type of dataset {}: {e}", dataset.name());
            ArrayRti::non_numeric(name, dataset.shape(), "opaque")
        }
    };
    rti.with_unit(read_unit(dataset))
}

/// Reads numeric data converted to `f64`, `None` for non-numeric types.
fn read_numeric(
    dataset: &Dataset,
    descriptor: &TypeDescriptor,
) -> Result<Option<(ArrayD<f64>, &'static str)>> {
    let numeric = match descriptor {
        TypeDescriptor::Integer(size) => match size {
            IntSize::U1 => (read_as_f64::<i8>(dataset)?, "int8"),
            IntSize::U2 => (read_as_f64::<i16>(dataset)?, "int16"),
            IntSize::U4 => (read_as_f64::<i32>(dataset)?, "int32"),
            IntSize::U8 => (read_i64(dataset)?, "int64"),
        },
        TypeDescriptor::Unsigned(size) => match size {
            IntSize::U1 => (read_as_f64::<u8>(dataset)?, "uint8"),
            IntSize::U2 => (read_as_f64::<u16>(dataset)?, "uint16"),
            IntSize::U4 => (read_as_f64::<u32>(dataset)?, "uint32"),
            IntSize::U8 => (read_u64(dataset)?, "uint64"),
        },
        TypeDescriptor::Float(FloatSize::U4) => (read_as_f64::<f32>(dataset)?, "float32"),
        TypeDescriptor::Float(_) => (dataset.read_dyn::<f64>()?, "float64"),
        TypeDescriptor::Boolean => (read_as_f64::<bool>(dataset)?, "bool"),
        _ => return Ok(None),
    };
    Ok(Some(numeric))
}

fn read_as_f64<T: H5Type + Copy + Into<f64>>(dataset: &Dataset) -> Result<ArrayD<f64>> {
    Ok(dataset.read_dyn::<T>()?.mapv(Into::into))
}

#[allow(clippy::cast_precision_loss)]
fn read_i64(dataset: &Dataset) -> Result<ArrayD<f64>> {
    Ok(dataset.read_dyn::<i64>()?.mapv(|v| v as f64))
}

#[allow(clippy::cast_precision_loss)]
fn read_u64(dataset: &Dataset) -> Result<ArrayD<f64>> {
    Ok(dataset.read_dyn::<u64>()?.mapv(|v| v as f64))
}

fn non_numeric_type_name(descriptor: &TypeDescriptor) -> &'static str {
    match descriptor {
        TypeDescriptor::FixedAscii(_)
        | TypeDescriptor::FixedUnicode(_)
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::VarLenUnicode => "string",
        TypeDescriptor::Compound(_) => "compound",
        TypeDescriptor::Enum(_) => "enum",
        TypeDescriptor::FixedArray(..) | TypeDescriptor::VarLenArray(_) => "array",
        _ => "opaque",
    }
}

/// Reads the unit attribute, empty if absent or unreadable.
fn read_unit(dataset: &Dataset) -> String {
    for attr_name in UNIT_ATTRIBUTES {
        let Ok(attr) = dataset.attr(attr_name) else {
            continue;
        };
        if let Ok(value) = attr.read_scalar::<VarLenUnicode>() {
            return value.to_string();
        }
        if let Ok(value) = attr.read_scalar::<VarLenAscii>() {
            return value.to_string();
        }
        log::warn!(
            "Ignoring {attr_name:?} attribute of {} with a non-string type",
            dataset.name()
        );
    }
    String::new()
}

fn last_segment(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr2, ArrayView1, IxDyn};
    use std::str::FromStr;
    use tempfile::TempDir;

    fn write_sample(path: &Path) {
        let file = File::create(path).unwrap();
        let entry = file.create_group("entry").unwrap();

        let temperature = entry
            .new_dataset::<f32>()
            .shape((3,))
            .create("temperature")
            .unwrap();
        temperature
            .write(ArrayView1::from(&[280.5_f32, 290.0, 300.25][..]))
            .unwrap();
        temperature
            .new_attr::<VarLenUnicode>()
            .create("units")
            .unwrap()
            .write_scalar(&VarLenUnicode::from_str("K").unwrap())
            .unwrap();

        let counts = entry
            .new_dataset::<u16>()
            .shape((2, 2))
            .create("counts")
            .unwrap();
        counts.write(&arr2(&[[1_u16, 2], [3, 4]])).unwrap();

        file.new_dataset::<i64>()
            .shape((1,))
            .create("index")
            .unwrap()
            .write(ArrayView1::from(&[42_i64][..]))
            .unwrap();
    }

    #[test]
    fn test_open_hdf5_builds_tree() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.h5");
        write_sample(&path);

        let root = open_hdf5(&path).unwrap();
        assert_eq!(root.node_name(), "sample.h5");
        assert_eq!(root.count(), 5);
        // Groups come before datasets.
        let names: Vec<&str> = root.children().iter().map(RepoTreeItem::node_name).collect();
        assert_eq!(names, vec!["entry", "index"]);

        let temperature = root
            .find("/sample.h5/entry/temperature")
            .and_then(RepoTreeItem::as_array)
            .unwrap();
        assert_eq!(temperature.element_type(), "float32");
        assert_eq!(temperature.unit(), "K");
        let data = temperature.data().unwrap();
        assert_relative_eq!(data[IxDyn(&[2])], 300.25);

        let counts = root
            .find("/sample.h5/entry/counts")
            .and_then(RepoTreeItem::as_array)
            .unwrap();
        assert_eq!(counts.shape(), &[2, 2]);
        assert_eq!(counts.element_type(), "uint16");
        assert_eq!(counts.unit(), "");
        assert_relative_eq!(counts.data().unwrap()[IxDyn(&[1, 0])], 3.0);
    }

    #[test]
    fn test_unreadable_dataset_is_listed_without_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("external.h5");
        let raw = dir.path().join("raw.bin");
        {
            let file = File::create(&path).unwrap();
            file.new_dataset::<f64>()
                .shape((4,))
                .external(raw.to_str().unwrap(), 0, 32)
                .create("broken")
                .unwrap()
                .write(ArrayView1::from(&[1.0_f64, 2.0, 3.0, 4.0][..]))
                .unwrap();
            file.new_dataset::<i32>()
                .shape((2,))
                .create("index")
                .unwrap()
                .write(ArrayView1::from(&[7_i32, 8][..]))
                .unwrap();
        }
        // The raw data lives outside the HDF5 file; without it the read fails.
        std::fs::remove_file(&raw).unwrap();

        let root = open_hdf5(&path).unwrap();
        let broken = root
            .find("/external.h5/broken")
            .and_then(RepoTreeItem::as_array)
            .unwrap();
        assert!(broken.data().is_none());
        assert_eq!(broken.element_type(), "opaque");
        assert_eq!(broken.shape(), &[4]);

        let index = root
            .find("/external.h5/index")
            .and_then(RepoTreeItem::as_array)
            .unwrap();
        assert_relative_eq!(index.data().unwrap()[IxDyn(&[1])], 8.0);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(open_hdf5(&dir.path().join("missing.h5")).is_err());
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("/entry/data"), "data");
        assert_eq!(last_segment("data"), "data");
    }
}
