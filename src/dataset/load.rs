use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::{build_images, Dataset, LoadOptions};
use crate::error::{DatasetError, Result};

/// Loads a dataset of `height x width` images from a CSV file.
///
/// A file that can't be opened is an error ([`DatasetError::Open`]), never
/// an empty dataset.
pub fn load_dataset(path: impl AsRef<Path>, height: usize, width: usize) -> Result<Dataset> {
    load_dataset_with(path, &LoadOptions::new(height, width))
}

pub fn load_dataset_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Opened {}", path.display());

    // The reader (and the file with it) is dropped inside, on every path
    let dataset = read_dataset(BufReader::new(file), options)?;
    debug!(
        "Loaded {} images of {}x{} from {}",
        dataset.count(),
        dataset.height(),
        dataset.width(),
        path.display()
    );
    Ok(dataset)
}

/// Same as [`load_dataset_with`] for any buffered source.
pub fn read_dataset<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Dataset> {
    let images = build_images(reader, options)?;
    Ok(Dataset::new(options.height, options.width, images))
}
