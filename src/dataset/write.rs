use std::fs::File;
use std::io;
use std::iter;
use std::path::Path;

use log::info;

use super::Dataset;
use crate::error::{DatasetError, Result};

// Write a dataset back out in the format the loader reads:
// a "label,pixel0,pixel1,..." header, then one row per image
pub fn write_dataset<W: io::Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(writer);

    let area = dataset.height().saturating_mul(dataset.width());
    writer.write_record(
        iter::once("label".to_string()).chain((0..area).map(|i| format!("pixel{i}"))),
    )?;

    for image in dataset {
        writer.write_record(
            iter::once(image.label())
                .chain(image.pixels().iter().copied())
                .map(|value| value.to_string()),
        )?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn save_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_dataset(dataset, file)?;
    info!("Wrote {} images to {}", dataset.count(), path.display());
    Ok(())
}
