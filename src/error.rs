//! Error types for loading, decoding and exporting image datasets.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning one tokenized row into an [`Image`](crate::image::Image).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The row did not carry a label plus `height * width` pixel values.
    #[error("incomplete row: expected {expected} fields, found {found}")]
    IncompleteRow { expected: usize, found: usize },
}

/// Errors raised while loading or saving a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from the source failed part way through.
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A data row could not be decoded. `line` is 1-based and counts the header.
    #[error("line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: DecodeError,
    },

    /// The declared dimensions do not fit in memory.
    #[error("image dimensions {height}x{width} overflow")]
    Dimensions { height: usize, width: usize },

    /// The output file could not be created.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::Row {
            line: 3,
            source: DecodeError::IncompleteRow {
                expected: 5,
                found: 2,
            },
        };
        assert_eq!(
            format!("{err}"),
            "line 3: incomplete row: expected 5 fields, found 2"
        );

        let err = DatasetError::Dimensions {
            height: usize::MAX,
            width: 2,
        };
        assert!(format!("{err}").contains("overflow"));
    }
}
