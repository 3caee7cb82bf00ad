pub mod dataset;
pub mod error;
pub mod image;
pub mod render;
pub mod stats;
pub mod tokenize;

pub use dataset::{load_dataset, load_dataset_with, Dataset, LoadOptions};
pub use error::{DatasetError, DecodeError, Result};
pub use image::{decode, Image};
