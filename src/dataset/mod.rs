// This module contains everything needed to get a dataset in and out of CSV

use std::ops::Index;

use rand::Rng;

use crate::error::{DatasetError, Result};
use crate::image::Image;
use crate::tokenize::DEFAULT_MAX_FIELD_WIDTH;

mod build;
pub use build::build_images;

mod load;
pub use load::{load_dataset, load_dataset_with, read_dataset};

mod write;
pub use write::{save_dataset, write_dataset};

/// How to read a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Declared image height. Not inferred from the file.
    pub height: usize,
    /// Declared image width. Not inferred from the file.
    pub width: usize,
    /// Per-field buffer size handed to the tokenizer.
    pub max_field_width: usize,
    /// Stop after this many images.
    pub limit: Option<usize>,
}

impl LoadOptions {
    pub fn new(height: usize, width: usize) -> Self {
        LoadOptions {
            height,
            width,
            max_field_width: DEFAULT_MAX_FIELD_WIDTH,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_max_field_width(mut self, max_field_width: usize) -> Self {
        self.max_field_width = max_field_width;
        self
    }

    /// Number of fields in one data row: the label plus every pixel.
    pub fn field_count(&self) -> Result<usize> {
        self.height
            .checked_mul(self.width)
            .and_then(|area| area.checked_add(1))
            .ok_or(DatasetError::Dimensions {
                height: self.height,
                width: self.width,
            })
    }
}

/// An ordered, fixed-size collection of images sharing declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    height: usize,
    width: usize,
    images: Vec<Image>,
}

impl Dataset {
    /// Takes ownership of `images`. Their dimensions are assumed to match
    /// `height` and `width` and are not checked again.
    pub fn new(height: usize, width: usize, images: Vec<Image>) -> Self {
        Dataset {
            height,
            width,
            images,
        }
    }

    /// Number of images in the dataset.
    pub fn count(&self) -> usize {
        self.images.len()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    /// The first image, if there is one.
    pub fn head(&self) -> Option<&Image> {
        self.images.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.images.iter()
    }

    pub fn into_images(self) -> Vec<Image> {
        self.images
    }

    // Parallel arrays of (pixels, labels), the shape most training code wants
    pub fn into_parallel_arrays(self) -> (Vec<Vec<i32>>, Vec<i32>) {
        self.images
            .into_iter()
            .map(|image| {
                let (label, pixels) = image.into_parts();
                (pixels, label)
            })
            .unzip()
    }

    /// Picks up to `amount` distinct image indices at random.
    pub fn sample_indices(&self, amount: usize, rng: &mut impl Rng) -> Vec<usize> {
        let amount = amount.min(self.images.len());
        rand::seq::index::sample(rng, self.images.len(), amount).into_vec()
    }
}

impl Index<usize> for Dataset {
    type Output = Image;

    fn index(&self, index: usize) -> &Image {
        &self.images[index]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
