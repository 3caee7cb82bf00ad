use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::dataset::Dataset;
use crate::image::Image;
use crate::render::Band;

/// Summary numbers for a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStats {
    pub count: usize,
    // Number of images per label, ordered by label
    pub labels: BTreeMap<i32, usize>,
    pub min_pixel: Option<i32>,
    pub max_pixel: Option<i32>,
    // Number of pixels in each band, indexed by Band::index
    pub band_counts: [usize; 4],
    pub constant_positions: Vec<usize>,
}

impl DatasetStats {
    /// `constant_ratio` is passed on to [`find_constant_positions`].
    pub fn compute(dataset: &Dataset, constant_ratio: f64) -> Self {
        let tally = dataset
            .images()
            .par_iter()
            .fold(PixelTally::default, |tally, image| tally.add_image(image))
            .reduce(PixelTally::default, PixelTally::merge);

        DatasetStats {
            count: dataset.count(),
            labels: label_histogram(dataset.images()),
            min_pixel: tally.min,
            max_pixel: tally.max,
            band_counts: tally.bands,
            constant_positions: find_constant_positions(dataset, constant_ratio),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct PixelTally {
    min: Option<i32>,
    max: Option<i32>,
    bands: [usize; 4],
}

impl PixelTally {
    fn add_image(mut self, image: &Image) -> Self {
        for &value in image.pixels() {
            self.min = Some(self.min.map_or(value, |min| min.min(value)));
            self.max = Some(self.max.map_or(value, |max| max.max(value)));
            self.bands[Band::of(value).index()] += 1;
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.min = self.min.into_iter().chain(other.min).min();
        self.max = self.max.into_iter().chain(other.max).max();
        for (ours, theirs) in self.bands.iter_mut().zip(other.bands) {
            *ours += theirs;
        }
        self
    }
}

pub fn label_histogram(images: &[Image]) -> BTreeMap<i32, usize> {
    let mut histogram = BTreeMap::new();
    for image in images {
        *histogram.entry(image.label()).or_insert(0) += 1;
    }
    histogram
}

// Find pixel positions that carry almost no information: any position where
// at least `ratio` of the images fall into the same band.
// Borders of centered digit datasets are the usual hit.
pub fn find_constant_positions(dataset: &Dataset, ratio: f64) -> Vec<usize> {
    // Assume that every image has as many pixels as the first
    let area = match dataset.head() {
        Some(image) => image.pixels().len(),
        None => return Vec::new(),
    };
    let quanta = Band::ALL.len();
    let threshold = ((ratio * dataset.count() as f64).ceil() as usize).max(1);

    // Build a histogram of bands occurring in each pixel
    let histogram = dataset
        .images()
        .par_iter()
        .fold(
            || vec![0_usize; area * quanta],
            |mut histogram, image| {
                for (i, &value) in image.pixels().iter().take(area).enumerate() {
                    histogram[i * quanta + Band::of(value).index()] += 1;
                }
                histogram
            },
        )
        .reduce(
            || vec![0_usize; area * quanta],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                a
            },
        );

    histogram
        .chunks(quanta)
        .enumerate()
        .filter(|(_, bands)| bands.iter().any(|&count| count >= threshold))
        .map(|(i, _)| i)
        .collect()
}
