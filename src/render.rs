// Console rendering for images and datasets.
//
// Each pixel is quantized into one of four bands by its raw value and drawn
// as two glyphs, so that a square image looks roughly square in a terminal.

use std::fmt::Write;

use crate::dataset::Dataset;
use crate::image::Image;
use crate::stats::DatasetStats;

const RULE: &str = "==============================";
const NO_DATA: &str = "no data";

/// Intensity band of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    Lightest,
    LightMedium,
    DarkMedium,
    Darkest,
}

impl Band {
    pub const ALL: [Band; 4] = [
        Band::Lightest,
        Band::LightMedium,
        Band::DarkMedium,
        Band::Darkest,
    ];

    /// `< 64`, `[64, 128)`, `[128, 192)`, `>= 192`. Negative values land in
    /// the lightest band, anything above 255 in the darkest.
    pub fn of(value: i32) -> Band {
        match value {
            i32::MIN..=63 => Band::Lightest,
            64..=127 => Band::LightMedium,
            128..=191 => Band::DarkMedium,
            _ => Band::Darkest,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which characters to draw bands with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyphs {
    #[default]
    Unicode,
    Ascii,
}

impl Glyphs {
    pub fn glyph(self, band: Band) -> char {
        match (self, band) {
            (Glyphs::Unicode, Band::Lightest) => '░',
            (Glyphs::Unicode, Band::LightMedium) => '▒',
            (Glyphs::Unicode, Band::DarkMedium) => '▓',
            (Glyphs::Unicode, Band::Darkest) => '█',
            (Glyphs::Ascii, Band::Lightest) => ' ',
            (Glyphs::Ascii, Band::LightMedium) => '.',
            (Glyphs::Ascii, Band::DarkMedium) => '+',
            (Glyphs::Ascii, Band::Darkest) => '#',
        }
    }
}

/// The band of every pixel, row-major.
pub fn bands(image: &Image) -> Vec<Band> {
    image.pixels().iter().map(|&value| Band::of(value)).collect()
}

/// Draws the pixel grid with the default glyphs: `height` lines of `width`
/// glyph pairs.
pub fn render(image: &Image) -> String {
    render_with(image, Glyphs::default())
}

pub fn render_with(image: &Image, glyphs: Glyphs) -> String {
    if image.pixels().is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(
        image
            .pixels()
            .len()
            .saturating_mul(2)
            .saturating_add(image.height()),
    );
    for row in image.rows() {
        for &value in row {
            let glyph = glyphs.glyph(Band::of(value));
            out.push(glyph);
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Bordered metadata block for a whole dataset.
pub fn render_summary(dataset: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Image Dataset:");
    let _ = writeln!(out, "  Dataset Length: {}", dataset.count());
    let _ = writeln!(
        out,
        "  Image Size: {} by {}",
        dataset.height(),
        dataset.width()
    );
    match dataset.head() {
        Some(image) => {
            let _ = writeln!(out, "  Head Label: {}", image.label());
        }
        None => {
            let _ = writeln!(out, "  Head Image: {NO_DATA}");
        }
    }
    let _ = writeln!(out, "{RULE}");
    out
}

/// Bordered block with an image's size and label, followed by its pixels.
pub fn render_properties(image: &Image, glyphs: Glyphs) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Image:");
    let _ = writeln!(out, "  Image Size: {} by {}", image.height(), image.width());
    let _ = writeln!(out, "  Image Label: {}", image.label());
    let _ = writeln!(out);
    out.push_str(&render_labeled(image, glyphs));
    let _ = writeln!(out, "{RULE}");
    out
}

/// The first image of the dataset, or a "no data" line if it is empty.
pub fn render_head(dataset: &Dataset, glyphs: Glyphs) -> String {
    match dataset.head() {
        Some(image) => render_labeled(image, glyphs),
        None => format!("Image Contents: {NO_DATA}\n"),
    }
}

pub fn render_labeled(image: &Image, glyphs: Glyphs) -> String {
    let mut out = format!("Image label = {}\n", image.label());
    if image.pixels().is_empty() {
        let _ = writeln!(out, "Image Contents: {NO_DATA}");
    } else {
        let _ = writeln!(out, "Image Contents:");
        out.push_str(&render_with(image, glyphs));
    }
    out
}

pub fn render_stats(stats: &DatasetStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Dataset Statistics:");
    let _ = writeln!(out, "  Images: {}", stats.count);
    match (stats.min_pixel, stats.max_pixel) {
        (Some(min), Some(max)) => {
            let _ = writeln!(out, "  Pixel Range: {min} to {max}");
        }
        _ => {
            let _ = writeln!(out, "  Pixel Range: {NO_DATA}");
        }
    }
    let _ = writeln!(out, "  Labels:");
    for (label, count) in &stats.labels {
        let _ = writeln!(out, "    {label}: {count}");
    }
    let _ = writeln!(out, "  Bands:");
    for band in Band::ALL {
        let _ = writeln!(
            out,
            "    {} {:?}: {}",
            Glyphs::Unicode.glyph(band),
            band,
            stats.band_counts[band.index()]
        );
    }
    let _ = writeln!(
        out,
        "  Near-constant Positions: {}",
        stats.constant_positions.len()
    );
    let _ = writeln!(out, "{RULE}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{read_dataset, LoadOptions};
    use std::io::Cursor;

    fn filled(value: i32) -> Image {
        Image::new(0, 3, 3, vec![value; 9]).unwrap()
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(Band::of(-500), Band::Lightest);
        assert_eq!(Band::of(0), Band::Lightest);
        assert_eq!(Band::of(63), Band::Lightest);
        assert_eq!(Band::of(64), Band::LightMedium);
        assert_eq!(Band::of(127), Band::LightMedium);
        assert_eq!(Band::of(128), Band::DarkMedium);
        assert_eq!(Band::of(191), Band::DarkMedium);
        assert_eq!(Band::of(192), Band::Darkest);
        assert_eq!(Band::of(255), Band::Darkest);
        assert_eq!(Band::of(i32::MAX), Band::Darkest);
    }

    #[test]
    fn uniform_images_render_one_band() {
        let blank = render(&filled(0));
        assert_eq!(blank, "░░░░░░\n".repeat(3));
        let full = render(&filled(255));
        assert_eq!(full, "██████\n".repeat(3));
    }

    #[test]
    fn two_by_two_uses_all_bands() {
        let image = Image::new(5, 2, 2, vec![0, 64, 128, 192]).unwrap();
        assert_eq!(
            bands(&image),
            vec![
                Band::Lightest,
                Band::LightMedium,
                Band::DarkMedium,
                Band::Darkest
            ]
        );
        assert_eq!(render(&image), "░░▒▒\n▓▓██\n");
        assert_eq!(render_with(&image, Glyphs::Ascii), "  ..\n++##\n");
    }

    #[test]
    fn non_square_images_index_row_major() {
        let image = Image::new(1, 2, 3, vec![0, 0, 255, 255, 0, 0]).unwrap();
        assert_eq!(render_with(&image, Glyphs::Ascii), "    ##\n##    \n");
    }

    #[test]
    fn degenerate_dimensions_render_nothing() {
        let loaded =
            read_dataset(Cursor::new("h\n5\n"), &LoadOptions::new(0, usize::MAX)).unwrap();
        assert_eq!(loaded.count(), 1);
        assert_eq!(render(&loaded[0]), "");
        assert!(render_properties(&loaded[0], Glyphs::Ascii).contains("no data"));

        let loaded =
            read_dataset(Cursor::new("h\n5\n"), &LoadOptions::new(usize::MAX, 0)).unwrap();
        assert_eq!(render(&loaded[0]), "");
    }

    #[test]
    fn summary_reports_metadata() {
        let dataset = Dataset::new(2, 2, vec![Image::new(7, 2, 2, vec![0; 4]).unwrap()]);
        let summary = render_summary(&dataset);
        assert!(summary.contains("Dataset Length: 1"));
        assert!(summary.contains("Image Size: 2 by 2"));
        assert!(summary.contains("Head Label: 7"));
    }

    #[test]
    fn empty_dataset_reports_no_data() {
        let dataset = Dataset::new(28, 28, Vec::new());
        assert!(render_summary(&dataset).contains("Head Image: no data"));
        assert_eq!(render_head(&dataset, Glyphs::Unicode), "Image Contents: no data\n");
    }

    #[test]
    fn properties_of_pixelless_image() {
        let image = Image::new(3, 0, 4, Vec::new()).unwrap();
        let text = render_properties(&image, Glyphs::Unicode);
        assert!(text.contains("Image Size: 0 by 4"));
        assert!(text.contains("Image Label: 3"));
        assert!(text.contains("Image Contents: no data"));
    }
}
