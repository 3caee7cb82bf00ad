use crate::error::DecodeError;

/// One labeled sample: a label plus a row-major `height x width` pixel grid.
///
/// Pixel values are stored as read, with no range check. They may be
/// negative or above 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    label: i32,
    height: usize,
    width: usize,
    pixels: Vec<i32>,
}

impl Image {
    /// Builds an image from an owned pixel buffer.
    /// Fails unless `pixels.len() == height * width`.
    pub fn new(
        label: i32,
        height: usize,
        width: usize,
        pixels: Vec<i32>,
    ) -> Result<Self, DecodeError> {
        let expected = height.saturating_mul(width);
        if pixels.len() != expected {
            return Err(DecodeError::IncompleteRow {
                expected: expected.saturating_add(1),
                found: pixels.len() + 1,
            });
        }
        Ok(Image {
            label,
            height,
            width,
            pixels,
        })
    }

    pub fn label(&self) -> i32 {
        self.label
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The flattened, row-major pixel values.
    pub fn pixels(&self) -> &[i32] {
        &self.pixels
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<i32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pixels.get(row * self.width + col).copied()
    }

    /// Iterates over the image one pixel row at a time.
    /// An image without pixels has no rows, whatever its declared height.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        // chunks() needs a non-zero size; with width 0 there is nothing to chunk
        self.pixels.chunks(self.width.max(1))
    }

    pub fn into_parts(self) -> (i32, Vec<i32>) {
        (self.label, self.pixels)
    }
}

/// Decodes one tokenized row. Token 0 is the label, the rest are pixels in
/// the order they appeared in the file.
pub fn decode(tokens: &[i32], height: usize, width: usize) -> Result<Image, DecodeError> {
    let expected = height.saturating_mul(width).saturating_add(1);
    match tokens.split_first() {
        Some((&label, pixels)) if tokens.len() == expected => {
            Image::new(label, height, width, pixels.to_vec())
        }
        _ => Err(DecodeError::IncompleteRow {
            expected,
            found: tokens.len(),
        }),
    }
}
