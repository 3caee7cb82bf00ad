use std::io::BufRead;

use log::{debug, trace};

use super::LoadOptions;
use crate::error::{DatasetError, Result};
use crate::image::{decode, Image};
use crate::tokenize::tokenize_bytes;

// Stream rows out of a CSV source and decode each one into an image.
// The expected format is:
// - A header row, which is skipped whatever it contains
// - One image per row after that
// - Each row starts with the label
// - The rest of the row is height*width pixel values, row-major
// Blank lines are skipped. Any row that doesn't decode aborts the whole build.
pub fn build_images<R: BufRead>(mut reader: R, options: &LoadOptions) -> Result<Vec<Image>> {
    let field_count = options.field_count()?;

    let mut images = Vec::new();
    let mut line = Vec::new();
    let mut line_number = 0_usize;
    loop {
        if options.limit.is_some_and(|limit| images.len() >= limit) {
            debug!("Stopping after {} images", images.len());
            break;
        }

        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| DatasetError::Read {
                line: line_number + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        if line_number == 1 {
            debug!("Skipping header row");
            continue;
        }
        if is_blank(&line) {
            trace!("Skipping blank line {}", line_number);
            continue;
        }

        let tokens = tokenize_bytes(&line, field_count, options.max_field_width);
        let image = decode(&tokens, options.height, options.width).map_err(|source| {
            DatasetError::Row {
                line: line_number,
                source,
            }
        })?;
        trace!("Line {}: label {}", line_number, image.label());
        images.push(image);
    }
    Ok(images)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&byte| byte == b'\n' || byte == b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use std::io::{self, BufReader, Cursor, Read};

    // Hands out its text, then fails instead of reporting end of input
    struct FailsAtEnd(Cursor<&'static str>);

    impl Read for FailsAtEnd {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device went away")),
                n => Ok(n),
            }
        }
    }

    fn build(text: &str, options: &LoadOptions) -> Result<Vec<Image>> {
        build_images(Cursor::new(text), options)
    }

    #[test]
    fn header_is_always_skipped() {
        let options = LoadOptions::new(1, 1);
        // Even a header that looks like data
        let images = build("1,2\n3,4\n", &options).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].label(), 3);

        assert!(build("", &options).unwrap().is_empty());
        assert!(build("label,pixel0", &options).unwrap().is_empty());
    }

    #[test]
    fn rows_keep_file_order() {
        let options = LoadOptions::new(1, 2);
        let images = build("h\n1,1,1\n2,2,2\r\n3,3,3", &options).unwrap();
        let labels: Vec<i32> = images.iter().map(Image::label).collect();
        assert_eq!(labels, vec![1, 2, 3]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let options = LoadOptions::new(1, 1);
        let images = build("h\n\n1,5\n\r\n2,6\n\n", &options).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn bad_row_aborts_with_line_number() {
        let options = LoadOptions::new(2, 2);
        let err = build("h\n1,1,1,1,1\n2,2,2\n3,3,3,3,3\n", &options).unwrap_err();
        match err {
            DatasetError::Row { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(
                    source,
                    DecodeError::IncompleteRow {
                        expected: 5,
                        found: 3
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_failure_discards_decoded_rows() {
        let reader = BufReader::new(FailsAtEnd(Cursor::new("h\n1,1\n")));
        match build_images(reader, &LoadOptions::new(1, 1)) {
            Err(DatasetError::Read { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(source.kind(), io::ErrorKind::Other);
            }
            other => panic!("expected a read error, got {other:?}"),
        }
    }

    #[test]
    fn limit_stops_early() {
        let options = LoadOptions::new(1, 1).with_limit(2);
        // The malformed third row is never read
        let images = build("h\n1,1\n2,2\nbroken\n", &options).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn overflowing_dimensions_fail_up_front() {
        let options = LoadOptions::new(usize::MAX, usize::MAX);
        assert!(matches!(
            build("h\n1\n", &options),
            Err(DatasetError::Dimensions { .. })
        ));
    }
}
