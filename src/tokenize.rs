// Splits one CSV row into integer fields.
//
// Parsing is deliberately lenient, in the style of C's `atoi`: anything that
// isn't a number reads as 0, and over-long fields are cut short instead of
// rejected. Tokenizing never fails; a row that ends early just produces
// fewer tokens, and it is up to the decoder to reject it.

/// Field buffer size used when none is configured. At most
/// `DEFAULT_MAX_FIELD_WIDTH - 1` characters of each field are kept.
pub const DEFAULT_MAX_FIELD_WIDTH: usize = 10;

const DELIMITER: u8 = b',';

pub fn tokenize(line: &str, field_count: usize, max_field_width: usize) -> Vec<i32> {
    tokenize_bytes(line.as_bytes(), field_count, max_field_width)
}

/// Byte-level version of [`tokenize`], used by the dataset builder so that
/// rows which aren't valid UTF-8 still parse.
pub fn tokenize_bytes(line: &[u8], field_count: usize, max_field_width: usize) -> Vec<i32> {
    // One slot is reserved for a terminator, as in a C string buffer
    let keep = max_field_width.saturating_sub(1);
    let mut tokens = Vec::with_capacity(field_count);
    if field_count == 0 {
        return tokens;
    }

    let mut start = 0;
    let mut end = line.len();
    for (pos, &byte) in line.iter().enumerate() {
        match byte {
            DELIMITER => {
                tokens.push(parse_field(&line[start..pos], keep));
                if tokens.len() == field_count {
                    return tokens;
                }
                start = pos + 1;
            }
            b'\n' | b'\r' => {
                end = pos;
                break;
            }
            _ => {}
        }
    }

    // The last field is ended by the terminator. A line with no content at
    // all contributes nothing.
    if start < end || !tokens.is_empty() {
        tokens.push(parse_field(&line[start..end], keep));
    }
    tokens
}

fn parse_field(field: &[u8], keep: usize) -> i32 {
    parse_int(&field[..field.len().min(keep)])
}

// Leading whitespace, an optional sign, then digits up to the first
// non-digit. No digits means 0. Out of range values saturate.
fn parse_int(text: &[u8]) -> i32 {
    let mut rest = text
        .iter()
        .skip_while(|byte| byte.is_ascii_whitespace())
        .peekable();
    let negative = match rest.peek() {
        Some(&&b'-') => {
            rest.next();
            true
        }
        Some(&&b'+') => {
            rest.next();
            false
        }
        _ => false,
    };

    let ceiling = i64::from(i32::MAX) + 1;
    let mut value: i64 = 0;
    for byte in rest.take_while(|byte| byte.is_ascii_digit()) {
        value = (value * 10 + i64::from(byte - b'0')).min(ceiling);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
