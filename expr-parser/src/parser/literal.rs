//! Scanning of numeric literals.

/// Returns the index of the first byte at or after `pos` that is not an ASCII digit.
fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// Scans a numeric constant starting at byte offset `pos` of `text`, returning its value and the
/// offset just past it.
///
/// A constant is an optional leading `-`, a run of digits, and optionally a `.` followed by
/// another run of digits. The `.` is only consumed if a digit follows it. There is no exponent
/// notation and no leading `+`.
///
/// Scanning never fails: if no digits are found, the value is `0.0`.
///
/// ```
/// use expr_parser::parser::literal::scan_constant;
///
/// assert_eq!(scan_constant("x+12.5*2", 2), (12.5, 6));
/// assert_eq!(scan_constant("-3", 0), (-3.0, 2));
/// assert_eq!(scan_constant("7.", 0), (7.0, 1));
/// ```
pub fn scan_constant(text: &str, pos: usize) -> (f64, usize) {
    let bytes = text.as_bytes();
    let start = pos;
    let mut end = pos;

    if bytes.get(end) == Some(&b'-') {
        end += 1;
    }
    let digits_start = end;
    end = skip_digits(bytes, end);
    let mut has_digits = end > digits_start;

    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = skip_digits(bytes, end + 1);
        has_digits = true;
    }

    if !has_digits {
        return (0.0, end);
    }

    // the slice is made of ASCII digits, an optional sign and an optional `.`, so it always
    // parses; a leading `.` (as in `-.5`) is accepted by `f64::from_str` too
    let value = text[start..end].parse::<f64>().unwrap_or(0.0);
    (value, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer() {
        assert_eq!(scan_constant("16", 0), (16.0, 2));
    }

    #[test]
    fn decimal() {
        assert_eq!(scan_constant("3.14", 0), (3.14, 4));
    }

    #[test]
    fn negative() {
        assert_eq!(scan_constant("-0.25", 0), (-0.25, 5));
    }

    #[test]
    fn offset_into_text() {
        assert_eq!(scan_constant("sin(42)", 4), (42.0, 6));
    }

    #[test]
    fn trailing_dot_is_not_consumed() {
        assert_eq!(scan_constant("5.x", 0), (5.0, 1));
    }

    #[test]
    fn fraction_without_integer_part() {
        assert_eq!(scan_constant(".5", 0), (0.5, 2));
    }

    #[test]
    fn no_digits() {
        assert_eq!(scan_constant("x", 0), (0.0, 0));
        assert_eq!(scan_constant("-x", 0), (0.0, 1));
        assert_eq!(scan_constant("", 0), (0.0, 0));
    }
}
