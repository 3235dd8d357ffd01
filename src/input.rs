//! Splitting input lines into per-series samples.
//!
//! A line holds one value per series, separated by whitespace, commas or
//! semicolons. Tokens that do not parse as numbers become NaN, which the ring
//! buffer counts as dropped.

/// Characters that separate values on a line.
const SEPARATORS: [char; 2] = [',', ';'];

/// Parses one sample for each of `series` series out of `line`.
///
/// Missing trailing values become NaN; extra values are ignored. Returns
/// `None` for a blank line, which carries no samples at all.
#[must_use]
pub fn parse_line(line: &str, series: usize) -> Option<Vec<f64>> {
    let mut tokens = line
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .peekable();

    tokens.peek()?;

    let mut samples: Vec<f64> =
        tokens.take(series).map(|token| token.parse::<f64>().unwrap_or(f64::NAN)).collect();
    samples.resize(series, f64::NAN);
    Some(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert_eq!(parse_line("42.5\n", 1), Some(vec![42.5]));
        assert_eq!(parse_line("  -3e2  ", 1), Some(vec![-300.0]));
    }

    #[test]
    fn test_multiple_separators() {
        assert_eq!(parse_line("1 2\t3", 3), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(parse_line("1,2;3", 3), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(parse_line("1, 2 ,  3", 3), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_extra_values_ignored() {
        assert_eq!(parse_line("1 2 3", 2), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn test_missing_values_are_nan() {
        let samples = parse_line("7", 3).unwrap();
        assert_eq!(samples[0], 7.0);
        assert!(samples[1].is_nan());
        assert!(samples[2].is_nan());
    }

    #[test]
    fn test_garbage_is_nan() {
        let samples = parse_line("abc 4", 2).unwrap();
        assert!(samples[0].is_nan());
        assert_eq!(samples[1], 4.0);
    }

    #[test]
    fn test_blank_line_has_no_samples() {
        assert_eq!(parse_line("", 1), None);
        assert_eq!(parse_line("   \t ", 2), None);
        assert_eq!(parse_line(",,", 1), None);
    }
}
