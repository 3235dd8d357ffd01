//! Y axis labels and number formatting.

use crate::scale::{widen_degenerate, LinearScale};

/// Formats `value` with `precision` fractional digits.
///
/// Values that round to zero never print a minus sign.
#[must_use]
pub fn format_value(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(digits) if digits.chars().all(|c| c == '0' || c == '.') => digits.to_string(),
        _ => text,
    }
}

/// Builds one right-aligned label per raster row (index 0 = bottom row).
///
/// Each label is the value its row stands for, followed by a space, so the
/// result can be passed straight to [`Chart::render`](crate::chart::Chart::render)
/// as row prefixes.
#[must_use]
pub fn axis_labels(range: (f64, f64), rows: usize, precision: usize) -> Vec<String> {
    let range = widen_degenerate(range);
    let top = rows.saturating_sub(1) as f64;

    let values: Vec<f64> = match LinearScale::new((0.0, top), range) {
        Ok(scale) => (0..rows).map(|row| scale.scale(row as f64)).collect(),
        // A single row has no extent to interpolate over.
        Err(_) => vec![(range.0 + range.1) / 2.0; rows],
    };

    let texts: Vec<String> = values.iter().map(|&v| format_value(v, precision)).collect();
    let width = texts.iter().map(String::len).max().unwrap_or(0);

    texts.into_iter().map(|text| format!("{text:>width$} ")).collect()
}

/// Width in columns taken by the labels for `range`.
#[must_use]
pub fn label_width(range: (f64, f64), rows: usize, precision: usize) -> usize {
    axis_labels(range, rows, precision).first().map_or(0, |label| label.chars().count())
}
