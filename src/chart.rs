//! Box-drawing line chart rasterizer.
//!
//! Converts one or more series of samples into a grid of [`Segment`] cells.
//! Each column's value is quantized to a row; consecutive rows are joined by
//! vertical connector half-edges so the line reads as one continuous stroke:
//!
//! ```text
//!      ╭─╮
//!   ╭──╯ │
//! ──╯    ╰─
//! ```
//!
//! Row 0 is the bottom of the chart. Multiple series are drawn in order into
//! the same grid; where they overlap, segments are merged and colors mixed.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::scale::LinearScale;
use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Glyph printed for a segment set that has no box-drawing character.
pub const PLACEHOLDER: &str = "?";

// ============================================================================
// Axis
// ============================================================================

/// Placement of the Y axis column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Column 0 is the axis; data starts at column 1.
    #[default]
    Reserved,
    /// Column 0 is the axis and data starts at column 0, merging onto it.
    Overlay,
    /// No axis; every column holds data.
    Hidden,
}

impl AxisMode {
    /// Returns true if column 0 carries the axis glyph.
    #[must_use]
    pub fn shows_axis(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl FromStr for AxisMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reserved" => Ok(Self::Reserved),
            "overlay" => Ok(Self::Overlay),
            "hidden" | "none" => Ok(Self::Hidden),
            other => Err(Error::ConfigInvalid {
                key: "axis".to_string(),
                message: format!("expected reserved, overlay or hidden, got '{other}'"),
            }),
        }
    }
}

// ============================================================================
// Cell
// ============================================================================

/// One chart cell: the segments drawn there and their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Half-edges drawn in this cell.
    pub segment: Segment,
    /// Foreground color of the glyph.
    pub color: Color,
}

impl Cell {
    /// Creates a cell.
    #[must_use]
    pub const fn new(segment: Segment, color: Color) -> Self {
        Self { segment, color }
    }

    /// Merges another contribution into this cell.
    ///
    /// Segments are united and colors mixed with [`Color::overlap`].
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self { segment: self.segment.combine(other.segment), color: self.color.overlap(other.color) }
    }

    /// Returns the glyph for this cell, or [`PLACEHOLDER`].
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        self.segment.glyph().unwrap_or(PLACEHOLDER)
    }
}

// ============================================================================
// Series
// ============================================================================

/// A data series drawn as one line.
///
/// Non-finite values are gaps: they keep the previous row and are drawn as a
/// short stub instead of a connected line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    values: Vec<f64>,
    color: Color,
    range: Option<(f64, f64)>,
}

impl Series {
    /// Create a new series from values, oldest first.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), color: Color::Default, range: None }
    }

    /// Set the line color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Fix the quantization range instead of sharing the chart's auto range.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// The series values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The line color.
    #[must_use]
    pub fn line_color(&self) -> Color {
        self.color
    }

    /// The explicit range, if any.
    #[must_use]
    pub fn explicit_range(&self) -> Option<(f64, f64)> {
        self.range
    }

    /// The last `n` values.
    fn tail(&self, n: usize) -> &[f64] {
        &self.values[self.values.len().saturating_sub(n)..]
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

// ============================================================================
// Rasterization
// ============================================================================

/// Quantized height of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Column {
    row: i64,
    /// Row of the last real sample before this column, if any.
    previous: Option<i64>,
    gap: bool,
}

/// Quantizes `values` into rows, resolving gaps.
///
/// A gap inherits the row of the last real sample, or `midpoint` when none
/// came before it.
fn quantize_columns(values: &[f64], scale: &LinearScale, midpoint: i64) -> Vec<Column> {
    let mut last_real: Option<i64> = None;

    values
        .iter()
        .map(|&value| {
            if value.is_finite() {
                let row = scale.quantize(value);
                let column = Column { row, previous: last_real, gap: false };
                last_real = Some(row);
                column
            } else {
                Column { row: last_real.unwrap_or(midpoint), previous: last_real, gap: true }
            }
        })
        .collect()
}

/// Segments a column contributes to raster row `row`.
///
/// `current` is the column's quantized row and `previous` the row of the
/// preceding real sample. A column with no predecessor enters from the left
/// at its own height. That includes the first real sample after leading
/// gaps: it does not connect to the midpoint row the gaps were parked on.
#[must_use]
pub fn column_segment(row: i64, current: i64, previous: Option<i64>, gap: bool) -> Segment {
    if gap {
        return if row == current { Segment::LEFT } else { Segment::EMPTY };
    }

    let mut segment = if row == current { Segment::RIGHT } else { Segment::EMPTY };
    let previous = previous.unwrap_or(current);

    if row == previous {
        segment = segment.combine(Segment::LEFT);
    }
    if previous > current {
        if previous >= row && row > current {
            segment = segment.combine(Segment::DOWN);
        }
        if previous > row && row >= current {
            segment = segment.combine(Segment::UP);
        }
    } else if previous < current {
        if previous <= row && row < current {
            segment = segment.combine(Segment::UP);
        }
        if previous < row && row <= current {
            segment = segment.combine(Segment::DOWN);
        }
    }

    segment
}

/// Finite min/max over `values`, or `None` if there is none.
fn finite_extent<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values.into_iter().filter(|v| v.is_finite()).fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ============================================================================
// Chart
// ============================================================================

/// A fixed-size grid of line segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    rows: usize,
    cols: usize,
    axis: AxisMode,
    /// Row-major, row 0 at the bottom.
    cells: Vec<Cell>,
}

impl Chart {
    /// Create a cleared chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero, or if
    /// a reserved axis leaves no data column.
    pub fn new(rows: usize, cols: usize, axis: AxisMode) -> Result<Self> {
        let min_cols = if axis == AxisMode::Reserved { 2 } else { 1 };
        if rows == 0 || cols < min_cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let mut chart = Self { rows, cols, axis, cells: vec![Cell::default(); rows * cols] };
        chart.clear();
        Ok(chart)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, including the axis column.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Axis placement.
    #[must_use]
    pub fn axis(&self) -> AxisMode {
        self.axis
    }

    /// Number of columns available to each series.
    #[must_use]
    pub fn data_columns(&self) -> usize {
        self.cols - self.first_data_column()
    }

    fn first_data_column(&self) -> usize {
        usize::from(self.axis == AxisMode::Reserved)
    }

    /// Returns the cell at `(row, col)`, row 0 being the bottom.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// Empties every cell and redraws the axis column.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        if self.axis.shows_axis() {
            for row in 0..self.rows {
                self.cells[row * self.cols] = Cell::new(Segment::AXIS, Color::Default);
            }
        }
    }

    /// Shared auto range: finite min/max over the visible tail of every series.
    ///
    /// Returns `(0.0, 0.0)` when no series has a finite visible value.
    #[must_use]
    pub fn auto_range(&self, series: &[Series]) -> (f64, f64) {
        let width = self.data_columns();
        finite_extent(series.iter().flat_map(|s| s.tail(width))).unwrap_or((0.0, 0.0))
    }

    /// Draw every series against the chart's auto range.
    ///
    /// Series with an explicit range use it instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if an explicit range is not finite.
    pub fn draw(&mut self, series: &[Series]) -> Result<()> {
        let range = self.auto_range(series);
        self.draw_in_range(series, range)
    }

    /// Draw every series against a caller-supplied shared range.
    ///
    /// Series with an explicit range use it instead. Series are drawn in
    /// slice order, which decides how overlapping colors mix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if a range is not finite.
    pub fn draw_in_range(&mut self, series: &[Series], range: (f64, f64)) -> Result<()> {
        for s in series {
            self.draw_series(s, s.explicit_range().unwrap_or(range))?;
        }
        Ok(())
    }

    fn draw_series(&mut self, series: &Series, range: (f64, f64)) -> Result<()> {
        let scale = LinearScale::rows(range, self.rows)?;
        let midpoint = (self.rows as i64 - 1) / 2;
        let columns = quantize_columns(series.tail(self.data_columns()), &scale, midpoint);
        let top = self.rows as i64 - 1;
        let first = self.first_data_column();

        for (offset, column) in columns.iter().enumerate() {
            let from = column.previous.filter(|_| !column.gap).unwrap_or(column.row);
            let lo = column.row.min(from).max(0);
            let hi = column.row.max(from).min(top);

            for row in lo..=hi {
                let segment = column_segment(row, column.row, column.previous, column.gap);
                if !segment.is_empty() {
                    let index = row as usize * self.cols + first + offset;
                    self.cells[index] = self.cells[index].combine(Cell::new(segment, series.color));
                }
            }
        }

        Ok(())
    }

    /// Render the grid to text, top row first.
    ///
    /// `prefixes` and `suffixes` are indexed by raster row (0 = bottom); rows
    /// without an entry get none. Runs of same-colored cells share one pair
    /// of escape sequences.
    #[must_use]
    pub fn render(&self, prefixes: &[String], suffixes: &[String]) -> String {
        let mut output = String::with_capacity(self.rows * (self.cols * 4 + 16));

        for row in (0..self.rows).rev() {
            if let Some(prefix) = prefixes.get(row) {
                output.push_str(prefix);
            }

            let cells = &self.cells[row * self.cols..(row + 1) * self.cols];
            let mut run_color = Color::Default;
            let mut run = String::new();

            for cell in cells {
                // Empty cells carry no color; keep them in the current run.
                let color = if cell.segment.is_empty() { run_color } else { cell.color };
                if color != run_color {
                    output.push_str(&run_color.paint(&run));
                    run.clear();
                    run_color = color;
                }
                run.push_str(cell.glyph());
            }
            output.push_str(&run_color.paint(&run));

            if let Some(suffix) = suffixes.get(row) {
                output.push_str(suffix);
            }
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[], &[]))
    }
}

/// Strips SGR color sequences from rendered chart text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

// ============================================================================
// Tests
// ============================================================================
