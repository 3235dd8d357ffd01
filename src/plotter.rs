//! The read-render loop.
//!
//! A [`Plotter`] owns one [`StatsRingBuffer`] per series and a [`Chart`]
//! sized to match. Each input line is split into samples, pushed into the
//! buffers, and (unless in batch mode) the whole frame is redrawn: title,
//! labelled chart and a statistics footer.

use crate::chart::{AxisMode, Chart, Series};
use crate::config::Config;
use crate::error::Result;
use crate::input::parse_line;
use crate::labels::{axis_labels, format_value, label_width};
use crate::ring_buffer::StatsRingBuffer;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{BufRead, Write};

/// Chart width used when neither the config nor the terminal gives one.
pub const DEFAULT_COLS: usize = 80;

/// Picks the initial chart width: the configured one, else whatever the
/// terminal leaves after a guess at the label width, else [`DEFAULT_COLS`].
///
/// The guess only sizes the buffers; [`Plotter::fit_width`] keeps frames
/// inside the terminal once the real labels are known.
#[must_use]
pub fn resolve_cols(config: &Config, terminal_width: Option<usize>) -> usize {
    if let Some(cols) = config.cols {
        return cols;
    }
    // sign, six integer digits, decimal point and the separating space
    let label_room = config.precision + 9;
    terminal_width.map_or(DEFAULT_COLS, |width| width.saturating_sub(label_room).max(2))
}

/// Streaming line-chart plotter.
#[derive(Debug, Clone)]
pub struct Plotter {
    config: Config,
    chart: Chart,
    buffers: Vec<StatsRingBuffer>,
    lines_read: u64,
    /// Terminal width every rendered row must fit in.
    width: Option<usize>,
    /// Widest chart the buffers can fill.
    max_cols: usize,
}

impl Plotter {
    /// Creates a plotter drawing `cols` columns wide.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the dimensions leave no
    /// data column.
    pub fn new(config: Config, cols: usize) -> Result<Self> {
        config.validate()?;
        let chart = Chart::new(config.rows, cols, config.axis)?;
        let buffers = (0..config.series)
            .map(|_| StatsRingBuffer::new(chart.data_columns()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { config, chart, buffers, lines_read: 0, width: None, max_cols: cols })
    }

    /// Keeps labels plus chart within `width` columns.
    ///
    /// Each frame the chart is narrowed to what the labels leave free,
    /// showing only the newest samples, and widened back (up to the width it
    /// was created with) when the labels shrink again.
    #[must_use]
    pub fn fit_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// The chart as last drawn.
    #[must_use]
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One buffer per series.
    #[must_use]
    pub fn buffers(&self) -> &[StatsRingBuffer] {
        &self.buffers
    }

    /// Number of non-blank lines consumed.
    #[must_use]
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Parses `line` and pushes its samples. Returns false for a blank line.
    pub fn push_line(&mut self, line: &str) -> bool {
        let Some(samples) = parse_line(line, self.buffers.len()) else {
            return false;
        };
        self.lines_read += 1;
        self.push_samples(&samples);
        true
    }

    /// Pushes one sample per series; missing samples count as dropped.
    pub fn push_samples(&mut self, samples: &[f64]) {
        for (index, buffer) in self.buffers.iter_mut().enumerate() {
            let sample = samples.get(index).copied().unwrap_or(f64::NAN);
            buffer.enqueue(sample);
            if !sample.is_finite() {
                log::debug!(
                    "dropped sample for series {index} on line {} ({} dropped so far)",
                    self.lines_read,
                    buffer.dropped_count()
                );
            }
        }
    }

    /// The value range the next frame is drawn in.
    ///
    /// Fixed bounds come from the config; the rest follow the buffers.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        if let (Some(min), Some(max)) = (self.config.min, self.config.max) {
            return (min, max);
        }

        let auto = self
            .buffers
            .iter()
            .filter_map(|b| Some((b.min().ok()?, b.max().ok()?)))
            .reduce(|(lo, hi), (min, max)| (lo.min(min), hi.max(max)))
            .unwrap_or((0.0, 0.0));

        self.config.resolve_range(auto)
    }

    /// Current buffer contents as colored series.
    #[must_use]
    pub fn series(&self) -> Vec<Series> {
        self.buffers
            .iter()
            .enumerate()
            .map(|(index, buffer)| {
                buffer.iter().collect::<Series>().color(self.config.series_color(index))
            })
            .collect()
    }

    /// Redraws the chart and returns the full frame text.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is not finite.
    pub fn frame(&mut self) -> Result<String> {
        let range = self.range();
        log::trace!("drawing {} series in [{}, {}]", self.buffers.len(), range.0, range.1);

        self.fit_chart(label_width(range, self.config.rows, self.config.precision))?;

        let series = self.series();
        self.chart.clear();
        self.chart.draw_in_range(&series, range)?;

        let labels = axis_labels(range, self.chart.rows(), self.config.precision);
        let mut frame = String::new();

        if let Some(title) = &self.config.title {
            frame.push_str(title);
            frame.push('\n');
        }
        frame.push_str(&self.chart.render(&labels, &[]));
        for index in 0..self.buffers.len() {
            frame.push_str(&self.stats_line(index));
            frame.push('\n');
        }

        Ok(frame)
    }

    /// Statistics footer line for series `index`.
    #[must_use]
    pub fn stats_line(&self, index: usize) -> String {
        let Some(buffer) = self.buffers.get(index) else {
            return String::new();
        };
        let color = self.config.series_color(index);
        let precision = self.config.precision;
        let fmt = |v: f64| format_value(v, precision);

        let text = match (buffer.stats(), buffer.latest()) {
            (Some(stats), Some(last)) => format!(
                "[{index}] last={} min={} max={} avg={} std={} dropped={}",
                fmt(last),
                fmt(stats.min),
                fmt(stats.max),
                fmt(stats.avg),
                stats.std_dev.map_or_else(|| "-".to_string(), fmt),
                stats.dropped,
            ),
            _ => format!("[{index}] no data dropped={}", buffer.dropped_count()),
        };

        color.paint(&text)
    }

    /// Consumes `input` line by line and writes frames to `out`.
    ///
    /// In streaming mode a frame is written after every non-blank line; in
    /// batch mode a single frame is written at end of input. With `terminal`
    /// set, streaming frames repaint the screen in place and the cursor is
    /// hidden until the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, terminal: bool) -> Result<()> {
        let live = terminal && !self.config.batch;

        if live {
            queue!(out, Hide)?;
        }
        let result = self.stream(input, out, live);
        if live {
            queue!(out, Show)?;
            out.flush()?;
        }
        result?;

        if self.config.batch {
            self.write_frame(out, false)?;
        }

        log::info!(
            "end of input after {} lines, {} samples dropped",
            self.lines_read,
            self.buffers.iter().map(StatsRingBuffer::dropped_count).sum::<u64>()
        );
        Ok(())
    }

    fn fit_chart(&mut self, label_width: usize) -> Result<()> {
        let Some(width) = self.width else {
            return Ok(());
        };
        let min_cols = if self.config.axis == AxisMode::Reserved { 2 } else { 1 };
        let cols = width.saturating_sub(label_width).min(self.max_cols).max(min_cols);

        if cols != self.chart.cols() {
            log::debug!(
                "resizing chart from {} to {cols} columns for {label_width}-column labels",
                self.chart.cols()
            );
            self.chart = Chart::new(self.config.rows, cols, self.config.axis)?;
        }
        Ok(())
    }

    fn stream<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, live: bool) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if self.push_line(&line) && !self.config.batch {
                self.write_frame(out, live)?;
            }
        }
        Ok(())
    }

    fn write_frame<W: Write>(&mut self, out: &mut W, live: bool) -> Result<()> {
        let frame = self.frame()?;
        if live {
            queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        }
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
