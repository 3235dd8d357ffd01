//! Configuration for the plotter.
//!
//! Supports YAML configuration with precedence: CLI > file > defaults.

use crate::chart::AxisMode;
use crate::color::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest number of fractional digits accepted for labels.
pub const MAX_PRECISION: usize = 15;

/// Plotter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Chart height in rows.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Chart width in columns, axis included. `None` fits the terminal.
    #[serde(default)]
    pub cols: Option<usize>,

    /// Number of series read from each input line.
    #[serde(default = "default_series")]
    pub series: usize,

    /// Per-series colors; missing entries fall back to the palette.
    #[serde(default)]
    pub colors: Vec<Color>,

    /// Fixed lower bound of the value range. `None` tracks the data.
    #[serde(default)]
    pub min: Option<f64>,

    /// Fixed upper bound of the value range. `None` tracks the data.
    #[serde(default)]
    pub max: Option<f64>,

    /// Fractional digits in axis labels and statistics.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Y axis placement.
    #[serde(default)]
    pub axis: AxisMode,

    /// Title printed above the chart.
    #[serde(default)]
    pub title: Option<String>,

    /// Render once at end of input instead of on every line.
    #[serde(default)]
    pub batch: bool,

    /// Emit ANSI colors.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_rows() -> usize {
    20
}
fn default_series() -> usize {
    1
}
fn default_precision() -> usize {
    2
}
fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: None,
            series: default_series(),
            colors: Vec::new(),
            min: None,
            max: None,
            precision: default_precision(),
            axis: AxisMode::default(),
            title: None,
            batch: false,
            color: default_color(),
        }
    }
}

/// Command-line values layered on top of a loaded [`Config`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Chart height.
    pub rows: Option<usize>,
    /// Chart width.
    pub cols: Option<usize>,
    /// Series count.
    pub series: Option<usize>,
    /// Series colors; replaces the file's list when non-empty.
    pub colors: Vec<Color>,
    /// Fixed lower bound.
    pub min: Option<f64>,
    /// Fixed upper bound.
    pub max: Option<f64>,
    /// Label precision.
    pub precision: Option<usize>,
    /// Axis placement.
    pub axis: Option<AxisMode>,
    /// Title.
    pub title: Option<String>,
    /// Batch mode flag; only ever switches batch mode on.
    pub batch: bool,
    /// Disable colors; only ever switches colors off.
    pub no_color: bool,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/tplot/config.yaml`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tplot").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] if a value is out of bounds.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    ///
    /// A missing file is silent; a broken one is logged and ignored.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => {
                log::debug!("loaded configuration from {}", path.as_ref().display());
                config
            }
            Err(Error::ConfigNotFound(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring configuration: {e}");
                Self::default()
            }
        }
    }

    /// Applies command-line overrides and re-validates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if the merged values are out of bounds.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(rows) = overrides.rows {
            self.rows = rows;
        }
        if let Some(cols) = overrides.cols {
            self.cols = Some(cols);
        }
        if let Some(series) = overrides.series {
            self.series = series;
        }
        if !overrides.colors.is_empty() {
            self.colors.clone_from(&overrides.colors);
        }
        if overrides.min.is_some() {
            self.min = overrides.min;
        }
        if overrides.max.is_some() {
            self.max = overrides.max;
        }
        if let Some(precision) = overrides.precision {
            self.precision = precision;
        }
        if let Some(axis) = overrides.axis {
            self.axis = axis;
        }
        if overrides.title.is_some() {
            self.title.clone_from(&overrides.title);
        }
        self.batch |= overrides.batch;
        self.color &= !overrides.no_color;

        self.validate()?;
        Ok(self)
    }

    /// Checks value bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: String| Error::ConfigInvalid { key: key.to_string(), message };

        if self.rows == 0 {
            return Err(invalid("rows", "must be at least 1".to_string()));
        }
        let min_cols = if self.axis == AxisMode::Reserved { 2 } else { 1 };
        if let Some(cols) = self.cols.filter(|&c| c < min_cols) {
            return Err(invalid("cols", format!("must be at least {min_cols}, got {cols}")));
        }
        if self.series == 0 {
            return Err(invalid("series", "must be at least 1".to_string()));
        }
        if self.precision > MAX_PRECISION {
            return Err(invalid("precision", format!("must be at most {MAX_PRECISION}")));
        }
        for (key, bound) in [("min", self.min), ("max", self.max)] {
            if bound.is_some_and(|v| !v.is_finite()) {
                return Err(invalid(key, "must be a finite number".to_string()));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(invalid("min", format!("{min} is greater than max {max}")));
            }
        }
        Ok(())
    }

    /// Color of series `index`.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if !self.color {
            return Color::Default;
        }
        self.colors.get(index).copied().unwrap_or_else(|| Color::nth(index))
    }

    /// Returns true if both range bounds are fixed.
    #[must_use]
    pub fn has_fixed_range(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Merges the fixed bounds with an automatically computed range.
    #[must_use]
    pub fn resolve_range(&self, auto: (f64, f64)) -> (f64, f64) {
        let min = self.min.unwrap_or(auto.0);
        let max = self.max.unwrap_or(auto.1);
        // A single fixed bound may sit on the wrong side of the data.
        if min > max {
            (max, min)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, None);
        assert_eq!(config.series, 1);
        assert_eq!(config.precision, 2);
        assert_eq!(config.axis, AxisMode::Reserved);
        assert!(config.color);
        assert!(!config.batch);
        assert!(!config.has_fixed_range());
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("rows: 10").unwrap();

        assert_eq!(config.rows, 10);
        assert_eq!(config.series, 1);
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r#"
rows: 12
cols: 60
series: 2
colors: [red, cyan]
min: -1.5
max: 3
precision: 3
axis: overlay
title: load average
batch: true
color: false
"#;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, Some(60));
        assert_eq!(config.series, 2);
        assert_eq!(config.colors, vec![Color::Red, Color::Cyan]);
        assert_eq!(config.min, Some(-1.5));
        assert_eq!(config.max, Some(3.0));
        assert_eq!(config.precision, 3);
        assert_eq!(config.axis, AxisMode::Overlay);
        assert_eq!(config.title.as_deref(), Some("load average"));
        assert!(config.batch);
        assert!(!config.color);
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
rows: 10
series: 1
precision: lots
"#;

        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains('4'), "Error should include line number: {err}");
    }

    #[test]
    fn test_config_unknown_color_fails() {
        assert!(Config::parse("colors: [purple]").is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::parse("rows: 0").is_err());
        assert!(Config::parse("series: 0").is_err());
        assert!(Config::parse("cols: 1").is_err());
        assert!(Config::parse("cols: 1\naxis: hidden").is_ok());
        assert!(Config::parse("precision: 16").is_err());
        assert!(Config::parse("min: 5\nmax: 1").is_err());
        assert!(Config::parse("min: .nan").is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows: 7\ntitle: cpu").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.rows, 7);
        assert_eq!(config.title.as_deref(), Some("cpu"));
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = Config::load("/nonexistent/tplot.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_config_load_or_default() {
        let config = Config::load_or_default("/nonexistent/path");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_or_default_ignores_broken_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows: [").unwrap();

        assert_eq!(Config::load_or_default(file.path()), Config::default());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = Config::parse("rows: 10\ncolors: [red]\ntitle: file").unwrap();
        let overrides = Overrides {
            rows: Some(4),
            colors: vec![Color::Blue],
            max: Some(100.0),
            batch: true,
            ..Overrides::default()
        };

        let config = file.with_overrides(&overrides).unwrap();
        assert_eq!(config.rows, 4);
        assert_eq!(config.colors, vec![Color::Blue]);
        assert_eq!(config.max, Some(100.0));
        assert_eq!(config.title.as_deref(), Some("file"));
        assert!(config.batch);
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = Overrides { min: Some(10.0), max: Some(0.0), ..Overrides::default() };
        assert!(Config::new().with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_series_color() {
        let mut config = Config::parse("colors: [white]").unwrap();

        assert_eq!(config.series_color(0), Color::White);
        assert_eq!(config.series_color(1), Color::nth(1));

        config.color = false;
        assert_eq!(config.series_color(0), Color::Default);
    }

    #[test]
    fn test_resolve_range() {
        let mut config = Config::new();
        assert_eq!(config.resolve_range((1.0, 2.0)), (1.0, 2.0));

        config.min = Some(0.0);
        assert_eq!(config.resolve_range((1.0, 2.0)), (0.0, 2.0));

        config.min = Some(5.0);
        assert_eq!(config.resolve_range((1.0, 2.0)), (2.0, 5.0));

        config.max = Some(10.0);
        assert!(config.has_fixed_range());
        assert_eq!(config.resolve_range((1.0, 2.0)), (5.0, 10.0));
    }

    #[test]
    fn test_default_path_ends_with_file_name() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("tplot/config.yaml"));
        }
    }
}
