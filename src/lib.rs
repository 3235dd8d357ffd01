//! # Trueno-Plot
//!
//! Streaming line charts for the terminal, drawn with Unicode box-drawing
//! characters.
//!
//! Samples arrive one line at a time and land in fixed-capacity ring buffers
//! that keep running statistics. Each redraw quantizes the buffered window to
//! chart rows and joins neighbouring rows with corner and bar glyphs, so the
//! chart reads as a single continuous line per series.
//!
//! ## Features
//!
//! - **Streaming**: O(1) push with running min/max/mean/deviation
//! - **Box drawing**: 4-bit half-edge segments mapped to `─ │ ╭ ╮ ╰ ╯ ┤ ┼ …`
//! - **Multiple series**: per-series colors mixed where lines overlap
//! - **Configurable**: YAML config file layered under command-line flags
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_plot::prelude::*;
//!
//! let mut chart = Chart::new(4, 9, AxisMode::Reserved)?;
//! chart.draw(&[Series::new(vec![0.0, 1.0, 3.0, 2.0]).color(Color::Cyan)])?;
//! print!("{chart}");
//! # Ok::<(), trueno_plot::Error>(())
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Fixed-capacity sample buffer with running statistics.
pub mod ring_buffer;

/// Box-drawing half-edge segments.
pub mod segment;

/// ANSI color model and mixing.
pub mod color;

/// Scale functions for value-to-row mappings.
pub mod scale;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Line chart rasterization and text rendering.
pub mod chart;

/// Axis labels and number formatting.
pub mod labels;

// ============================================================================
// Application Modules
// ============================================================================

/// Configuration file and command-line overrides.
pub mod config;

/// Input line parsing.
pub mod input;

/// Streaming read-render loop.
pub mod plotter;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-plot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use trueno_plot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{AxisMode, Cell, Chart, Series};
    pub use crate::color::Color;
    pub use crate::config::{Config, Overrides};
    pub use crate::error::{Error, Result};
    pub use crate::plotter::Plotter;
    pub use crate::ring_buffer::{StatsRingBuffer, Summary};
    pub use crate::scale::{lerp, LinearScale};
    pub use crate::segment::Segment;
}

// ============================================================================
// Tests
// ============================================================================
