//! Linear mappings between data values and chart rows.
//!
//! The same formula maps samples to row indices when rasterizing and row
//! indices back to values when labelling the Y axis.

use crate::error::{Error, Result};

/// Linearly maps `x` from `input` onto `output`.
///
/// Produces NaN or an infinity when `input.0 == input.1`; use
/// [`widen_degenerate`] or [`LinearScale::new`] to guard against that.
#[must_use]
pub fn lerp(input: (f64, f64), output: (f64, f64), x: f64) -> f64 {
    (x - input.0) * (output.1 - output.0) / (input.1 - input.0) + output.0
}

/// Widens an empty range by one unit on each side.
///
/// Only `min == max` is empty; any other range, however narrow, is returned
/// unchanged.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn widen_degenerate(range: (f64, f64)) -> (f64, f64) {
    if range.0 == range.1 {
        (range.0 - 1.0, range.1 + 1.0)
    } else {
        range
    }
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain ends are equal or not finite, or if
    /// their span overflows.
    #[allow(clippy::float_cmp)]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain(format!(
                "Domain must be finite, got [{}, {}]",
                domain.0, domain.1
            )));
        }
        let span = domain.1 - domain.0;
        if span == 0.0 {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }
        if !span.is_finite() {
            return Err(Error::ScaleDomain(format!(
                "Domain span overflows, got [{}, {}]",
                domain.0, domain.1
            )));
        }

        Ok(Self { domain, range })
    }

    /// Create a scale mapping `domain` onto the row indices `0..=rows-1`.
    ///
    /// A degenerate domain is widened first, so this only fails for
    /// non-finite input or a span too large to represent.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain or its span is not finite.
    pub fn rows(domain: (f64, f64), rows: usize) -> Result<Self> {
        let top = rows.saturating_sub(1) as f64;
        Self::new(widen_degenerate(domain), (0.0, top))
    }

    /// Transform a domain value to a range value.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        lerp(self.domain, self.range, value)
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        lerp(self.range, self.domain, value)
    }

    /// Scale and round to the nearest integer index.
    #[must_use]
    pub fn quantize(&self, value: f64) -> i64 {
        self.scale(value).round() as i64
    }

    /// Get the domain extent.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Get the range extent.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_basic() {
        assert_relative_eq!(lerp((0.0, 10.0), (0.0, 100.0), 5.0), 50.0);
        assert_relative_eq!(lerp((0.0, 10.0), (100.0, 0.0), 2.0), 80.0);
        assert_relative_eq!(lerp((-1.0, 1.0), (0.0, 4.0), 0.0), 2.0);
    }

    #[test]
    fn test_lerp_degenerate_is_not_finite() {
        assert!(!lerp((3.0, 3.0), (0.0, 10.0), 3.0).is_finite());
        assert!(!lerp((3.0, 3.0), (0.0, 10.0), 4.0).is_finite());
    }

    #[test]
    fn test_widen_degenerate() {
        assert_eq!(widen_degenerate((5.0, 5.0)), (4.0, 6.0));
        assert_eq!(widen_degenerate((1.0, 2.0)), (1.0, 2.0));
    }

    #[test]
    fn test_widen_degenerate_keeps_tiny_ranges() {
        assert_eq!(widen_degenerate((1e-20, 3e-20)), (1e-20, 3e-20));
        assert_eq!(widen_degenerate((0.0, f64::MIN_POSITIVE)), (0.0, f64::MIN_POSITIVE));
    }

    #[test]
    fn test_linear_scale_equal_domain_fails() {
        assert!(LinearScale::new((1.0, 1.0), (0.0, 10.0)).is_err());
    }

    #[test]
    fn test_linear_scale_overflowing_span_fails() {
        assert!(LinearScale::new((-f64::MAX, f64::MAX), (0.0, 10.0)).is_err());
    }

    #[test]
    fn test_rows_scale_resolves_tiny_domain() {
        let scale = LinearScale::rows((1e-20, 3e-20), 5).unwrap();
        assert_eq!(scale.domain(), (1e-20, 3e-20));
        assert_eq!(scale.quantize(1e-20), 0);
        assert_eq!(scale.quantize(2e-20), 2);
        assert_eq!(scale.quantize(3e-20), 4);
    }

    #[test]
    fn test_linear_scale_non_finite_domain_fails() {
        assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 10.0)).is_err());
        assert!(LinearScale::new((0.0, f64::INFINITY), (0.0, 10.0)).is_err());
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 10.0)).unwrap();
        assert_relative_eq!(scale.scale(50.0), 5.0);
        assert_relative_eq!(scale.invert(5.0), 50.0);
    }

    #[test]
    fn test_rows_scale_widens_flat_domain() {
        let scale = LinearScale::rows((5.0, 5.0), 11).unwrap();
        assert_eq!(scale.domain(), (4.0, 6.0));
        assert_eq!(scale.range(), (0.0, 10.0));
        assert_eq!(scale.quantize(5.0), 5);
    }

    #[test]
    fn test_quantize_rounds_half_away_from_zero() {
        let scale = LinearScale::new((0.0, 4.0), (0.0, 4.0)).unwrap();
        assert_eq!(scale.quantize(1.49), 1);
        assert_eq!(scale.quantize(1.5), 2);
        assert_eq!(scale.quantize(-0.5), -1);
    }
}
