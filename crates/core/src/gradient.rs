//! Cyclic weighted color gradient, sampled by a scalar percent.
//!
//! A gradient map is an ordered list of `(color, weight)` stops, cyclic (the
//! last stop wraps to the first). Weights are accumulated into a cumulative
//! table at build time; sampling blends across the three stops straddling
//! the sample point so that the color is continuous everywhere, including
//! across the 1 → 0 wraparound, and pure exactly at the center of each
//! stop's weight span.

use crate::color::Rgb;
use crate::error::FlowError;
use serde::{Deserialize, Serialize};

/// One stop of a gradient map: a color and its positive weight.
///
/// Serializes as a `[hex, weight]` pair, the wire form the configuration
/// layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Rgb, f64)", into = "(Rgb, f64)")]
pub struct GradientStop {
    pub color: Rgb,
    pub weight: f64,
}

impl GradientStop {
    pub fn new(color: Rgb, weight: f64) -> Self {
        Self { color, weight }
    }
}

impl From<(Rgb, f64)> for GradientStop {
    fn from((color, weight): (Rgb, f64)) -> Self {
        Self { color, weight }
    }
}

impl From<GradientStop> for (Rgb, f64) {
    fn from(stop: GradientStop) -> Self {
        (stop.color, stop.weight)
    }
}

/// A gradient map compiled into a sampleable form.
///
/// `bounds[i]` holds the raw weight sum through stop `i`; sampling rescales
/// the percent into that space instead of normalizing the table, so a sample
/// at a stop's exact span boundary selects the stop without rounding drift
/// (dividing each bound by the total first would lose exactness for weights
/// like equal thirds).
#[derive(Debug, Clone)]
pub struct CyclicGradient {
    stops: Vec<GradientStop>,
    bounds: Vec<f64>,
    total: f64,
}

impl CyclicGradient {
    /// Compiles a gradient map.
    ///
    /// Requires at least one stop, and every weight strictly positive and
    /// finite; violations are `FlowError::InvalidGradient` — a fatal
    /// configuration error, never a per-frame failure.
    pub fn build(stops: &[GradientStop]) -> Result<Self, FlowError> {
        if stops.is_empty() {
            return Err(FlowError::InvalidGradient(
                "gradient map requires at least 1 stop".to_string(),
            ));
        }
        for (i, stop) in stops.iter().enumerate() {
            if !stop.weight.is_finite() || stop.weight <= 0.0 {
                return Err(FlowError::InvalidGradient(format!(
                    "stop {i} has non-positive weight {}",
                    stop.weight
                )));
            }
        }
        let mut acc = 0.0;
        let bounds: Vec<f64> = stops
            .iter()
            .map(|s| {
                acc += s.weight;
                acc
            })
            .collect();
        Ok(Self {
            stops: stops.to_vec(),
            total: acc,
            bounds,
        })
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false for a built gradient.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color of the first stop, used as the flat-batch stroke color.
    pub fn first_color(&self) -> Rgb {
        self.stops[0].color
    }

    /// The normalized cumulative weight table: entry `i` is the weight sum
    /// through stop `i` divided by the total. Monotone non-decreasing, last
    /// entry 1.0 within floating tolerance.
    pub fn cumulative_percents(&self) -> Vec<f64> {
        self.bounds.iter().map(|b| b / self.total).collect()
    }

    /// Samples the gradient at `percent` in [0, 1).
    ///
    /// Finds the stop whose cumulative span contains `percent`, then blends
    /// asymmetrically: the lower half of the span blends the previous stop
    /// into the current one, the upper half blends the current stop into the
    /// next. A sample at the span center is the stop's pure color; samples at
    /// span edges meet the neighboring span's value, so the function is
    /// continuous — including from 1⁻ back to 0 through the cyclic wrap.
    ///
    /// Single-stop gradients are constant. If floating error pushes `percent`
    /// past the final cumulative bound, the last stop's color is returned
    /// unmodified.
    pub fn sample(&self, percent: f64) -> Rgb {
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0].color;
        }
        let percent = if percent.is_nan() { 0.0 } else { percent };
        let scaled = percent * self.total;

        let Some(i) = self.bounds.iter().position(|&bound| scaled <= bound) else {
            return self.stops[n - 1].color;
        };

        let cur = self.stops[i];
        let prev = self.stops[(i + n - 1) % n];
        let next = self.stops[(i + 1) % n];

        let high = self.bounds[i];
        let local = if i == 0 {
            // Wraparound origin: the span starts at 0, not at a prior bound.
            scaled / high
        } else {
            let low = self.bounds[i - 1];
            (scaled - low) / (high - low)
        };

        if local <= 0.5 {
            prev.color.blend(cur.color, local + 0.5)
        } else {
            cur.color.blend(next.color, local - 0.5)
        }
    }
}
