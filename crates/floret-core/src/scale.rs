//! Radius scales: map an abstract radius unit to pixels.
//!
//! A scale must be monotonic non-decreasing; the placement relies on it to keep spiral growth
//! monotonic.

use serde::{Deserialize, Serialize};

pub trait RadiusScale {
    fn scale(&self, value: f64) -> f64;
}

impl<F> RadiusScale for F
where
    F: Fn(f64) -> f64,
{
    fn scale(&self, value: f64) -> f64 {
        self(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityScale;

impl RadiusScale for IdentityScale {
    fn scale(&self, value: f64) -> f64 {
        value
    }
}

/// Linear interpolation from `domain` to `range`, unclamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
        }
    }
}

impl RadiusScale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            // Degenerate domain: everything maps to the midpoint of the range.
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}
