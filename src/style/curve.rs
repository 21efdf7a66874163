//! Piecewise-linear weight curves
//!
//! Sampled on [0, 1], these scale a block's selection weight by normalized
//! height or distance from the structure center. Keyframes are sorted by
//! time; evaluation clamps outside the first and last key.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub t: f32,
    pub value: f32,
}

/// Keyframed scalar function with linear interpolation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    /// Build from (t, value) pairs; keys are sorted by t
    pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .into_iter()
            .map(|(t, value)| CurveKey { t, value })
            .collect();
        keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        Curve { keys }
    }

    pub fn constant(value: f32) -> Self {
        Curve::new([(0.0, value)])
    }

    /// Straight line from `from` at t=0 to `to` at t=1
    pub fn linear(from: f32, to: f32) -> Self {
        Curve::new([(0.0, from), (1.0, to)])
    }

    /// Sample the curve. Clamps to the first/last key outside their range;
    /// an empty curve evaluates to 1.0 (no scaling).
    pub fn evaluate(&self, t: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 1.0;
        };
        if t <= first.t {
            return first.value;
        }
        let last = &self.keys[self.keys.len() - 1];
        if t >= last.t {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if t <= b.t {
                let span = b.t - a.t;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let fraction = (t - a.t) / span;
                return a.value + (b.value - a.value) * fraction;
            }
        }
        last.value
    }
}
