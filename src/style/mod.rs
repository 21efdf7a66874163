//! Building style: spatial block weighting and weighted random choice
//!
//! A style maps block names to a base weight and optional height/distance
//! curves. The generator multiplies the three factors to weight each valid
//! candidate, then draws one by cumulative weight.

mod curve;

pub use curve::{Curve, CurveKey};

use crate::error::ForgeResult;
use glam::{IVec3, Vec2};
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Weight profile for one block name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockWeight {
    pub base: f32,
    #[serde(default)]
    pub height_curve: Option<Curve>,
    #[serde(default)]
    pub distance_curve: Option<Curve>,
}

impl BlockWeight {
    pub fn uniform(base: f32) -> Self {
        BlockWeight {
            base,
            height_curve: None,
            distance_curve: None,
        }
    }
}

/// Per-block-name weight profiles, read-only during generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingStyle {
    weights: FxHashMap<String, BlockWeight>,
}

impl BuildingStyle {
    pub fn new() -> Self {
        BuildingStyle::default()
    }

    pub fn from_json(json: &str) -> ForgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn set_weight(&mut self, block_name: impl Into<String>, weight: BlockWeight) {
        self.weights.insert(block_name.into(), weight);
    }

    /// Selection weight for a block at a normalized position. Blocks without
    /// a profile weigh 1.0; disabled curves contribute no scaling. Negative
    /// results clamp to zero.
    pub fn weight(&self, block_name: &str, height: f32, distance: f32) -> f32 {
        let Some(profile) = self.weights.get(block_name) else {
            return 1.0;
        };
        let mut weight = profile.base;
        if let Some(curve) = &profile.height_curve {
            weight *= curve.evaluate(height);
        }
        if let Some(curve) = &profile.distance_curve {
            weight *= curve.evaluate(distance);
        }
        weight.max(0.0)
    }
}

/// Height of `position` as a fraction of the grid's top layer
pub fn normalized_height(position: IVec3, max_y: i32) -> f32 {
    if max_y <= 0 {
        return 0.0;
    }
    (position.y as f32 / max_y as f32).clamp(0.0, 1.0)
}

/// Horizontal distance of `position` from `center`, as a fraction of
/// `max_distance`. The vertical axis is ignored: perimeter-style weighting is
/// a horizontal-plane concept.
pub fn normalized_distance(position: IVec3, center: Vec2, max_distance: f32) -> f32 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    let horizontal = Vec2::new(position.x as f32, position.z as f32);
    (horizontal.distance(center) / max_distance).clamp(0.0, 1.0)
}

/// Weighted draw over candidate indices: picks r uniformly in [0, total) and
/// returns the first candidate whose cumulative weight reaches r. When every
/// weight is zero the draw falls back to a uniform choice instead of
/// dividing by nothing. None only for an empty slice.
pub fn choose_weighted<R: Rng>(weights: &[f32], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return Some(rng.gen_range(0..weights.len()));
    }
    let draw = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if draw < cumulative {
            return Some(index);
        }
    }
    // Floating point accumulation can land just short of the total
    last_positive
}
