//! Ingredient selection with a one-draw cooldown.

use coven_core::rng::DeterministicRng;

use super::config::{IngredientBuckets, PoolWeights};
use super::player::Alignment;

fn extend_weighted(pool: &mut Vec<f64>, bucket: &[f64], copies: usize) {
    for _ in 0..copies {
        pool.extend_from_slice(bucket);
    }
}

/// The full draw pool for an alignment, before the cooldown filter.
///
/// Layout is SAFE copies, then NEUTRAL copies, then CORRUPT copies.
#[must_use]
pub fn draw_pool(buckets: &IngredientBuckets, alignment: Alignment) -> Vec<f64> {
    let weights: PoolWeights = match alignment {
        Alignment::Coven => buckets.coven_weights,
        Alignment::Hollow => buckets.hollow_weights,
    };

    let mut pool = Vec::with_capacity(
        buckets.safe.len() * weights.safe
            + buckets.neutral.len() * weights.neutral
            + buckets.corrupt.len() * weights.corrupt,
    );
    extend_weighted(&mut pool, &buckets.safe, weights.safe);
    extend_weighted(&mut pool, &buckets.neutral, weights.neutral);
    extend_weighted(&mut pool, &buckets.corrupt, weights.corrupt);
    pool
}

/// Draws one ingredient value for a player.
///
/// Every copy of `last` is removed from the pool first. If nothing is left,
/// `last` is reused, or the first SAFE value when there is no previous draw.
#[allow(clippy::float_cmp)]
pub fn choose_ingredient(
    buckets: &IngredientBuckets,
    alignment: Alignment,
    last: Option<f64>,
    rng: &mut dyn DeterministicRng,
) -> f64 {
    let mut pool = draw_pool(buckets, alignment);
    if let Some(previous) = last {
        // Bucket values are copied verbatim, so exact comparison is intended.
        pool.retain(|v| *v != previous);
    }

    if pool.is_empty() {
        return last.unwrap_or_else(|| buckets.safe.first().copied().unwrap_or(0.0));
    }

    pool[rng.next_index(pool.len())]
}
