//! Weighted choice over candidate pools.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Something that can be picked by weight, but only while it has members.
pub trait Pool {
    fn weight(&self) -> u32;
    fn is_empty(&self) -> bool;
}

/// Pick one non-empty pool with probability proportional to its weight.
///
/// Empty pools never take part in the draw. If every non-empty pool has zero
/// weight the choice is uniform over them. Returns `None` only when all pools
/// are empty.
pub fn choose_pool<'a, P, R>(rng: &mut R, pools: &'a [P]) -> Option<&'a P>
where
    P: Pool,
    R: Rng + ?Sized,
{
    let live: Vec<&P> = pools.iter().filter(|p| !p.is_empty()).collect();
    match WeightedIndex::new(live.iter().map(|p| p.weight())) {
        Ok(dist) => live.get(dist.sample(rng)).copied(),
        Err(_) => live.choose(rng).copied(),
    }
}
