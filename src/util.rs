use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

/// Picks one of the maximal entries at random.
pub fn argmax_random<A: Copy, R: Rng>(values: &[(A, f64)], rng: &mut R) -> Option<(A, f64)> {
    let best = values
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    let candidates: Vec<&(A, f64)> = values.iter().filter(|(_, v)| *v == best).collect();
    candidates.choose(rng).map(|&&e| e)
}

/// Float priority with a total order, used as heap key.
#[derive(Debug, Clone, Copy)]
pub struct Priority(pub f64);

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
