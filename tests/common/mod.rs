use rand::Rng;
use std::collections::HashSet;

pub const NOISE_PERCENTAGE: f64 = 0.10;
pub const REMOVE_PERCENTAGE: f64 = 0.20;

/// A random universe of `nelements` draws from `lo..=hi` (duplicates collapse).
pub fn random_universe<R: Rng>(rng: &mut R, nelements: usize, lo: u64, hi: u64) -> HashSet<u64> {
    (0..nelements).map(|_| rng.gen_range(lo..=hi)).collect()
}

/// Generates `nsets` random sets over `universe`.
///
/// With `cover_all`, the union of the sets is the whole universe; otherwise every element is
/// left out with probability `REMOVE_PERCENTAGE`. With `noise`, elements above the universe's
/// maximum are mixed in.
pub fn generate_sets<R: Rng>(rng: &mut R, universe: &HashSet<u64>, nsets: usize, noise: bool, cover_all: bool) -> Vec<HashSet<u64>> {
    assert!(nsets >= 1, "must have at least one set");
    let max_element = universe.iter().cloned().max().unwrap_or(0);
    let universe: Vec<u64> = universe
        .iter()
        .cloned()
        .filter(|_| cover_all || rng.gen::<f64>() > REMOVE_PERCENTAGE)
        .collect();
    let max_size = universe.len().max(1);

    let mut added = vec![false; universe.len()];
    let mut sets = Vec::with_capacity(nsets);
    for _ in 0..nsets - 1 {
        let mut set = HashSet::new();
        if !universe.is_empty() {
            for _ in 0..rng.gen_range(1..=max_size) {
                let i = rng.gen_range(0..universe.len());
                added[i] = true;
                set.insert(universe[i]);
                if noise && rng.gen::<f64>() < NOISE_PERCENTAGE {
                    set.insert(rng.gen_range(max_element + 1..=max_element + 1000));
                }
            }
        }
        sets.push(set);
    }

    // the last set picks up everything not yet drawn
    let mut last: HashSet<u64> = universe.iter().zip(&added).filter(|(_, a)| !**a).map(|(x, _)| *x).collect();
    if !universe.is_empty() {
        for _ in 0..rng.gen_range(0..=max_size) {
            last.insert(universe[rng.gen_range(0..universe.len())]);
        }
    }
    sets.push(last);
    sets
}
