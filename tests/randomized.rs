mod common;

use bucketcover::{set_cover_greedy_with, CoverStatus, SetCoverOptions};
use common::{generate_sets, random_universe};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const QUIET: SetCoverOptions = SetCoverOptions { verbose: false, quiet: true };

fn covered_by(cover: &[&HashSet<u64>], universe: &HashSet<u64>) -> HashSet<u64> {
    cover.iter().flat_map(|s| s.iter()).filter(|x| universe.contains(x)).cloned().collect()
}

fn single_test(rng: &mut StdRng, max_elements: usize, max_sets: usize, noise: bool, cover_all: bool) {
    let nelements = rng.gen_range(1..=max_elements);
    let nsets = rng.gen_range(1..=max_sets);
    let universe = random_universe(rng, nelements, 0, 10 * max_elements as u64);
    let sets = generate_sets(rng, &universe, nsets, noise, cover_all);

    let cover = set_cover_greedy_with(&sets, universe.iter().cloned(), &QUIET);
    let got = covered_by(&cover.sets, &universe);
    let coverable: HashSet<u64> = sets.iter().flatten().filter(|x| universe.contains(x)).cloned().collect();
    assert_eq!(got, coverable);
    assert_eq!(cover.is_complete(), coverable == universe);
    if let CoverStatus::Partial { uncovered, .. } = &cover.status {
        let uncovered: HashSet<u64> = uncovered.iter().cloned().collect();
        assert_eq!(uncovered, universe.difference(&coverable).cloned().collect());
    }

    // Every chosen set contributed something, and no set is chosen twice.
    let mut seen = HashSet::new();
    for (i, s) in cover.indices.iter().zip(&cover.sets) {
        assert!(seen.insert(*i));
        assert!(std::ptr::eq(*s, &sets[*i]));
    }
    for k in 0..cover.sets.len() {
        let before = covered_by(&cover.sets[..k], &universe);
        let after = covered_by(&cover.sets[..=k], &universe);
        assert!(after.len() > before.len());
    }
}

#[test]
fn feasible_instances_are_fully_covered() {
    let mut rng = StdRng::seed_from_u64(25);
    for _ in 0..25 {
        single_test(&mut rng, 200, 40, false, true);
    }
}

#[test]
fn noise_is_ignored() {
    let mut rng = StdRng::seed_from_u64(10);
    for _ in 0..25 {
        single_test(&mut rng, 200, 40, true, true);
    }
}

#[test]
fn infeasible_instances_cover_what_they_can() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..25 {
        single_test(&mut rng, 200, 40, true, false);
    }
}

#[test]
fn greedy_takes_largest_gain_each_round() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let universe = random_universe(&mut rng, 120, 0, 300);
        let sets = generate_sets(&mut rng, &universe, 30, true, true);
        let cover = set_cover_greedy_with(&sets, universe.iter().cloned(), &QUIET);
        assert!(cover.is_complete());
        let mut covered: HashSet<u64> = HashSet::new();
        for i in cover.indices.iter().cloned() {
            let gain = |s: &HashSet<u64>| s.iter().filter(|x| universe.contains(x) && !covered.contains(x)).count();
            let best = sets.iter().map(gain).max().unwrap();
            assert_eq!(gain(&sets[i]), best);
            covered.extend(sets[i].iter().filter(|x| universe.contains(x)).cloned());
        }
    }
}
