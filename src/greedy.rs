use crate::bucket_queue::BucketQueue;
use ahash::AHashMap;
use bit_set::BitSet;
use itertools::Itertools;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default)]
pub struct SetCoverOptions {
    pub verbose: bool,
    /// Suppress the warning printed when the elements cannot be fully covered.
    pub quiet: bool,
}

/// Why the greedy loop stopped before every element was covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No remaining set contains an uncovered element.
    Exhausted,
    /// A round selected a set but covered nothing new.
    Stalled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverStatus<E> {
    Complete,
    /// The returned sets are still a valid (partial) cover; `uncovered` lists what is left.
    Partial { reason: StopReason, uncovered: Vec<E> },
}

#[derive(Debug, Clone)]
pub struct Cover<'a, S, E> {
    // selection order
    pub sets: Vec<&'a S>,
    pub indices: Vec<usize>,
    pub status: CoverStatus<E>,
}

impl<'a, S, E> Cover<'a, S, E> {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, CoverStatus::Complete)
    }
}

/// Greedy approximation of a minimum set cover with default options.
pub fn set_cover_greedy<'a, S, E, I>(sets: &'a [S], elements: I) -> Cover<'a, S, E>
where
    &'a S: IntoIterator<Item = &'a E>,
    E: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = E>,
{
    set_cover_greedy_with(sets, elements, &SetCoverOptions::default())
}

/// Selects sets from `sets` until every one of `elements` is covered, always taking the set
/// that covers the most still uncovered elements. The result is within a factor of `H(n)` of
/// a minimum cover, `n` being the number of elements.
///
/// Members of a set that are not among `elements` are ignored. If the sets cannot cover all
/// elements, the loop stops as soon as no set makes progress and the partial cover is
/// returned with [`CoverStatus::Partial`].
pub fn set_cover_greedy_with<'a, S, E, I>(
    sets: &'a [S],
    elements: I,
    options: &SetCoverOptions,
) -> Cover<'a, S, E>
where
    &'a S: IntoIterator<Item = &'a E>,
    E: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = E>,
{
    let start = Instant::now();

    // element ids are 0...n-1
    let mut ids = AHashMap::<E, usize>::default();
    let mut universe: Vec<E> = Vec::new();
    for e in elements {
        let next = universe.len();
        if let Entry::Vacant(slot) = ids.entry(e) {
            universe.push(slot.key().clone());
            slot.insert(next);
        }
    }
    let n = universe.len();

    // relevant members of every set, without duplicates
    let members = sets
        .iter()
        .map(|s| s.into_iter().filter_map(|e| ids.get(e).copied()).sorted_unstable().dedup().collect_vec())
        .collect_vec();

    // The sets an element is in.
    let mut watch = vec![Vec::new(); n];
    for (i, set) in members.iter().enumerate() {
        set.iter().for_each(|e| watch[*e].push(i));
    }

    let mut priority = members.iter().map(|m| m.len()).collect_vec();
    let mut queue = BucketQueue::new(0, n).expect("0 <= n");
    let mut live = BitSet::with_capacity(sets.len()); // not selected, positive priority
    for (i, p) in priority.iter().cloned().enumerate() {
        if p > 0 {
            queue.insert(i, p).expect("priority <= n");
            live.insert(i);
        }
    }
    if options.verbose {
        eprintln!("c elements {} sets {} relevant sets {}", n, sets.len(), live.len());
    }

    let mut covered = BitSet::with_capacity(n);
    let mut uncovered = n;
    let mut cover = Vec::new();
    let mut indices = Vec::new();
    let mut lost = vec![0usize; sets.len()];
    let mut touched: Vec<usize> = Vec::new();

    let reason = loop {
        if uncovered == 0 {
            break None;
        }
        let uncovered_start = uncovered;

        // A set of priority zero can only surface once all useful sets are gone.
        let picked = match queue.extract_max() {
            Some(i) if priority[i] > 0 => i,
            _ => break Some(StopReason::Exhausted),
        };
        for e in members[picked].iter().cloned() {
            if !covered.insert(e) {
                continue;
            }
            uncovered -= 1;
            for j in watch[e].iter().cloned() {
                if j == picked || !live.contains(j) {
                    continue;
                }
                if lost[j] == 0 {
                    touched.push(j);
                }
                lost[j] += 1;
            }
        }
        cover.push(&sets[picked]);
        indices.push(picked);
        live.remove(picked);

        for j in touched.drain(..) {
            let old = priority[j];
            let new = old - lost[j];
            lost[j] = 0;
            queue.change_priority_unchecked(j, old, new).expect("priority <= n");
            priority[j] = new;
            if new == 0 {
                live.remove(j);
            }
        }

        if options.verbose {
            eprintln!(
                "c round {} picked set {} covering {} left {} elapsed {}ms",
                cover.len(),
                picked,
                uncovered_start - uncovered,
                uncovered,
                start.elapsed().as_millis()
            );
        }
        // Unreachable while priorities are exact; guards against looping forever otherwise.
        if uncovered == uncovered_start {
            break Some(StopReason::Stalled);
        }
    };

    let status = match reason {
        None => CoverStatus::Complete,
        Some(reason) => {
            if !options.quiet {
                eprintln!("c Sets do not fully cover elements! ({} uncovered)", uncovered);
            }
            let left = universe.into_iter().enumerate().filter(|(e, _)| !covered.contains(*e)).map(|(_, x)| x).collect_vec();
            CoverStatus::Partial { reason, uncovered: left }
        }
    };
    Cover { sets: cover, indices, status }
}
