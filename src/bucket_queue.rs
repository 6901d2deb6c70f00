use ahash::AHashMap;
use std::error::Error;
use std::fmt;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketQueueError {
    InvalidRange { lowest: usize, highest: usize },
    InvalidPriority { priority: usize, lowest: usize, highest: usize },
    MembershipViolation { priority: usize },
}

impl fmt::Display for BucketQueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketQueueError::InvalidRange { lowest, highest } => {
                write!(f, "invalid priority range [{}, {}]", lowest, highest)
            }
            BucketQueueError::InvalidPriority { priority, lowest, highest } => {
                write!(f, "priority {} is outside of [{}, {}]", priority, lowest, highest)
            }
            BucketQueueError::MembershipViolation { priority } => {
                write!(f, "element is not stored at priority {}", priority)
            }
        }
    }
}

impl Error for BucketQueueError {}

// Elements of one priority level. `pos[x]` is the position of `x` in `items`; removal is
// swap-remove, so order is not preserved.
#[derive(Debug, Clone)]
struct Bucket<T> {
    items: Vec<T>,
    pos: AHashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> Bucket<T> {
    fn new() -> Bucket<T> {
        Bucket { items: Vec::new(), pos: AHashMap::default() }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn contains(&self, x: &T) -> bool {
        self.pos.contains_key(x)
    }

    fn insert(&mut self, x: T) -> bool {
        if self.pos.contains_key(&x) {
            return false;
        }
        self.pos.insert(x.clone(), self.items.len());
        self.items.push(x);
        true
    }

    fn remove(&mut self, x: &T) -> bool {
        let Some(i) = self.pos.remove(x) else { return false };
        self.items.swap_remove(i);
        if let Some(moved) = self.items.get(i) {
            self.pos.insert(moved.clone(), i);
        }
        true
    }

    fn pop(&mut self) -> Option<T> {
        let x = self.items.pop()?;
        self.pos.remove(&x);
        Some(x)
    }
}

/// A priority queue over the fixed integer range `[lowest, highest]`.
///
/// Every priority level owns a bucket with O(1) insert, remove and pop. The queue caches the
/// lowest and highest level with a non-empty bucket, so `change_priority` and the extractions
/// only pay for the levels they walk over while re-validating a bound.
///
/// Elements of equal priority are returned in an unspecified order. Callers must not rely on
/// any tie-breaking.
#[derive(Debug, Clone)]
pub struct BucketQueue<T> {
    lowest: usize,
    highest: usize,
    buckets: Vec<Bucket<T>>,
    // Indices (not priorities) of the lowest and highest non-empty bucket.
    bounds: Option<(usize, usize)>,
    len: usize,
}

impl<T: Eq + Hash + Clone> BucketQueue<T> {
    /// Creates an empty queue accepting priorities `lowest..=highest`.
    pub fn new(lowest: usize, highest: usize) -> Result<BucketQueue<T>, BucketQueueError> {
        if lowest > highest {
            return Err(BucketQueueError::InvalidRange { lowest, highest });
        }
        let buckets = (lowest..=highest).map(|_| Bucket::new()).collect();
        Ok(BucketQueue { lowest, highest, buckets, bounds: None, len: 0 })
    }

    pub fn lowest_priority(&self) -> usize {
        self.lowest
    }

    pub fn highest_priority(&self) -> usize {
        self.highest
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The cached `(lowest, highest)` non-empty priorities, `None` if the queue is empty.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        self.bounds.map(|(lo, hi)| (lo + self.lowest, hi + self.lowest))
    }

    pub fn lowest_non_empty(&self) -> Option<usize> {
        self.bounds().map(|(lo, _)| lo)
    }

    pub fn highest_non_empty(&self) -> Option<usize> {
        self.bounds().map(|(_, hi)| hi)
    }

    /// Number of elements currently stored at priority `p` (0 for priorities out of range).
    pub fn bucket_len(&self, p: usize) -> usize {
        self.index(p).map_or(0, |i| self.buckets[i].len())
    }

    pub fn contains(&self, x: &T, p: usize) -> bool {
        self.index(p).map_or(false, |i| self.buckets[i].contains(x))
    }

    // lowest priority first
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(move |(i, b)| b.items.iter().map(move |x| (i + self.lowest, x)))
    }

    /// Inserts `x` with priority `p`. Returns `false` if `x` was already stored at `p`.
    pub fn insert(&mut self, x: T, p: usize) -> Result<bool, BucketQueueError> {
        let i = self.checked_index(p)?;
        let added = self.buckets[i].insert(x);
        if added {
            self.len += 1;
            self.widen(i);
        }
        Ok(added)
    }

    /// Moves `x` from priority `old` to priority `new`.
    ///
    /// Fails with `MembershipViolation` and leaves the queue untouched if `x` is not stored at
    /// `old`.
    pub fn change_priority(&mut self, x: &T, old: usize, new: usize) -> Result<(), BucketQueueError> {
        let p = self.checked_index(old)?;
        let q = self.checked_index(new)?;
        if !self.buckets[p].remove(x) {
            return Err(BucketQueueError::MembershipViolation { priority: old });
        }
        self.buckets[q].insert(x.clone());
        self.widen(q);
        self.settle(p);
        Ok(())
    }

    /// Like [`BucketQueue::change_priority`], but trusts the caller that `x` is stored at `old`.
    /// Membership is only asserted in debug builds; violating it leaves the element counter
    /// out of sync with the buckets.
    pub fn change_priority_unchecked(&mut self, x: T, old: usize, new: usize) -> Result<(), BucketQueueError> {
        let p = self.checked_index(old)?;
        let q = self.checked_index(new)?;
        let removed = self.buckets[p].remove(&x);
        debug_assert!(removed, "element is not stored at priority {}", old);
        self.buckets[q].insert(x);
        self.widen(q);
        self.settle(p);
        Ok(())
    }

    /// Removes and returns an element of minimum priority.
    pub fn extract_min(&mut self) -> Option<T> {
        let i = self.find_lowest()?;
        self.take_from(i)
    }

    /// Removes and returns an element of maximum priority.
    pub fn extract_max(&mut self) -> Option<T> {
        let i = self.find_highest()?;
        self.take_from(i)
    }

    fn index(&self, p: usize) -> Option<usize> {
        (self.lowest..=self.highest).contains(&p).then(|| p - self.lowest)
    }

    fn checked_index(&self, p: usize) -> Result<usize, BucketQueueError> {
        self.index(p).ok_or(BucketQueueError::InvalidPriority {
            priority: p,
            lowest: self.lowest,
            highest: self.highest,
        })
    }

    fn take_from(&mut self, i: usize) -> Option<T> {
        let x = self.buckets[i].pop()?;
        self.len -= 1;
        self.settle(i);
        Some(x)
    }

    // Extend the bounds to cover bucket i, which just received an element.
    fn widen(&mut self, i: usize) {
        self.bounds = match self.bounds {
            None => Some((i, i)),
            Some((lo, hi)) => Some((lo.min(i), hi.max(i))),
        };
    }

    // Bucket i just lost an element. If it is now empty and sits on a bound, walk inward
    // to the next non-empty bucket.
    fn settle(&mut self, i: usize) {
        let Some((lo, hi)) = self.bounds else { return };
        if !self.buckets[i].is_empty() {
            return;
        }
        if i == hi {
            self.bounds = (lo..=hi).rev().find(|&j| !self.buckets[j].is_empty()).map(|j| (lo, j));
        } else if i == lo {
            self.bounds = (lo..=hi).find(|&j| !self.buckets[j].is_empty()).map(|j| (j, hi));
        }
    }

    // Re-validate the lower bound by scanning upward, clearing both bounds if nothing is left.
    fn find_lowest(&mut self) -> Option<usize> {
        let (lo, hi) = self.bounds?;
        self.bounds = (lo..=hi).find(|&j| !self.buckets[j].is_empty()).map(|j| (j, hi));
        self.bounds.map(|(lo, _)| lo)
    }

    fn find_highest(&mut self) -> Option<usize> {
        let (lo, hi) = self.bounds?;
        self.bounds = (lo..=hi).rev().find(|&j| !self.buckets[j].is_empty()).map(|j| (lo, j));
        self.bounds.map(|(_, hi)| hi)
    }
}
