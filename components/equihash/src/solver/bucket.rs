//! Fixed-capacity bucketed storage for the partial values of one generation.

use crate::Error;

/// Partial values of a single generation, partitioned into L1 buckets.
///
/// Every bucket owns `capacity` slots of `stride` words. A generation-`g` value occupies
/// the first [`Params::value_words`](crate::Params) words of its slot: one word per
/// remaining collision window, most significant window first, then the back-reference.
/// Values are only ever appended; [`BucketStore::reset`] discards a generation.
pub(crate) struct BucketStore {
    generation: u32,
    words: usize,
    stride: usize,
    capacity: usize,
    counts: Vec<u32>,
    slots: Vec<u32>,
}

impl BucketStore {
    pub(crate) fn new(buckets: usize, capacity: usize, stride: usize) -> Self {
        BucketStore {
            generation: 0,
            words: stride,
            stride,
            capacity,
            counts: vec![0; buckets],
            slots: vec![0; buckets * capacity * stride],
        }
    }

    /// Empties every bucket and prepares the store for values of `generation`.
    pub(crate) fn reset(&mut self, generation: u32, words: usize) {
        assert!(words <= self.stride);
        self.generation = generation;
        self.words = words;
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    /// Total number of values held across all buckets.
    pub(crate) fn occupancy(&self) -> usize {
        self.counts.iter().map(|c| *c as usize).sum()
    }

    pub(crate) fn len(&self, bucket: usize) -> usize {
        self.counts[bucket] as usize
    }

    /// Returns the `i`-th value appended to `bucket`.
    pub(crate) fn value(&self, bucket: usize, i: usize) -> &[u32] {
        debug_assert!(i < self.len(bucket));
        let start = (bucket * self.capacity + i) * self.stride;
        &self.slots[start..start + self.words]
    }

    /// Appends a value to `bucket`, returning the slot for the caller to fill.
    pub(crate) fn insert(&mut self, bucket: usize) -> Result<&mut [u32], Error> {
        let i = self.counts[bucket] as usize;
        if i >= self.capacity {
            return Err(Error::BucketOverflow {
                generation: self.generation,
                bucket,
            });
        }
        self.counts[bucket] += 1;

        let start = (bucket * self.capacity + i) * self.stride;
        Ok(&mut self.slots[start..start + self.words])
    }
}
