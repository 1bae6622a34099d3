//! Append-only merge ancestry.

/// Records, for every merged partial value, the back-references of its two parents.
///
/// An entry created while computing generation `g` refers to values of generation
/// `g - 1`: leaf indices when `g == 1`, otherwise earlier entries of this table. Ids are
/// therefore strictly increasing along any chain and the table is acyclic.
pub(crate) struct CollisionTree {
    entries: Vec<[u32; 2]>,
    capacity: usize,
}

impl CollisionTree {
    pub(crate) fn new(capacity: usize) -> Self {
        CollisionTree {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Appends `(a, b)` and returns its id, or `None` once the table is full.
    pub(crate) fn push(&mut self, a: u32, b: u32) -> Option<u32> {
        if self.entries.len() >= self.capacity {
            return None;
        }
        let id = self.entries.len() as u32;
        self.entries.push([a, b]);
        Some(id)
    }

    pub(crate) fn get(&self, id: u32) -> [u32; 2] {
        self.entries[id as usize]
    }
}
