use std::fmt;

#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct TinySet(u64);

impl fmt::Debug for TinySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.into_iter().collect::<Vec<u32>>().fmt(f)
    }
}

pub struct TinySetIterator(TinySet);
impl Iterator for TinySetIterator {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lowest()
    }
}

impl IntoIterator for TinySet {
    type Item = u32;
    type IntoIter = TinySetIterator;
    fn into_iter(self) -> Self::IntoIter {
        TinySetIterator(self)
    }
}

impl TinySet {
    /// Returns an empty `TinySet`.
    #[inline]
    pub fn empty() -> TinySet {
        TinySet(0u64)
    }

    /// Returns a full `TinySet`.
    #[inline]
    pub fn full() -> TinySet {
        TinySet::empty().complement()
    }

    /// Returns the complement of the set in `[0, 64[`.
    ///
    /// Careful on making this function public, as it will break the padding handling in the last
    /// bucket.
    #[inline]
    fn complement(self) -> TinySet {
        TinySet(!self.0)
    }

    /// Returns true iff the `TinySet` contains the element `el`.
    #[inline]
    pub fn contains(self, el: u32) -> bool {
        !self.intersect(TinySet::singleton(el)).is_empty()
    }

    /// Returns the number of elements in the TinySet.
    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the intersection of `self` and `other`
    #[inline]
    #[must_use]
    pub fn intersect(self, other: TinySet) -> TinySet {
        TinySet(self.0 & other.0)
    }

    /// Creates a new `TinySet` containing only one element
    /// within `[0; 64[`
    #[inline]
    pub fn singleton(el: u32) -> TinySet {
        TinySet(1u64 << u64::from(el))
    }

    /// Insert a new element within [0..64)
    #[inline]
    #[must_use]
    pub fn insert(self, el: u32) -> TinySet {
        self.union(TinySet::singleton(el))
    }

    /// Removes an element within [0..64)
    #[inline]
    #[must_use]
    pub fn remove(self, el: u32) -> TinySet {
        self.intersect(TinySet::singleton(el).complement())
    }

    /// Insert a new element within [0..64)
    ///
    /// returns true if the set changed
    #[inline]
    pub fn insert_mut(&mut self, el: u32) -> bool {
        let old = *self;
        *self = old.insert(el);
        old != *self
    }

    /// Remove a element within [0..64)
    ///
    /// returns true if the set changed
    #[inline]
    pub fn remove_mut(&mut self, el: u32) -> bool {
        let old = *self;
        *self = old.remove(el);
        old != *self
    }

    /// Returns the union of two tinysets
    #[inline]
    #[must_use]
    pub fn union(self, other: TinySet) -> TinySet {
        TinySet(self.0 | other.0)
    }

    /// Returns true iff the `TinySet` is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0u64
    }

    /// Returns the lowest element in the `TinySet`
    /// and removes it.
    #[inline]
    pub fn pop_lowest(&mut self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            let lowest = self.0.trailing_zeros();
            self.0 ^= TinySet::singleton(lowest).0;
            Some(lowest)
        }
    }

    /// Returns the highest element in the `TinySet`, without removing it.
    #[inline]
    pub fn highest(self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            Some(63u32 - self.0.leading_zeros())
        }
    }

    /// Returns a `TinySet` than contains all values up
    /// to limit excluded.
    ///
    /// The limit is assumed to be strictly lower than 64.
    pub fn range_lower(upper_bound: u32) -> TinySet {
        TinySet((1u64 << u64::from(upper_bound % 64u32)) - 1u64)
    }

    /// Returns a `TinySet` that contains all values lower
    /// or equal to the given limit, included.
    ///
    /// The limit is assumed to be strictly lower than 64.
    pub fn range_lower_or_equal(upper_bound: u32) -> TinySet {
        if upper_bound % 64u32 == 63u32 {
            TinySet::full()
        } else {
            TinySet::range_lower(upper_bound + 1)
        }
    }

    /// Returns a `TinySet` that contains all values greater
    /// or equal to the given limit, included. (and up to 63)
    ///
    /// The limit is assumed to be strictly lower than 64.
    pub fn range_greater_or_equal(from_included: u32) -> TinySet {
        TinySet::range_lower(from_included).complement()
    }
}

/// Fixed capacity set of `u32`, stored as one bit per value.
///
/// Membership and [`BitSet::prev_set_bit`] are answered without
/// scanning the whole set, which makes it suitable for random access
/// over a segment's doc id space.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    tinysets: Box<[TinySet]>,
    len: u64,
    max_value: u32,
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet")
            .field("max_value", &self.max_value)
            .field("elements", &self.iter().collect::<Vec<u32>>())
            .finish()
    }
}

fn num_buckets(max_val: u32) -> u32 {
    (max_val + 63u32) / 64u32
}

impl BitSet {
    /// Create a new `BitSet` that may contain elements
    /// within `[0, max_val)`.
    pub fn with_max_value(max_value: u32) -> BitSet {
        let num_buckets = num_buckets(max_value);
        let tinybitsets = vec![TinySet::empty(); num_buckets as usize].into_boxed_slice();
        BitSet {
            tinysets: tinybitsets,
            len: 0,
            max_value,
        }
    }

    /// Create a new `BitSet` that may contain elements. Initially all values will be set.
    /// within `[0, max_val)`.
    pub fn with_max_value_and_full(max_value: u32) -> BitSet {
        let num_buckets = num_buckets(max_value);
        let mut tinybitsets = vec![TinySet::full(); num_buckets as usize].into_boxed_slice();

        // Fix padding
        let lower = max_value % 64u32;
        if lower != 0 {
            tinybitsets[tinybitsets.len() - 1] = TinySet::range_lower(lower);
        }
        BitSet {
            tinysets: tinybitsets,
            len: max_value as u64,
            max_value,
        }
    }

    /// Builds a `BitSet` of capacity `max_value` from the given elements.
    ///
    /// Elements greater or equal to `max_value` are ignored.
    pub fn from_elements(max_value: u32, elements: impl IntoIterator<Item = u32>) -> BitSet {
        let mut bitset = BitSet::with_max_value(max_value);
        for el in elements {
            if el < max_value {
                bitset.insert(el);
            }
        }
        bitset
    }

    /// Removes all elements from the `BitSet`.
    pub fn clear(&mut self) {
        for tinyset in self.tinysets.iter_mut() {
            *tinyset = TinySet::empty();
        }
        self.len = 0;
    }

    /// Returns the number of elements in the `BitSet`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Inserts an element in the `BitSet`
    #[inline]
    pub fn insert(&mut self, el: u32) {
        // we do not check saturated els.
        let higher = el / 64u32;
        let lower = el % 64u32;
        self.len += u64::from(self.tinysets[higher as usize].insert_mut(lower));
    }

    /// Removes an element from the `BitSet`
    #[inline]
    pub fn remove(&mut self, el: u32) {
        // we do not check saturated els.
        let higher = el / 64u32;
        let lower = el % 64u32;
        self.len -= u64::from(self.tinysets[higher as usize].remove_mut(lower));
    }

    /// Returns true iff the elements is in the `BitSet`.
    ///
    /// Elements outside of `[0, max_value)` are never contained.
    #[inline]
    pub fn contains(&self, el: u32) -> bool {
        el < self.max_value && self.tinyset(el / 64u32).contains(el % 64)
    }

    /// Returns the first non-empty `TinySet` associated with a bucket lower
    /// or greater than bucket.
    ///
    /// Reminder: the tiny set with the bucket `bucket`, represents the
    /// elements from `bucket * 64` to `(bucket+1) * 64`.
    pub fn first_non_empty_bucket(&self, bucket: u32) -> Option<u32> {
        self.tinysets
            .get(bucket as usize..)?
            .iter()
            .cloned()
            .position(|tinyset| !tinyset.is_empty())
            .map(|delta_bucket| bucket + delta_bucket as u32)
    }

    /// Returns the smallest element greater or equal to `el`.
    pub fn next_set_bit(&self, el: u32) -> Option<u32> {
        if el >= self.max_value {
            return None;
        }
        let bucket = el / 64u32;
        let in_bucket = self
            .tinyset(bucket)
            .intersect(TinySet::range_greater_or_equal(el % 64u32));
        if let Some(lowest) = in_bucket.into_iter().next() {
            return Some(bucket * 64u32 + lowest);
        }
        let next_bucket = self.first_non_empty_bucket(bucket + 1)?;
        self.tinyset(next_bucket)
            .into_iter()
            .next()
            .map(|lowest| next_bucket * 64u32 + lowest)
    }

    /// Returns the largest element lower or equal to `el`.
    ///
    /// `el` may exceed the capacity of the set, in which case the
    /// search starts from the last element the set can hold.
    pub fn prev_set_bit(&self, el: u32) -> Option<u32> {
        if self.max_value == 0 {
            return None;
        }
        let el = el.min(self.max_value - 1);
        let bucket = el / 64u32;
        let in_bucket = self
            .tinyset(bucket)
            .intersect(TinySet::range_lower_or_equal(el % 64u32));
        if let Some(highest) = in_bucket.highest() {
            return Some(bucket * 64u32 + highest);
        }
        self.tinysets[..bucket as usize]
            .iter()
            .rposition(|tinyset| !tinyset.is_empty())
            .and_then(|prev_bucket| {
                let highest = self.tinysets[prev_bucket].highest()?;
                Some(prev_bucket as u32 * 64u32 + highest)
            })
    }

    /// Iterates over the elements of the set, in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.tinysets
            .iter()
            .copied()
            .enumerate()
            .flat_map(|(bucket, tinyset)| {
                let bucket_base = bucket as u32 * 64u32;
                tinyset.into_iter().map(move |lower| bucket_base + lower)
            })
    }

    #[inline]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Returns the tiny bitset representing the
    /// the set restricted to the number range from
    /// `bucket * 64` to `(bucket + 1) * 64`.
    pub fn tinyset(&self, bucket: u32) -> TinySet {
        self.tinysets[bucket as usize]
    }
}
