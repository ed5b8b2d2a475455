use std::sync::Arc;

use common::{BitSet, TinySet};

use crate::docset::{DocSet, TERMINATED};
use crate::DocId;

/// A `BitSetDocSet` makes it possible to iterate through a bitset as if it was a `DocSet`.
///
/// # Implementation detail
///
/// Skipping is relatively fast here as we can directly point to the
/// right tiny bitset bucket.
pub struct BitSetDocSet {
    docs: Arc<BitSet>,
    cursor_bucket: u32, //< index associated with the current tiny bitset
    cursor_tinybitset: TinySet,
    doc: u32,
}

impl BitSetDocSet {
    fn go_to_bucket(&mut self, bucket_addr: u32) {
        self.cursor_bucket = bucket_addr;
        self.cursor_tinybitset = self.docs.tinyset(bucket_addr);
    }

    /// Moves to the next element still held by the cursor, jumping over
    /// empty buckets.
    fn next_doc(&mut self) -> DocId {
        loop {
            if let Some(lower) = self.cursor_tinybitset.pop_lowest() {
                self.doc = (self.cursor_bucket * 64u32) | lower;
                return self.doc;
            }
            match self.docs.first_non_empty_bucket(self.cursor_bucket + 1) {
                Some(bucket) => self.go_to_bucket(bucket),
                None => {
                    self.doc = TERMINATED;
                    return TERMINATED;
                }
            }
        }
    }
}

impl From<Arc<BitSet>> for BitSetDocSet {
    fn from(docs: Arc<BitSet>) -> BitSetDocSet {
        let mut docset = BitSetDocSet {
            docs,
            cursor_bucket: 0,
            cursor_tinybitset: TinySet::empty(),
            doc: TERMINATED,
        };
        if docset.docs.max_value() > 0 {
            docset.go_to_bucket(0);
            docset.next_doc();
        }
        docset
    }
}

impl From<BitSet> for BitSetDocSet {
    fn from(docs: BitSet) -> BitSetDocSet {
        BitSetDocSet::from(Arc::new(docs))
    }
}

impl DocSet for BitSetDocSet {
    fn advance(&mut self) -> crate::Result<DocId> {
        if self.doc == TERMINATED {
            return Ok(TERMINATED);
        }
        Ok(self.next_doc())
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        if target <= self.doc {
            return Ok(self.doc);
        }
        let next = match self.docs.next_set_bit(target) {
            Some(next) => next,
            None => {
                self.doc = TERMINATED;
                return Ok(TERMINATED);
            }
        };
        self.go_to_bucket(next / 64u32);
        let greater_filter = TinySet::range_greater_or_equal(next % 64u32);
        self.cursor_tinybitset = self.cursor_tinybitset.intersect(greater_filter);
        Ok(self.next_doc())
    }

    /// Returns the current document
    fn doc(&self) -> DocId {
        self.doc
    }

    /// Returns the number of elements of the underlying bitset.
    fn size_hint(&self) -> u32 {
        self.docs.len() as u32
    }
}
