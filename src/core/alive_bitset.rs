use common::BitSet;

use crate::DocId;

/// Predicate deciding which documents of a segment may be returned.
///
/// Typically encodes liveness (deleted documents are rejected) or visibility.
pub trait AcceptDocs: Send + Sync {
    /// Returns true iff `doc` may be returned to the caller.
    fn is_accepted(&self, doc: DocId) -> bool;
}

impl AcceptDocs for BitSet {
    #[inline]
    fn is_accepted(&self, doc: DocId) -> bool {
        self.contains(doc)
    }
}

/// Set of alive `DocId`s.
#[derive(Clone, Debug)]
pub struct AliveBitSet {
    bitset: BitSet,
    num_deleted: usize,
}

impl AliveBitSet {
    /// Creates an `AliveBitSet` for a segment of `max_doc` documents in which
    /// `deleted_docs` have been deleted.
    pub fn from_deleted_docs(deleted_docs: &[DocId], max_doc: DocId) -> AliveBitSet {
        let mut bitset = BitSet::with_max_value_and_full(max_doc);
        for &doc in deleted_docs {
            if doc < max_doc {
                bitset.remove(doc);
            }
        }
        let num_deleted = max_doc as usize - bitset.len();
        AliveBitSet {
            bitset,
            num_deleted,
        }
    }

    /// Returns true iff the document is still "alive". In other words, if it has not been deleted.
    #[inline]
    pub fn is_alive(&self, doc: DocId) -> bool {
        self.bitset.contains(doc)
    }

    /// Returns true iff the document has been marked as deleted.
    #[inline]
    pub fn is_deleted(&self, doc: DocId) -> bool {
        !self.is_alive(doc)
    }

    /// Iterate over the alive docids.
    #[inline]
    pub fn iter_alive(&self) -> impl Iterator<Item = DocId> + '_ {
        self.bitset.iter()
    }

    /// The number of deleted docs
    pub fn num_deleted(&self) -> usize {
        self.num_deleted
    }
}

impl AcceptDocs for AliveBitSet {
    #[inline]
    fn is_accepted(&self, doc: DocId) -> bool {
        self.is_alive(doc)
    }
}

#[cfg(test)]
mod tests {

    use super::{AcceptDocs, AliveBitSet};

    #[test]
    fn test_alive_bitset_empty() {
        let alive_bitset = AliveBitSet::from_deleted_docs(&[], 10);
        for doc in 0..10 {
            assert_eq!(alive_bitset.is_deleted(doc), !alive_bitset.is_alive(doc));
            assert!(alive_bitset.is_accepted(doc));
        }
        assert_eq!(alive_bitset.num_deleted(), 0);
    }

    #[test]
    fn test_alive_bitset() {
        let alive_bitset = AliveBitSet::from_deleted_docs(&[1, 9], 10);
        assert!(alive_bitset.is_alive(0));
        assert!(alive_bitset.is_deleted(1));
        assert!(alive_bitset.is_alive(2));
        assert!(alive_bitset.is_alive(8));
        assert!(alive_bitset.is_deleted(9));
        assert!(!alive_bitset.is_accepted(9));
        assert_eq!(alive_bitset.num_deleted(), 2);
        assert_eq!(
            alive_bitset.iter_alive().collect::<Vec<_>>(),
            vec![0, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_alive_bitset_ignores_out_of_range_deletes() {
        let alive_bitset = AliveBitSet::from_deleted_docs(&[3, 42], 5);
        assert_eq!(alive_bitset.num_deleted(), 1);
    }
}
