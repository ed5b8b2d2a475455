use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use common::BitSet;
use rustc_hash::FxHashMap;

use crate::core::{SegmentId, SegmentReader};
use crate::docset::TERMINATED;
use crate::query::{DocFilter, DocIdSet};

type BitSetCache = FxHashMap<SegmentId, Option<Arc<BitSet>>>;

/// Materializes the documents of a filter into a `BitSet`, once per segment.
///
/// The result is random access whatever the wrapped filter returns, which
/// makes this filter suitable as the parents filter of a block join. Clones
/// share the cache.
///
/// Entries are keyed by [`SegmentId`] and never evicted: build one caching
/// filter per searcher and drop it along with the searcher.
#[derive(Clone)]
pub struct BitSetCachingFilter {
    inner: Arc<dyn DocFilter>,
    cache: Arc<Mutex<BitSetCache>>,
}

impl BitSetCachingFilter {
    /// Wraps `inner`.
    pub fn new(inner: Arc<dyn DocFilter>) -> BitSetCachingFilter {
        BitSetCachingFilter {
            inner,
            cache: Arc::default(),
        }
    }

    fn materialize(&self, reader: &SegmentReader) -> crate::Result<Option<Arc<BitSet>>> {
        let doc_id_set = match self.inner.doc_id_set(reader)? {
            Some(doc_id_set) => doc_id_set,
            None => return Ok(None),
        };
        let mut docset = match doc_id_set {
            DocIdSet::BitSet(bitset) => return Ok(Some(bitset)),
            DocIdSet::Streamed(docset) => docset,
        };
        let max_doc = reader.max_doc();
        let mut bitset = BitSet::with_max_value(max_doc);
        let mut doc = docset.doc();
        while doc != TERMINATED && doc < max_doc {
            bitset.insert(doc);
            doc = docset.advance()?;
        }
        Ok(Some(Arc::new(bitset)))
    }
}

impl fmt::Debug for BitSetCachingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSetCaching({:?})", self.inner)
    }
}

impl PartialEq for BitSetCachingFilter {
    fn eq(&self, other: &BitSetCachingFilter) -> bool {
        *self.inner == *other.inner
    }
}

impl Eq for BitSetCachingFilter {}

impl Hash for BitSetCachingFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl DocFilter for BitSetCachingFilter {
    fn doc_id_set(&self, reader: &SegmentReader) -> crate::Result<Option<DocIdSet>> {
        let segment_id = reader.segment_id();
        if let Some(bitset_opt) = self.cache.lock()?.get(&segment_id) {
            return Ok(bitset_opt.clone().map(DocIdSet::BitSet));
        }
        // The lock is released while the inner filter runs. If two workers
        // race on the same segment, the first insert wins.
        let bitset_opt = self.materialize(reader)?;
        debug!(
            "cached {:?} for segment {:?}: {} docs",
            self.inner,
            segment_id,
            bitset_opt.as_ref().map(|bitset| bitset.len()).unwrap_or(0)
        );
        let bitset_opt = self
            .cache
            .lock()?
            .entry(segment_id)
            .or_insert(bitset_opt)
            .clone();
        Ok(bitset_opt.map(DocIdSet::BitSet))
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::hash::{Hash, Hasher};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::{BitSetCache, BitSetCachingFilter};
    use crate::core::{Document, SegmentReader, Term};
    use crate::query::{DocFilter, DocIdSet, TermFilter};

    #[derive(Debug)]
    struct CountingFilter {
        inner: TermFilter,
        calls: AtomicUsize,
    }

    impl PartialEq for CountingFilter {
        fn eq(&self, other: &CountingFilter) -> bool {
            self.inner == other.inner
        }
    }

    impl Hash for CountingFilter {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.inner.hash(state);
        }
    }

    impl DocFilter for CountingFilter {
        fn doc_id_set(&self, reader: &SegmentReader) -> crate::Result<Option<DocIdSet>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.doc_id_set(reader)
        }
    }

    fn resume_segment() -> SegmentReader {
        SegmentReader::builder()
            .add_block(
                vec![Document::from_terms([("skill", "rust")])],
                Document::from_terms([("type", "resume")]),
            )
            .add_block(vec![], Document::from_terms([("type", "resume")]))
            .build()
    }

    #[test]
    fn test_caching_filter_materializes_once() {
        let counting = Arc::new(CountingFilter {
            inner: TermFilter::new(Term::new("type", "resume")),
            calls: AtomicUsize::new(0),
        });
        let filter = BitSetCachingFilter::new(counting.clone());
        let reader = resume_segment();
        for _ in 0..3 {
            match filter.doc_id_set(&reader).unwrap() {
                Some(DocIdSet::BitSet(bitset)) => {
                    assert_eq!(bitset.max_value(), 3);
                    assert_eq!(bitset.iter().collect::<Vec<_>>(), vec![1, 2]);
                }
                _ => panic!("expected a bitset"),
            }
        }
        let other_reader = resume_segment();
        assert!(filter.doc_id_set(&other_reader).unwrap().is_some());
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_caching_filter_caches_absence() {
        let filter =
            BitSetCachingFilter::new(Arc::new(TermFilter::new(Term::new("type", "letter"))));
        let reader = resume_segment();
        assert!(filter.doc_id_set(&reader).unwrap().is_none());
        assert!(filter.doc_id_set(&reader).unwrap().is_none());
    }

    #[test]
    fn test_caching_filter_eq_ignores_cache() {
        let term_filter = Arc::new(TermFilter::new(Term::new("type", "resume")));
        let left = BitSetCachingFilter::new(term_filter.clone());
        let right = BitSetCachingFilter::new(term_filter);
        left.doc_id_set(&resume_segment()).unwrap();
        assert_eq!(left, right);
    }

    struct LockObservingFilter {
        inner: TermFilter,
        cache: Arc<Mutex<BitSetCache>>,
        saw_unlocked_cache: AtomicBool,
    }

    impl fmt::Debug for LockObservingFilter {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "LockObserving({:?})", self.inner)
        }
    }

    impl PartialEq for LockObservingFilter {
        fn eq(&self, other: &LockObservingFilter) -> bool {
            self.inner == other.inner
        }
    }

    impl Hash for LockObservingFilter {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.inner.hash(state);
        }
    }

    impl DocFilter for LockObservingFilter {
        fn doc_id_set(&self, reader: &SegmentReader) -> crate::Result<Option<DocIdSet>> {
            let unlocked = self.cache.try_lock().is_ok();
            self.saw_unlocked_cache.store(unlocked, Ordering::SeqCst);
            self.inner.doc_id_set(reader)
        }
    }

    #[test]
    fn test_caching_filter_materializes_without_holding_the_cache() {
        let cache: Arc<Mutex<BitSetCache>> = Arc::default();
        let observing = Arc::new(LockObservingFilter {
            inner: TermFilter::new(Term::new("type", "resume")),
            cache: Arc::clone(&cache),
            saw_unlocked_cache: AtomicBool::new(false),
        });
        let filter = BitSetCachingFilter {
            inner: observing.clone(),
            cache,
        };
        let reader = resume_segment();
        assert!(filter.doc_id_set(&reader).unwrap().is_some());
        assert!(observing.saw_unlocked_cache.load(Ordering::SeqCst));
        assert!(filter.cache.lock().unwrap().contains_key(&reader.segment_id()));
    }
}
