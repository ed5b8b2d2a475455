//! Filters select documents without scoring them.
//!
//! A [`DocFilter`] hands out, for every segment, the set of documents it
//! selects. Depending on the filter, the set is either a random-access
//! [`BitSet`](common::BitSet) or a plain forward-only [`DocSet`].

mod bitset_filter;
mod caching_filter;
mod term_filter;

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use common::BitSet;
use downcast_rs::impl_downcast;

pub use self::bitset_filter::BitSetFilter;
pub use self::caching_filter::BitSetCachingFilter;
pub use self::term_filter::TermFilter;
use crate::core::SegmentReader;
use crate::docset::DocSet;
use crate::query::BitSetDocSet;

/// The documents selected by a [`DocFilter`] within one segment.
pub enum DocIdSet {
    /// Random-access set: supports membership tests and
    /// [`BitSet::prev_set_bit`].
    BitSet(Arc<BitSet>),
    /// Forward-only iteration.
    Streamed(Box<dyn DocSet>),
}

impl DocIdSet {
    /// Returns a `DocSet` iterating over the selected documents.
    pub fn into_docset(self) -> Box<dyn DocSet> {
        match self {
            DocIdSet::BitSet(bitset) => Box::new(BitSetDocSet::from(bitset)),
            DocIdSet::Streamed(docset) => docset,
        }
    }

    /// Returns true iff the set supports random access.
    pub fn is_random_access(&self) -> bool {
        matches!(self, DocIdSet::BitSet(_))
    }
}

impl fmt::Debug for DocIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocIdSet::BitSet(bitset) => write!(f, "BitSet(len={})", bitset.len()),
            DocIdSet::Streamed(docset) => write!(f, "Streamed(size_hint={})", docset.size_hint()),
        }
    }
}

/// Selects a set of documents per segment.
///
/// Filters have a value identity, like queries: the equality and hash of a
/// query embedding a filter include the filter. Implementors get [`FilterEq`]
/// for free by implementing `PartialEq` and `Hash`.
pub trait DocFilter: FilterEq + Send + Sync + downcast_rs::Downcast + fmt::Debug {
    /// Returns the documents of the segment selected by the filter, or `None` if
    /// it selects none.
    fn doc_id_set(&self, reader: &SegmentReader) -> crate::Result<Option<DocIdSet>>;
}

impl_downcast!(DocFilter);

/// Equality and hashing across filter types.
pub trait FilterEq {
    /// Returns true iff `other` is a filter of the same type, equal to `self`.
    fn filter_eq(&self, other: &dyn DocFilter) -> bool;

    /// Feeds the identity of the filter to `state`.
    fn filter_hash(&self, state: &mut dyn Hasher);
}

impl<T> FilterEq for T
where T: 'static + DocFilter + PartialEq + Hash
{
    fn filter_eq(&self, other: &dyn DocFilter) -> bool {
        other
            .downcast_ref::<T>()
            .map_or(false, |other_filter| self == other_filter)
    }

    fn filter_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl PartialEq for dyn DocFilter {
    fn eq(&self, other: &dyn DocFilter) -> bool {
        self.filter_eq(other)
    }
}

impl Eq for dyn DocFilter {}

impl Hash for dyn DocFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filter_hash(state);
    }
}
