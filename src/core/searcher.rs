use std::fmt;

use crate::core::SegmentReader;
use crate::query::{Explanation, Query, Weight};
use crate::{DocId, Score, SegmentOrdinal};

/// `DocAddress` contains all the necessary information
/// to identify a document given a `Searcher` object.
///
/// It consists of an id identifying its segment, and
/// a segment-local `DocId`.
///
/// The id used for the segment is actually an ordinal
/// in the list of `Segment`s held by a `Searcher`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocAddress {
    /// The segment ordinal id that identifies the segment
    /// hosting the document in the `Searcher` it is called from.
    pub segment_ord: SegmentOrdinal,
    /// The segment-local `DocId`.
    pub doc_id: DocId,
}

impl DocAddress {
    /// Creates a new DocAddress from the segment/docId pair.
    pub fn new(segment_ord: SegmentOrdinal, doc_id: DocId) -> DocAddress {
        DocAddress {
            segment_ord,
            doc_id,
        }
    }
}

/// Returns the normalization factor applied to a weight whose
/// normalization value is `sum_of_squared_weights`.
fn query_norm(sum_of_squared_weights: Score) -> Score {
    if sum_of_squared_weights > 0.0 && sum_of_squared_weights.is_finite() {
        1.0 / sum_of_squared_weights.sqrt()
    } else {
        1.0
    }
}

/// Holds a list of `SegmentReader`s ready for search.
///
/// It guarantees that the `Segment` will not be removed before
/// the destruction of the `Searcher`.
pub struct Searcher {
    segment_readers: Vec<SegmentReader>,
}

impl Searcher {
    /// Creates a searcher over the given segments.
    pub fn new(segment_readers: Vec<SegmentReader>) -> Searcher {
        Searcher { segment_readers }
    }

    /// Returns the overall number of documents in the index.
    pub fn num_docs(&self) -> u64 {
        self.segment_readers
            .iter()
            .map(|segment_reader| u64::from(segment_reader.num_docs()))
            .sum::<u64>()
    }

    /// Return the list of segment readers
    pub fn segment_readers(&self) -> &[SegmentReader] {
        &self.segment_readers
    }

    /// Returns the segment_reader associated with the given segment_ord
    pub fn segment_reader(&self, segment_ord: SegmentOrdinal) -> &SegmentReader {
        &self.segment_readers[segment_ord as usize]
    }

    /// Rewrites the query until it reaches a fixpoint.
    ///
    /// The returned query is the last rewritten form, even when it compares
    /// equal to its predecessor.
    pub fn rewrite(&self, query: &dyn Query) -> crate::Result<Box<dyn Query>> {
        let mut current = query.rewrite(self)?;
        let mut previous = query.box_clone();
        while !current.query_eq(previous.as_ref()) {
            let rewritten = current.rewrite(self)?;
            previous = std::mem::replace(&mut current, rewritten);
        }
        Ok(current)
    }

    /// Rewrites the query, builds its weight and normalizes it.
    ///
    /// The weight is ready to produce scorers for any of the segments
    /// of this searcher.
    pub fn create_weight(&self, query: &dyn Query) -> crate::Result<Box<dyn Weight>> {
        let rewritten = self.rewrite(query)?;
        let mut weight = rewritten.weight(self)?;
        let sum_of_squared_weights = weight.value_for_normalization();
        let norm = query_norm(sum_of_squared_weights);
        debug!(
            "query={:?} sum_of_squared_weights={} query_norm={}",
            rewritten, sum_of_squared_weights, norm
        );
        weight.normalize(norm, 1.0);
        Ok(weight)
    }

    /// Returns the number of alive documents matching the query,
    /// summed over all segments.
    pub fn count(&self, query: &dyn Query) -> crate::Result<usize> {
        let weight = self.create_weight(query)?;
        let mut result = 0;
        for reader in &self.segment_readers {
            result += weight.count(reader)? as usize;
        }
        Ok(result)
    }

    /// Returns an `Explanation` for the score of the document.
    pub fn explain(&self, query: &dyn Query, doc_address: DocAddress) -> crate::Result<Explanation> {
        let weight = self.create_weight(query)?;
        let reader = self.segment_reader(doc_address.segment_ord);
        weight.explain(reader, doc_address.doc_id)
    }
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segment_ids = self
            .segment_readers
            .iter()
            .map(SegmentReader::segment_id)
            .collect::<Vec<_>>();
        write!(f, "Searcher({segment_ids:?})")
    }
}
