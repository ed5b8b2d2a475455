use std::sync::Arc;

use super::Scorer;
use crate::core::{AcceptDocs, SegmentReader};
use crate::query::Explanation;
use crate::{DocId, DocSet, Score};

/// A Weight is the specialization of a Query
/// for a given set of segments.
///
/// Weights take part in score normalization: the searcher first collects
/// [`Weight::value_for_normalization`], derives a query norm from it and hands
/// it back through [`Weight::normalize`] before any scorer is built.
///
/// See [`Query`](./trait.Query.html).
pub trait Weight: Send + Sync + 'static {
    /// Returns the scorer for the given segment, or `None` if no document of the
    /// segment can match.
    ///
    /// Documents rejected by `accept_docs` are never returned by the scorer.
    ///
    /// See [`Query`](./trait.Query.html).
    fn scorer(
        &self,
        reader: &SegmentReader,
        accept_docs: Option<Arc<dyn AcceptDocs>>,
    ) -> crate::Result<Option<Box<dyn Scorer>>>;

    /// Returns an `Explanation` for the given document.
    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation>;

    /// Returns the sum of squared weights of this weight and its sub-weights.
    fn value_for_normalization(&self) -> Score {
        1.0
    }

    /// Applies the query norm and the boost of the enclosing queries.
    fn normalize(&mut self, _query_norm: Score, _top_level_boost: Score) {}

    /// Returns the number of alive documents matching within the given `SegmentReader`.
    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        match self.scorer(reader, reader.accept_docs())? {
            Some(mut scorer) => scorer.count(None),
            None => Ok(0u32),
        }
    }
}
