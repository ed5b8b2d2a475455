use std::sync::Arc;

use super::Scorer;
use crate::core::{AcceptDocs, Searcher, SegmentReader};
use crate::query::explanation::does_not_match;
use crate::query::{Explanation, Query, Weight};
use crate::DocId;

/// `EmptyQuery` is a dummy `Query` in which no document matches.
///
/// It is useful for tests and handling edge cases.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmptyQuery;

impl Query for EmptyQuery {
    fn weight(&self, _searcher: &Searcher) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(EmptyWeight))
    }
}

/// `EmptyWeight` is a dummy `Weight` in which no document matches.
///
/// It never produces a scorer.
pub struct EmptyWeight;

impl Weight for EmptyWeight {
    fn scorer(
        &self,
        _reader: &SegmentReader,
        _accept_docs: Option<Arc<dyn AcceptDocs>>,
    ) -> crate::Result<Option<Box<dyn Scorer>>> {
        Ok(None)
    }

    fn explain(&self, _reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        Err(does_not_match(doc))
    }
}
