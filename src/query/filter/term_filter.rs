use crate::core::{SegmentReader, Term};
use crate::query::{DocFilter, DocIdSet};

/// Selects the documents containing a given term.
///
/// The documents are streamed out of the term's postings. Wrap the filter
/// in a [`BitSetCachingFilter`](crate::query::BitSetCachingFilter) wherever
/// random access is required.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TermFilter {
    term: Term,
}

impl TermFilter {
    /// Creates a new term filter.
    pub fn new(term: Term) -> TermFilter {
        TermFilter { term }
    }

    /// The `Term` this filter is built out of.
    pub fn term(&self) -> &Term {
        &self.term
    }
}

impl DocFilter for TermFilter {
    fn doc_id_set(&self, reader: &SegmentReader) -> crate::Result<Option<DocIdSet>> {
        Ok(reader
            .read_postings(&self.term)
            .map(|postings| DocIdSet::Streamed(Box::new(postings))))
    }
}
