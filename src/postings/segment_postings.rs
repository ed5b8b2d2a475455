use std::sync::Arc;

use crate::docset::DocSet;
use crate::postings::Posting;
use crate::{DocId, TERMINATED};

/// `SegmentPostings` represents the inverted list or postings associated to
/// a term in a `Segment`.
#[derive(Clone)]
pub struct SegmentPostings {
    postings: Arc<[Posting]>,
    cur: usize,
}

impl SegmentPostings {
    pub(crate) fn new(postings: Arc<[Posting]>) -> SegmentPostings {
        SegmentPostings { postings, cur: 0 }
    }

    /// Creates a segment postings object with the given documents,
    /// each with a term frequency of 1.
    ///
    /// This method is mostly useful for unit tests.
    #[cfg(test)]
    pub fn create_from_docs(docs: &[DocId]) -> SegmentPostings {
        let postings: Vec<Posting> = docs
            .iter()
            .map(|&doc| Posting { doc, term_freq: 1 })
            .collect();
        SegmentPostings::new(Arc::from(postings))
    }

    /// Returns the overall number of documents in the postings.
    /// It does not take in account whether documents are deleted or not.
    pub fn doc_freq(&self) -> u32 {
        self.postings.len() as u32
    }

    /// Returns the term frequency for the current document.
    ///
    /// Returns 0 once the postings are exhausted.
    pub fn term_freq(&self) -> u32 {
        self.postings
            .get(self.cur)
            .map(|posting| posting.term_freq)
            .unwrap_or(0u32)
    }
}

impl DocSet for SegmentPostings {
    fn advance(&mut self) -> crate::Result<DocId> {
        if self.cur < self.postings.len() {
            self.cur += 1;
        }
        Ok(self.doc())
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        let remaining = &self.postings[self.cur..];
        self.cur += remaining.partition_point(|posting| posting.doc < target);
        Ok(self.doc())
    }

    #[inline]
    fn doc(&self) -> DocId {
        self.postings
            .get(self.cur)
            .map(|posting| posting.doc)
            .unwrap_or(TERMINATED)
    }

    fn size_hint(&self) -> u32 {
        (self.postings.len() - self.cur) as u32
    }
}
