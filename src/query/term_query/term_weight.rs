use std::sync::Arc;

use super::term_scorer::TermScorer;
use crate::core::{AcceptDocs, SegmentReader, Term};
use crate::docset::DocSet;
use crate::query::accept_scorer::accept_filtered;
use crate::query::explanation::does_not_match;
use crate::query::{Explanation, Scorer, Weight};
use crate::{DocId, Score};

/// Weight associated to a [`TermQuery`](crate::query::TermQuery).
pub struct TermWeight {
    term: Term,
    weight_value: Score,
}

impl Weight for TermWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        accept_docs: Option<Arc<dyn AcceptDocs>>,
    ) -> crate::Result<Option<Box<dyn Scorer>>> {
        match self.specialized_scorer(reader) {
            Some(term_scorer) => accept_filtered(term_scorer, accept_docs).map(Some),
            None => Ok(None),
        }
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let mut scorer = self
            .specialized_scorer(reader)
            .ok_or_else(|| does_not_match(doc))?;
        if scorer.seek(doc)? != doc {
            return Err(does_not_match(doc));
        }
        Ok(scorer.explain())
    }

    fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        self.weight_value = query_norm * top_level_boost;
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        if let Some(accept_docs) = reader.accept_docs() {
            match self.specialized_scorer(reader) {
                Some(mut scorer) => scorer.count(Some(accept_docs.as_ref())),
                None => Ok(0u32),
            }
        } else {
            Ok(reader.doc_freq(&self.term))
        }
    }
}

impl TermWeight {
    pub(crate) fn new(term: Term) -> TermWeight {
        TermWeight {
            term,
            weight_value: 1.0,
        }
    }

    /// Returns the term scorer for the segment, or `None` if the term
    /// does not appear in it.
    pub fn specialized_scorer(&self, reader: &SegmentReader) -> Option<TermScorer> {
        reader
            .read_postings(&self.term)
            .map(|postings| TermScorer::new(postings, self.term.clone(), self.weight_value))
    }
}
