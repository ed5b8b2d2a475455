use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::{AcceptDocs, Searcher, SegmentReader};
use crate::query::accept_scorer::accept_filtered;
use crate::query::explanation::does_not_match;
use crate::query::{DocFilter, Explanation, Query, Scorer, Weight};
use crate::{DocId, DocSet, Score};

/// `ConstScoreQuery` turns a [`DocFilter`] into a query.
///
/// Every document selected by the filter gets the configured score,
/// multiplied by the boost of the enclosing queries. The query does not take
/// part in score normalization.
#[derive(Clone)]
pub struct ConstScoreQuery {
    filter: Arc<dyn DocFilter>,
    score: Score,
}

impl ConstScoreQuery {
    /// Builds a const score query.
    pub fn new(filter: Arc<dyn DocFilter>, score: Score) -> ConstScoreQuery {
        ConstScoreQuery { filter, score }
    }
}

impl fmt::Debug for ConstScoreQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Const(score={}, filter={:?})", self.score, self.filter)
    }
}

impl PartialEq for ConstScoreQuery {
    fn eq(&self, other: &ConstScoreQuery) -> bool {
        self.score.to_bits() == other.score.to_bits() && *self.filter == *other.filter
    }
}

impl Eq for ConstScoreQuery {}

impl Hash for ConstScoreQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filter.hash(state);
        self.score.to_bits().hash(state);
    }
}

impl Query for ConstScoreQuery {
    fn weight(&self, _searcher: &Searcher) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(ConstWeight::new(Arc::clone(&self.filter), self.score)))
    }
}

struct ConstWeight {
    filter: Arc<dyn DocFilter>,
    score: Score,
    weight_value: Score,
}

impl ConstWeight {
    pub fn new(filter: Arc<dyn DocFilter>, score: Score) -> Self {
        ConstWeight {
            filter,
            score,
            weight_value: score,
        }
    }
}

impl Weight for ConstWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        accept_docs: Option<Arc<dyn AcceptDocs>>,
    ) -> crate::Result<Option<Box<dyn Scorer>>> {
        let doc_id_set = match self.filter.doc_id_set(reader)? {
            Some(doc_id_set) => doc_id_set,
            None => return Ok(None),
        };
        let const_scorer = ConstScorer::new(doc_id_set.into_docset(), self.weight_value);
        accept_filtered(const_scorer, accept_docs).map(Some)
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let mut scorer = self
            .scorer(reader, None)?
            .ok_or_else(|| does_not_match(doc))?;
        if scorer.seek(doc)? != doc {
            return Err(does_not_match(doc));
        }
        Ok(Explanation::new("Const", self.weight_value))
    }

    fn value_for_normalization(&self) -> Score {
        0.0
    }

    fn normalize(&mut self, _query_norm: Score, top_level_boost: Score) {
        self.weight_value = self.score * top_level_boost;
    }
}

/// Wraps a `DocSet` and simply returns a constant `Scorer`.
/// The `ConstScorer` is useful if you have a `DocSet` where
/// you needed a scorer.
pub struct ConstScorer<TDocSet: DocSet> {
    docset: TDocSet,
    score: Score,
}

impl<TDocSet: DocSet> ConstScorer<TDocSet> {
    /// Creates a new `ConstScorer`.
    pub fn new(docset: TDocSet, score: Score) -> ConstScorer<TDocSet> {
        ConstScorer { docset, score }
    }
}

impl<TDocSet: DocSet> From<TDocSet> for ConstScorer<TDocSet> {
    fn from(docset: TDocSet) -> Self {
        ConstScorer::new(docset, 1.0)
    }
}

impl<TDocSet: DocSet> DocSet for ConstScorer<TDocSet> {
    fn advance(&mut self) -> crate::Result<DocId> {
        self.docset.advance()
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        self.docset.seek(target)
    }

    fn doc(&self) -> DocId {
        self.docset.doc()
    }

    fn size_hint(&self) -> u32 {
        self.docset.size_hint()
    }
}

impl<TDocSet: DocSet + 'static> Scorer for ConstScorer<TDocSet> {
    fn score(&mut self) -> Score {
        self.score
    }
}
