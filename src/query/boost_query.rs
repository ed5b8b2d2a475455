use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::{AcceptDocs, Searcher, SegmentReader};
use crate::query::explanation::does_not_match;
use crate::query::{Explanation, Query, QueryClone, Scorer, Weight};
use crate::{DocId, DocSet, Score};

/// `BoostQuery` is a wrapper over a query used to boost its score.
///
/// The document set matched by the `BoostQuery` is strictly the same as the underlying query.
/// The boost takes part in score normalization: it multiplies the normalization value of the
/// underlying query by `boost²` and is handed down to it as part of the top level boost.
pub struct BoostQuery {
    query: Box<dyn Query>,
    boost: Score,
}

impl BoostQuery {
    /// Builds a boost query.
    pub fn new(query: Box<dyn Query>, boost: Score) -> BoostQuery {
        BoostQuery { query, boost }
    }

    /// Returns the boosted query.
    pub fn query(&self) -> &dyn Query {
        self.query.as_ref()
    }

    /// Returns the boost factor.
    pub fn boost(&self) -> Score {
        self.boost
    }
}

impl Clone for BoostQuery {
    fn clone(&self) -> Self {
        BoostQuery {
            query: self.query.box_clone(),
            boost: self.boost,
        }
    }
}

impl fmt::Debug for BoostQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Boost(query={:?}, boost={})", self.query, self.boost)
    }
}

impl PartialEq for BoostQuery {
    fn eq(&self, other: &BoostQuery) -> bool {
        self.boost.to_bits() == other.boost.to_bits()
            && self.query.query_eq(other.query.as_ref())
    }
}

impl Eq for BoostQuery {}

impl Hash for BoostQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.query.hash(state);
        self.boost.to_bits().hash(state);
    }
}

impl Query for BoostQuery {
    fn weight(&self, searcher: &Searcher) -> crate::Result<Box<dyn Weight>> {
        let weight_without_boost = self.query.weight(searcher)?;
        Ok(Box::new(BoostWeight::new(weight_without_boost, self.boost)))
    }

    fn rewrite(&self, searcher: &Searcher) -> crate::Result<Box<dyn Query>> {
        let rewritten = self.query.rewrite(searcher)?;
        if self.boost == 1.0 {
            return Ok(rewritten);
        }
        if rewritten.query_eq(self.query.as_ref()) {
            return Ok(self.box_clone());
        }
        Ok(Box::new(BoostQuery::new(rewritten, self.boost)))
    }
}

pub(crate) struct BoostWeight {
    weight: Box<dyn Weight>,
    boost: Score,
}

impl BoostWeight {
    pub fn new(weight: Box<dyn Weight>, boost: Score) -> Self {
        BoostWeight { weight, boost }
    }
}

impl Weight for BoostWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        accept_docs: Option<Arc<dyn AcceptDocs>>,
    ) -> crate::Result<Option<Box<dyn Scorer>>> {
        self.weight.scorer(reader, accept_docs)
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let mut scorer = self
            .scorer(reader, None)?
            .ok_or_else(|| does_not_match(doc))?;
        if scorer.seek(doc)? != doc {
            return Err(does_not_match(doc));
        }
        let mut explanation =
            Explanation::new(format!("Boost x{} of ...", self.boost), scorer.score());
        let underlying_explanation = self.weight.explain(reader, doc)?;
        explanation.add_detail(underlying_explanation);
        Ok(explanation)
    }

    fn value_for_normalization(&self) -> Score {
        self.weight.value_for_normalization() * self.boost * self.boost
    }

    fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        self.weight.normalize(query_norm, top_level_boost * self.boost);
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        self.weight.count(reader)
    }
}
