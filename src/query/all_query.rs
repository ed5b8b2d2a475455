use std::sync::Arc;

use crate::core::{AcceptDocs, Searcher, SegmentReader};
use crate::docset::{DocSet, TERMINATED};
use crate::query::accept_scorer::accept_filtered;
use crate::query::explanation::does_not_match;
use crate::query::{Explanation, Query, Scorer, Weight};
use crate::{DocId, Score};

/// Query that matches all of the documents.
///
/// All of the document get the same constant score.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AllQuery;

impl Query for AllQuery {
    fn weight(&self, _: &Searcher) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(AllWeight::default()))
    }
}

/// Weight associated to the `AllQuery` query.
pub struct AllWeight {
    weight_value: Score,
}

impl Default for AllWeight {
    fn default() -> Self {
        AllWeight { weight_value: 1.0 }
    }
}

impl Weight for AllWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        accept_docs: Option<Arc<dyn AcceptDocs>>,
    ) -> crate::Result<Option<Box<dyn Scorer>>> {
        if reader.max_doc() == 0 {
            return Ok(None);
        }
        let all_scorer = AllScorer::new(reader.max_doc(), self.weight_value);
        accept_filtered(all_scorer, accept_docs).map(Some)
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        if doc >= reader.max_doc() {
            return Err(does_not_match(doc));
        }
        Ok(Explanation::new("AllQuery", self.weight_value))
    }

    fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        self.weight_value = query_norm * top_level_boost;
    }
}

/// Scorer associated to the `AllQuery` query.
pub struct AllScorer {
    doc: DocId,
    max_doc: DocId,
    score: Score,
}

impl AllScorer {
    /// Creates a scorer over `0..max_doc`, giving `score` to every document.
    pub fn new(max_doc: DocId, score: Score) -> AllScorer {
        let doc = if max_doc == 0 { TERMINATED } else { 0u32 };
        AllScorer {
            doc,
            max_doc,
            score,
        }
    }
}

impl DocSet for AllScorer {
    fn advance(&mut self) -> crate::Result<DocId> {
        if self.doc == TERMINATED || self.doc + 1 >= self.max_doc {
            self.doc = TERMINATED;
            return Ok(TERMINATED);
        }
        self.doc += 1;
        Ok(self.doc)
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        if target <= self.doc {
            return Ok(self.doc);
        }
        self.doc = if target >= self.max_doc {
            TERMINATED
        } else {
            target
        };
        Ok(self.doc)
    }

    fn doc(&self) -> DocId {
        self.doc
    }

    fn size_hint(&self) -> u32 {
        self.max_doc
    }
}

impl Scorer for AllScorer {
    fn score(&mut self) -> Score {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::{AllQuery, AllScorer};
    use crate::core::{Document, Searcher, SegmentReader};
    use crate::docset::{DocSet, TERMINATED};
    use crate::query::{BoostQuery, Query};
    use crate::tests::collect_docs;
    use crate::DocAddress;

    fn create_test_searcher() -> Searcher {
        let first = SegmentReader::builder()
            .add_document(Document::from_terms([("text", "aaa")]))
            .add_document(Document::from_terms([("text", "bbb")]))
            .build();
        let second = SegmentReader::builder()
            .add_document(Document::from_terms([("text", "ccc")]))
            .build();
        Searcher::new(vec![first, second])
    }

    #[test]
    fn test_all_query() {
        let searcher = create_test_searcher();
        let weight = searcher.create_weight(&AllQuery).unwrap();
        {
            let reader = searcher.segment_reader(0);
            let mut scorer = weight.scorer(reader, None).unwrap().unwrap();
            assert_eq!(scorer.doc(), 0u32);
            assert_eq!(scorer.advance().unwrap(), 1u32);
            assert_eq!(scorer.doc(), 1u32);
            assert_eq!(scorer.advance().unwrap(), TERMINATED);
        }
        {
            let reader = searcher.segment_reader(1);
            let mut scorer = weight.scorer(reader, None).unwrap().unwrap();
            assert_eq!(scorer.doc(), 0u32);
            assert_eq!(scorer.score(), 1.0);
            assert_eq!(scorer.advance().unwrap(), TERMINATED);
        }
        assert_eq!(searcher.count(&AllQuery).unwrap(), 3);
    }

    #[test]
    fn test_all_query_skips_deleted_docs() {
        let reader = SegmentReader::builder()
            .add_document(Document::new())
            .add_document(Document::new())
            .add_document(Document::new())
            .delete(1)
            .build();
        let searcher = Searcher::new(vec![reader]);
        let weight = AllQuery.weight(&searcher).unwrap();
        let reader = searcher.segment_reader(0);
        let mut scorer = weight.scorer(reader, reader.accept_docs()).unwrap().unwrap();
        assert_eq!(collect_docs(&mut scorer).unwrap(), vec![0, 2]);
        assert_eq!(searcher.count(&AllQuery).unwrap(), 2);
    }

    #[test]
    fn test_all_query_empty_segment() {
        let searcher = Searcher::new(vec![SegmentReader::builder().build()]);
        let weight = AllQuery.weight(&searcher).unwrap();
        assert!(weight
            .scorer(searcher.segment_reader(0), None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_all_scorer_seek() {
        let mut scorer = AllScorer::new(10, 1.0);
        assert_eq!(scorer.seek(4).unwrap(), 4);
        assert_eq!(scorer.seek(2).unwrap(), 4);
        assert_eq!(scorer.seek(10).unwrap(), TERMINATED);
        assert_eq!(scorer.advance().unwrap(), TERMINATED);
    }

    #[test]
    fn test_all_query_explain() {
        let searcher = create_test_searcher();
        let query = BoostQuery::new(Box::new(AllQuery), 0.2);
        let explanation = searcher.explain(&query, DocAddress::new(0, 1)).unwrap();
        assert_eq!(explanation.details()[0].description(), "AllQuery");
        assert!(searcher.explain(&AllQuery, DocAddress::new(0, 2)).is_err());
    }
}
