use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::ToChildBlockJoinScorer;
use crate::core::{AcceptDocs, Searcher, SegmentReader};
use crate::error::UnsupportedFeature;
use crate::query::{DocFilter, DocIdSet, Explanation, Query, QueryClone, Scorer, Weight};
use crate::{BlockJoinError, DocId, Score};

/// Matches the children of the parents matched by a parent query.
///
/// The parents filter marks which documents of a segment are parents. It
/// must resolve to a random-access `BitSet`, for instance by wrapping it in a
/// [`BitSetCachingFilter`](crate::query::BitSetCachingFilter), and the parent
/// query must only match documents marked by it.
///
/// With `do_scores`, every child gets the score and freq of its parent.
/// Otherwise children score `0.0`.
#[derive(Clone)]
pub struct ToChildBlockJoinQuery {
    orig_parent_query: Box<dyn Query>,
    parent_query: Box<dyn Query>,
    parents_filter: Arc<dyn DocFilter>,
    do_scores: bool,
    boost: Score,
}

impl ToChildBlockJoinQuery {
    /// Creates a block join query returning the children of the documents
    /// matched by `parent_query`.
    pub fn new(
        parent_query: Box<dyn Query>,
        parents_filter: Arc<dyn DocFilter>,
        do_scores: bool,
    ) -> ToChildBlockJoinQuery {
        ToChildBlockJoinQuery {
            orig_parent_query: parent_query.clone(),
            parent_query,
            parents_filter,
            do_scores,
            boost: 1.0,
        }
    }

    /// Sets the boost of the query.
    pub fn with_boost(mut self, boost: Score) -> ToChildBlockJoinQuery {
        self.set_boost(boost);
        self
    }

    /// Sets the boost of the query.
    pub fn set_boost(&mut self, boost: Score) {
        self.boost = boost;
    }

    /// Returns the boost of the query.
    pub fn boost(&self) -> Score {
        self.boost
    }

    /// Returns the parent query, as passed at construction.
    pub fn parent_query(&self) -> &dyn Query {
        self.orig_parent_query.as_ref()
    }

    /// Returns the parents filter.
    pub fn parents_filter(&self) -> &Arc<dyn DocFilter> {
        &self.parents_filter
    }

    /// Returns true iff children get the score of their parent.
    pub fn do_scores(&self) -> bool {
        self.do_scores
    }
}

impl fmt::Debug for ToChildBlockJoinQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ToChildBlockJoin(parent_query={:?}, parents_filter={:?}, do_scores={}, boost={})",
            self.orig_parent_query, self.parents_filter, self.do_scores, self.boost
        )
    }
}

impl PartialEq for ToChildBlockJoinQuery {
    fn eq(&self, other: &ToChildBlockJoinQuery) -> bool {
        self
            .orig_parent_query
            .query_eq(other.orig_parent_query.as_ref())
            && *self.parents_filter == *other.parents_filter
            && self.do_scores == other.do_scores
            && self.boost.to_bits() == other.boost.to_bits()
    }
}

impl Eq for ToChildBlockJoinQuery {}

impl Hash for ToChildBlockJoinQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.orig_parent_query.hash(state);
        self.parents_filter.hash(state);
        self.do_scores.hash(state);
        self.boost.to_bits().hash(state);
    }
}

impl Query for ToChildBlockJoinQuery {
    fn weight(&self, searcher: &Searcher) -> crate::Result<Box<dyn Weight>> {
        let parent_weight = self.parent_query.weight(searcher)?;
        Ok(Box::new(ToChildBlockJoinWeight {
            parent_weight,
            parents_filter: Arc::clone(&self.parents_filter),
            do_scores: self.do_scores,
            boost: self.boost,
        }))
    }

    fn rewrite(&self, searcher: &Searcher) -> crate::Result<Box<dyn Query>> {
        let rewritten = searcher.rewrite(self.parent_query.as_ref())?;
        if rewritten.query_eq(self.parent_query.as_ref()) {
            return Ok(self.box_clone());
        }
        Ok(Box::new(ToChildBlockJoinQuery {
            orig_parent_query: self.orig_parent_query.clone(),
            parent_query: rewritten,
            parents_filter: Arc::clone(&self.parents_filter),
            do_scores: self.do_scores,
            boost: self.boost,
        }))
    }
}

/// Weight associated to the [`ToChildBlockJoinQuery`].
pub struct ToChildBlockJoinWeight {
    parent_weight: Box<dyn Weight>,
    parents_filter: Arc<dyn DocFilter>,
    do_scores: bool,
    boost: Score,
}

impl Weight for ToChildBlockJoinWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        accept_docs: Option<Arc<dyn AcceptDocs>>,
    ) -> crate::Result<Option<Box<dyn Scorer>>> {
        // Parents are never filtered: a deleted parent still closes its block.
        let parent_scorer = match self.parent_weight.scorer(reader, None)? {
            Some(parent_scorer) => parent_scorer,
            None => {
                debug!("no parent matches in segment {:?}", reader.segment_id());
                return Ok(None);
            }
        };
        let parent_bits = match self.parents_filter.doc_id_set(reader)? {
            Some(DocIdSet::BitSet(parent_bits)) => parent_bits,
            Some(DocIdSet::Streamed(_)) => {
                return Err(BlockJoinError::InvalidConfiguration(format!(
                    "parents filter {:?} must produce a random-access bitset, wrap it in a \
                     BitSetCachingFilter",
                    self.parents_filter
                )));
            }
            None => {
                debug!("no parents in segment {:?}", reader.segment_id());
                return Ok(None);
            }
        };
        let scorer =
            ToChildBlockJoinScorer::new(parent_scorer, parent_bits, accept_docs, self.do_scores)?;
        Ok(Some(Box::new(scorer)))
    }

    fn explain(&self, _reader: &SegmentReader, _doc: DocId) -> crate::Result<Explanation> {
        Err(BlockJoinError::Unsupported(UnsupportedFeature::new(
            "ToChildBlockJoinQuery",
            "explain",
        )))
    }

    fn value_for_normalization(&self) -> Score {
        self.parent_weight.value_for_normalization() * self.boost * self.boost
    }

    fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        self.parent_weight
            .normalize(query_norm, top_level_boost * self.boost);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hasher;
    use std::sync::Arc;

    use common::BitSet;

    use super::ToChildBlockJoinQuery;
    use crate::core::{Document, Searcher, SegmentReader, Term};
    use crate::docset::{DocSet, TERMINATED};
    use crate::query::{
        AllQuery, BitSetCachingFilter, BitSetFilter, BoostQuery, DocFilter, EmptyQuery, Query,
        TermFilter, TermQuery, ToChildBlockJoinScorer,
    };
    use crate::tests::collect_docs;
    use crate::{BlockJoinError, DocAddress};

    fn resume(country: &str) -> Document {
        Document::from_terms([("type", "resume"), ("country", country)])
    }

    fn job(skill: &str) -> Document {
        Document::from_terms([("type", "job"), ("skill", skill)])
    }

    /// Resumes at docs 2, 5, 6 and 9.
    fn create_searcher() -> Searcher {
        let reader = SegmentReader::builder()
            .add_block(vec![job("java"), job("rust")], resume("fr"))
            .add_block(vec![job("rust"), job("go")], resume("us"))
            .add_block(vec![], resume("fr"))
            .add_block(vec![job("rust"), job("c")], resume("fr"))
            .build();
        Searcher::new(vec![reader])
    }

    fn resume_filter() -> Arc<dyn DocFilter> {
        Arc::new(BitSetCachingFilter::new(Arc::new(TermFilter::new(Term::new(
            "type", "resume",
        )))))
    }

    fn country_query(country: &str) -> Box<dyn Query> {
        Box::new(TermQuery::new(Term::new("country", country)))
    }

    fn hash_of(query: &dyn Query) -> u64 {
        let mut hasher = DefaultHasher::new();
        query.query_hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_to_child_block_join() -> crate::Result<()> {
        let searcher = create_searcher();
        let query = ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), false);
        let weight = searcher.create_weight(&query)?;
        let reader = searcher.segment_reader(0);
        let mut scorer = weight.scorer(reader, reader.accept_docs())?.unwrap();
        assert_eq!(collect_docs(&mut scorer)?, vec![0, 1, 7, 8]);
        assert_eq!(searcher.count(&query)?, 4);
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_deleted_children() -> crate::Result<()> {
        let reader = SegmentReader::builder()
            .add_block(vec![job("java"), job("rust")], resume("fr"))
            .add_block(vec![job("go")], resume("fr"))
            .delete(1)
            .delete(2)
            .build();
        let searcher = Searcher::new(vec![reader]);
        let query = ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), false);
        let weight = searcher.create_weight(&query)?;
        let reader = searcher.segment_reader(0);
        let mut scorer = weight.scorer(reader, reader.accept_docs())?.unwrap();
        // The deleted parent still closes its block.
        assert_eq!(collect_docs(&mut scorer)?, vec![0, 3]);
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_scores() -> crate::Result<()> {
        let searcher = create_searcher();
        let parent_query = BoostQuery::new(country_query("us"), 2.0);
        let query = ToChildBlockJoinQuery::new(Box::new(parent_query), resume_filter(), true);
        let weight = searcher.create_weight(&query)?;
        let mut scorer = weight.scorer(searcher.segment_reader(0), None)?.unwrap();
        assert_eq!(scorer.doc(), 3);
        let first_score = scorer.score();
        assert!(first_score > 0.0);
        assert_eq!(scorer.advance()?, 4);
        assert_eq!(scorer.score(), first_score);
        assert_eq!(scorer.advance()?, TERMINATED);
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_normalization() -> crate::Result<()> {
        let searcher = create_searcher();
        let query = ToChildBlockJoinQuery::new(Box::new(AllQuery), resume_filter(), true)
            .with_boost(3.0);
        let weight = query.weight(&searcher)?;
        assert_eq!(weight.value_for_normalization(), 9.0);
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_only_parents() -> crate::Result<()> {
        let searcher = create_searcher();
        let reader = searcher.segment_reader(0);
        let filter = BitSetFilter::new().with_segment(
            reader.segment_id(),
            BitSet::from_elements(reader.max_doc(), 0..reader.max_doc()),
        );
        let query = ToChildBlockJoinQuery::new(Box::new(AllQuery), Arc::new(filter), true);
        let weight = searcher.create_weight(&query)?;
        // Every block is empty.
        let scorer = weight.scorer(reader, None)?.unwrap();
        assert_eq!(scorer.doc(), TERMINATED);
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_forwards_boost() -> crate::Result<()> {
        let searcher = create_searcher();
        let reader = searcher.segment_reader(0);
        let query =
            ToChildBlockJoinQuery::new(country_query("us"), resume_filter(), true).with_boost(3.0);
        let mut weight = query.weight(&searcher)?;
        weight.normalize(0.5, 2.0);
        let mut scorer = weight.scorer(reader, None)?.unwrap();
        assert_eq!(scorer.doc(), 3);
        // query_norm * top_level_boost * boost
        assert_eq!(scorer.score(), 3.0);
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_no_parent_match() -> crate::Result<()> {
        let searcher = create_searcher();
        let reader = searcher.segment_reader(0);
        let query = ToChildBlockJoinQuery::new(country_query("de"), resume_filter(), true);
        let weight = searcher.create_weight(&query)?;
        assert!(weight.scorer(reader, None)?.is_none());
        let query = ToChildBlockJoinQuery::new(Box::new(EmptyQuery), resume_filter(), true);
        assert_eq!(searcher.count(&query)?, 0);
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_no_parents_in_segment() -> crate::Result<()> {
        let searcher = create_searcher();
        let reader = searcher.segment_reader(0);
        let query = ToChildBlockJoinQuery::new(Box::new(AllQuery), Arc::new(BitSetFilter::new()), true);
        let weight = searcher.create_weight(&query)?;
        assert!(weight.scorer(reader, None)?.is_none());
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_requires_random_access_parents() -> crate::Result<()> {
        let searcher = create_searcher();
        let streamed_filter = Arc::new(TermFilter::new(Term::new("type", "resume")));
        let query = ToChildBlockJoinQuery::new(country_query("fr"), streamed_filter, false);
        let weight = searcher.create_weight(&query)?;
        let result = weight.scorer(searcher.segment_reader(0), None);
        assert!(matches!(
            result,
            Err(BlockJoinError::InvalidConfiguration(_))
        ));
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_parent_query_matching_children() -> crate::Result<()> {
        let searcher = create_searcher();
        let query = ToChildBlockJoinQuery::new(Box::new(AllQuery), resume_filter(), false);
        let weight = searcher.create_weight(&query)?;
        let result = weight.scorer(searcher.segment_reader(0), None);
        assert!(matches!(
            result,
            Err(BlockJoinError::ParentContractViolation { doc: 0 })
        ));
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_explain_is_unsupported() {
        let searcher = create_searcher();
        let query = ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), true);
        let result = searcher.explain(&query, DocAddress::new(0, 0));
        match result {
            Err(BlockJoinError::Unsupported(unsupported)) => {
                assert_eq!(unsupported.query(), "ToChildBlockJoinQuery")
            }
            _ => panic!("explain must be unsupported"),
        }
    }

    #[test]
    fn test_to_child_block_join_eq() {
        let query = ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), true);
        let same = ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), true);
        assert_eq!(query, same);
        assert_eq!(hash_of(&query), hash_of(&same));
        assert_ne!(
            query,
            ToChildBlockJoinQuery::new(country_query("us"), resume_filter(), true)
        );
        assert_ne!(
            query,
            ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), false)
        );
        assert_ne!(query, same.clone().with_boost(2.0));
        let other_filter: Arc<dyn DocFilter> = Arc::new(TermFilter::new(Term::new("type", "resume")));
        assert_ne!(
            query,
            ToChildBlockJoinQuery::new(country_query("fr"), other_filter, true)
        );
    }

    #[test]
    fn test_to_child_block_join_eq_across_rewrite() -> crate::Result<()> {
        let searcher = create_searcher();
        let parent_query = BoostQuery::new(country_query("fr"), 1.0);
        let query = ToChildBlockJoinQuery::new(Box::new(parent_query), resume_filter(), true);
        let rewritten = query.rewrite(&searcher)?;
        assert!(rewritten.query_eq(&query));
        assert_eq!(hash_of(rewritten.as_ref()), hash_of(&query));
        let rewritten_join = rewritten.downcast_ref::<ToChildBlockJoinQuery>().unwrap();
        assert!(rewritten_join.parent_query.query_eq(country_query("fr").as_ref()));
        assert!(rewritten_join
            .parent_query()
            .query_eq(&BoostQuery::new(country_query("fr"), 1.0)));
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_rewrite_without_change() -> crate::Result<()> {
        let searcher = create_searcher();
        let query = ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), true);
        let rewritten = query.rewrite(&searcher)?;
        assert!(rewritten.query_eq(&query));
        Ok(())
    }

    #[test]
    fn test_to_child_block_join_scorer_is_exposed() -> crate::Result<()> {
        let searcher = create_searcher();
        let query = ToChildBlockJoinQuery::new(country_query("fr"), resume_filter(), true);
        let weight = searcher.create_weight(&query)?;
        let scorer = weight.scorer(searcher.segment_reader(0), None)?.unwrap();
        let join_scorer = scorer.downcast_ref::<ToChildBlockJoinScorer>().unwrap();
        assert_eq!(join_scorer.parent_doc(), 2);
        Ok(())
    }
}
