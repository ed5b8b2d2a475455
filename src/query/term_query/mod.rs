mod term_query;
mod term_scorer;
mod term_weight;

pub use self::term_query::TermQuery;
pub use self::term_scorer::TermScorer;
pub use self::term_weight::TermWeight;

#[cfg(test)]
mod tests {
    use crate::core::{Document, Searcher, SegmentReader, Term};
    use crate::docset::{DocSet, TERMINATED};
    use crate::query::{BoostQuery, Query, TermQuery};
    use crate::tests::collect_docs;
    use crate::DocAddress;

    fn create_test_searcher() -> Searcher {
        let reader = SegmentReader::builder()
            .add_document(Document::from_terms([("skill", "rust")]))
            .add_document(Document::from_terms([("skill", "java")]))
            .add_document(Document::from_terms([
                ("skill", "rust"),
                ("skill", "rust"),
                ("skill", "rust"),
                ("skill", "rust"),
            ]))
            .add_document(Document::from_terms([("skill", "rust")]))
            .delete(3)
            .build();
        Searcher::new(vec![reader])
    }

    #[test]
    fn test_term_query_simple() {
        let searcher = create_test_searcher();
        let query = TermQuery::new(Term::new("skill", "rust"));
        let weight = searcher.create_weight(&query).unwrap();
        let reader = searcher.segment_reader(0);
        let mut scorer = weight.scorer(reader, reader.accept_docs()).unwrap().unwrap();
        assert_eq!(scorer.doc(), 0);
        assert_eq!(scorer.score(), 1.0);
        assert_eq!(scorer.advance().unwrap(), 2);
        assert_eq!(scorer.freq(), 4);
        assert_eq!(scorer.score(), 2.0);
        assert_eq!(scorer.advance().unwrap(), TERMINATED);
    }

    #[test]
    fn test_term_query_without_accept_docs_sees_deleted() {
        let searcher = create_test_searcher();
        let query = TermQuery::new(Term::new("skill", "rust"));
        let weight = searcher.create_weight(&query).unwrap();
        let mut scorer = weight
            .scorer(searcher.segment_reader(0), None)
            .unwrap()
            .unwrap();
        assert_eq!(collect_docs(&mut scorer).unwrap(), vec![0, 2, 3]);
        assert_eq!(searcher.count(&query).unwrap(), 2);
    }

    #[test]
    fn test_term_query_missing_term() {
        let searcher = create_test_searcher();
        let query = TermQuery::new(Term::new("skill", "cobol"));
        let weight = searcher.create_weight(&query).unwrap();
        assert!(weight
            .scorer(searcher.segment_reader(0), None)
            .unwrap()
            .is_none());
        assert_eq!(searcher.count(&query).unwrap(), 0);
    }

    #[test]
    fn test_term_query_boost_is_normalized_away() {
        let searcher = create_test_searcher();
        let query = BoostQuery::new(Box::new(TermQuery::new(Term::new("skill", "rust"))), 3.0);
        let weight = searcher.create_weight(&query).unwrap();
        let mut scorer = weight
            .scorer(searcher.segment_reader(0), None)
            .unwrap()
            .unwrap();
        assert!((scorer.score() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_term_query_explain() {
        let searcher = create_test_searcher();
        let query = TermQuery::new(Term::new("skill", "rust"));
        let explanation = searcher.explain(&query, DocAddress::new(0, 2)).unwrap();
        assert_eq!(
            explanation.to_pretty_json(),
            "{\n  \"value\": 2.0,\n  \"description\": \"weight(skill:rust)\",\n  \"details\": [\n    {\n      \"value\": 2.0,\n      \"description\": \"tf(freq=4)\"\n    },\n    {\n      \"value\": 1.0,\n      \"description\": \"queryWeight\"\n    }\n  ]\n}"
        );
        assert!(searcher.explain(&query, DocAddress::new(0, 1)).is_err());
    }

    #[test]
    fn test_term_query_rewrite_is_identity() {
        let searcher = create_test_searcher();
        let query = TermQuery::new(Term::new("skill", "rust"));
        let rewritten = query.rewrite(&searcher).unwrap();
        assert!(rewritten.query_eq(&query));
    }
}
