use super::term_weight::TermWeight;
use crate::core::{Searcher, Term};
use crate::query::{Query, Weight};

/// A Term query matches all of the documents
/// containing a specific term.
///
/// The score associated is defined as
/// `sqrt(term_freq) * query_weight`
/// in which :
/// * `term_freq`    - number of occurrences of the term in the document.
/// * `query_weight` - the normalized weight of the query, including the boosts
///   of the enclosing queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TermQuery {
    term: Term,
}

impl TermQuery {
    /// Creates a new term query.
    pub fn new(term: Term) -> TermQuery {
        TermQuery { term }
    }

    /// The `Term` this query is built out of.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Returns a weight object.
    ///
    /// While `.weight(...)` returns a boxed trait object,
    /// this method return a specific implementation.
    /// This is useful for optimization purpose.
    pub fn specialized_weight(&self) -> TermWeight {
        TermWeight::new(self.term.clone())
    }
}

impl Query for TermQuery {
    fn weight(&self, _searcher: &Searcher) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(self.specialized_weight()))
    }
}
