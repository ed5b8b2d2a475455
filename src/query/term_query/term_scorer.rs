use crate::core::Term;
use crate::docset::DocSet;
use crate::postings::SegmentPostings;
use crate::query::{Explanation, Scorer};
use crate::{DocId, Score};

/// Scores the documents of a postings list by the square root of their
/// term frequency.
pub struct TermScorer {
    postings: SegmentPostings,
    term: Term,
    weight_value: Score,
}

impl TermScorer {
    /// Creates a scorer over the given postings.
    pub fn new(postings: SegmentPostings, term: Term, weight_value: Score) -> TermScorer {
        TermScorer {
            postings,
            term,
            weight_value,
        }
    }

    /// Returns the number of occurrences of the term in the current document.
    pub fn term_freq(&self) -> u32 {
        self.postings.term_freq()
    }

    /// Explains the score of the current document.
    pub fn explain(&self) -> Explanation {
        let term_freq = self.term_freq();
        let tf = (term_freq as Score).sqrt();
        let mut explanation = Explanation::new(
            format!("weight({})", self.term),
            tf * self.weight_value,
        );
        explanation.add_const(format!("tf(freq={term_freq})"), tf);
        explanation.add_const("queryWeight", self.weight_value);
        explanation
    }
}

impl DocSet for TermScorer {
    #[inline]
    fn advance(&mut self) -> crate::Result<DocId> {
        self.postings.advance()
    }

    #[inline]
    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        self.postings.seek(target)
    }

    #[inline]
    fn doc(&self) -> DocId {
        self.postings.doc()
    }

    fn size_hint(&self) -> u32 {
        self.postings.size_hint()
    }
}

impl Scorer for TermScorer {
    #[inline]
    fn score(&mut self) -> Score {
        (self.term_freq() as Score).sqrt() * self.weight_value
    }

    fn freq(&self) -> u32 {
        self.term_freq()
    }
}
