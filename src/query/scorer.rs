use std::ops::DerefMut;

use downcast_rs::impl_downcast;

use crate::docset::DocSet;
use crate::Score;

/// A sub-scorer together with its relationship to the scorer exposing it.
pub struct ChildScorer<'a> {
    /// The sub-scorer.
    pub child: &'a dyn Scorer,
    /// Names the role played by `child` within its parent scorer.
    pub relationship: &'static str,
}

/// Scored set of documents matching a query within a specific segment.
///
/// See [`Query`](crate::query::Query).
pub trait Scorer: downcast_rs::Downcast + DocSet + 'static {
    /// Returns the score.
    ///
    /// This method will perform a bit of computation and is not cached.
    fn score(&mut self) -> Score;

    /// Returns the number of times the query matched the current document.
    fn freq(&self) -> u32 {
        1u32
    }

    /// Returns the sub-scorers driving this scorer, for diagnostic tooling.
    fn children(&self) -> Vec<ChildScorer<'_>> {
        Vec::new()
    }
}

impl_downcast!(Scorer);

impl Scorer for Box<dyn Scorer> {
    #[inline]
    fn score(&mut self) -> Score {
        self.deref_mut().score()
    }

    fn freq(&self) -> u32 {
        self.as_ref().freq()
    }

    fn children(&self) -> Vec<ChildScorer<'_>> {
        self.as_ref().children()
    }
}
