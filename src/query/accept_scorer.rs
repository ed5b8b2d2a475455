use std::sync::Arc;

use crate::core::AcceptDocs;
use crate::docset::{DocSet, TERMINATED};
use crate::query::{ChildScorer, Scorer};
use crate::{DocId, Score};

/// Filters a given `Scorer` by removing the docs rejected by an [`AcceptDocs`].
///
/// The filter has no impact on scoring.
pub struct AcceptScorer<TScorer> {
    underlying: TScorer,
    accept_docs: Arc<dyn AcceptDocs>,
}

impl<TScorer: Scorer> AcceptScorer<TScorer> {
    /// Creates a new `AcceptScorer`, positioned on the first accepted document.
    pub fn new(
        mut underlying: TScorer,
        accept_docs: Arc<dyn AcceptDocs>,
    ) -> crate::Result<AcceptScorer<TScorer>> {
        let mut doc = underlying.doc();
        while doc != TERMINATED && !accept_docs.is_accepted(doc) {
            doc = underlying.advance()?;
        }
        Ok(AcceptScorer {
            underlying,
            accept_docs,
        })
    }

    fn skip_rejected(&mut self, mut candidate: DocId) -> crate::Result<DocId> {
        while candidate != TERMINATED && !self.accept_docs.is_accepted(candidate) {
            candidate = self.underlying.advance()?;
        }
        Ok(candidate)
    }
}

/// Boxes `scorer`, wrapping it in an [`AcceptScorer`] if `accept_docs` is set.
pub(crate) fn accept_filtered<TScorer: Scorer>(
    scorer: TScorer,
    accept_docs: Option<Arc<dyn AcceptDocs>>,
) -> crate::Result<Box<dyn Scorer>> {
    Ok(match accept_docs {
        Some(accept_docs) => Box::new(AcceptScorer::new(scorer, accept_docs)?),
        None => Box::new(scorer),
    })
}

impl<TScorer: Scorer> DocSet for AcceptScorer<TScorer> {
    fn advance(&mut self) -> crate::Result<DocId> {
        let candidate = self.underlying.advance()?;
        self.skip_rejected(candidate)
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        let candidate = self.underlying.seek(target)?;
        self.skip_rejected(candidate)
    }

    fn doc(&self) -> DocId {
        self.underlying.doc()
    }

    /// `.size_hint()` directly returns the size
    /// of the underlying docset without taking in account
    /// the fact that docs might be rejected.
    fn size_hint(&self) -> u32 {
        self.underlying.size_hint()
    }
}

impl<TScorer: Scorer> Scorer for AcceptScorer<TScorer> {
    #[inline]
    fn score(&mut self) -> Score {
        self.underlying.score()
    }

    fn freq(&self) -> u32 {
        self.underlying.freq()
    }

    fn children(&self) -> Vec<ChildScorer<'_>> {
        self.underlying.children()
    }
}
