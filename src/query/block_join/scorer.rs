use std::sync::Arc;

use common::BitSet;

use super::BLOCK_JOIN_RELATIONSHIP;
use crate::core::AcceptDocs;
use crate::docset::{DocSet, TERMINATED};
use crate::query::{ChildScorer, Scorer};
use crate::{BlockJoinError, DocId, Score};

/// Scorer over the children of the documents matched by a parent scorer.
///
/// The scorer walks the parent scorer one block at a time. For a parent
/// `p`, the children are the documents in `(prev_parent, p)`, where
/// `prev_parent` is the previous set bit of the parents `BitSet`. Every
/// child of a block gets the score and freq of its parent.
///
/// Every document emitted by the parent scorer must be marked in the parents
/// `BitSet`. Any other document fails with
/// [`BlockJoinError::ParentContractViolation`].
pub struct ToChildBlockJoinScorer {
    parent_scorer: Box<dyn Scorer>,
    parent_bits: Arc<BitSet>,
    accept_docs: Option<Arc<dyn AcceptDocs>>,
    do_scores: bool,
    child_doc: DocId,
    parent_doc: DocId,
    parent_score: Score,
    parent_freq: u32,
}

impl ToChildBlockJoinScorer {
    /// Creates the scorer, positioned on the first accepted child.
    ///
    /// `parent_scorer` must be positioned on its first document, and must not
    /// have been filtered by `accept_docs`: the filter only applies to children.
    pub fn new(
        parent_scorer: Box<dyn Scorer>,
        parent_bits: Arc<BitSet>,
        accept_docs: Option<Arc<dyn AcceptDocs>>,
        do_scores: bool,
    ) -> crate::Result<ToChildBlockJoinScorer> {
        let mut scorer = ToChildBlockJoinScorer {
            parent_scorer,
            parent_bits,
            accept_docs,
            do_scores,
            child_doc: TERMINATED,
            parent_doc: TERMINATED,
            parent_score: 0.0,
            parent_freq: 1,
        };
        scorer.enter_block(0)?;
        Ok(scorer)
    }

    /// Returns the parent of the current child, or `TERMINATED`.
    pub fn parent_doc(&self) -> DocId {
        self.parent_doc
    }

    fn is_accepted(&self, doc: DocId) -> bool {
        self.accept_docs
            .as_ref()
            .map_or(true, |accept_docs| accept_docs.is_accepted(doc))
    }

    /// Returns the first accepted document in `[from, to)`.
    fn first_accepted(&self, from: DocId, to: DocId) -> Option<DocId> {
        (from..to).find(|&doc| self.is_accepted(doc))
    }

    fn terminate(&mut self) -> DocId {
        self.child_doc = TERMINATED;
        self.parent_doc = TERMINATED;
        TERMINATED
    }

    /// Checks the current document of the parent scorer against the parents bitset.
    fn validate_parent(&self, parent_doc: DocId) -> crate::Result<()> {
        if self.parent_bits.contains(parent_doc) {
            return Ok(());
        }
        warn!(
            "parent scorer emitted doc {} which is not a parent (parents bitset capacity {})",
            parent_doc,
            self.parent_bits.max_value()
        );
        Err(BlockJoinError::ParentContractViolation { doc: parent_doc })
    }

    /// Positions the scorer on the first accepted child, not lower than
    /// `min_child`, of the block closed by the current document of the
    /// parent scorer. Blocks without such a child are skipped.
    fn enter_block(&mut self, min_child: DocId) -> crate::Result<DocId> {
        loop {
            let parent_doc = self.parent_scorer.doc();
            if parent_doc == TERMINATED {
                return Ok(self.terminate());
            }
            self.validate_parent(parent_doc)?;
            self.parent_doc = parent_doc;
            // A parent at 0 has no room for children.
            if parent_doc == 0 {
                self.parent_scorer.advance()?;
                continue;
            }
            let first_child = self
                .parent_bits
                .prev_set_bit(parent_doc - 1)
                .map(|prev_parent| prev_parent + 1)
                .unwrap_or(0u32);
            let start = first_child.max(min_child);
            if start >= parent_doc {
                self.parent_scorer.advance()?;
                continue;
            }
            if self.do_scores {
                self.parent_score = self.parent_scorer.score();
                self.parent_freq = self.parent_scorer.freq();
            }
            if let Some(child_doc) = self.first_accepted(start, parent_doc) {
                self.child_doc = child_doc;
                debug_assert!(self.child_doc < self.parent_doc);
                debug_assert!(!self.parent_bits.contains(self.child_doc));
                return Ok(child_doc);
            }
            self.parent_scorer.advance()?;
        }
    }
}

impl DocSet for ToChildBlockJoinScorer {
    fn advance(&mut self) -> crate::Result<DocId> {
        if self.child_doc == TERMINATED {
            return Ok(TERMINATED);
        }
        debug_assert!(self.child_doc < self.parent_doc);
        if let Some(child_doc) = self.first_accepted(self.child_doc + 1, self.parent_doc) {
            self.child_doc = child_doc;
            return Ok(child_doc);
        }
        self.parent_scorer.advance()?;
        self.enter_block(0)
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        if self.child_doc >= target {
            return Ok(self.child_doc);
        }
        if target == TERMINATED {
            return Ok(self.terminate());
        }
        if target >= self.parent_doc {
            self.parent_scorer.seek(target + 1)?;
            return self.enter_block(target);
        }
        if let Some(child_doc) = self.first_accepted(target, self.parent_doc) {
            self.child_doc = child_doc;
            return Ok(child_doc);
        }
        self.parent_scorer.advance()?;
        self.enter_block(0)
    }

    fn doc(&self) -> DocId {
        self.child_doc
    }

    fn size_hint(&self) -> u32 {
        self.parent_scorer.size_hint()
    }
}

impl Scorer for ToChildBlockJoinScorer {
    fn score(&mut self) -> Score {
        self.parent_score
    }

    fn freq(&self) -> u32 {
        self.parent_freq
    }

    fn children(&self) -> Vec<ChildScorer<'_>> {
        vec![ChildScorer {
            child: self.parent_scorer.as_ref(),
            relationship: BLOCK_JOIN_RELATIONSHIP,
        }]
    }
}
