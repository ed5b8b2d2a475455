use std::borrow::{Borrow, BorrowMut};

use crate::core::AcceptDocs;
use crate::DocId;

/// Sentinel value returned when a DocSet has been entirely consumed.
///
/// This is not u32::MAX as one would have expected, due to the lack of SSE2 instructions
/// to compare [u32; 4].
pub const TERMINATED: DocId = i32::MAX as u32;

/// Represents an iterable set of sorted doc ids.
///
/// Moving the cursor may require reading from the index, which is why
/// `advance` and `seek` are fallible. Errors must be propagated: a `DocSet`
/// that failed is in an unspecified state and should not be driven further.
pub trait DocSet: Send {
    /// Goes to the next element.
    ///
    /// The DocId of the next element is returned.
    /// In other words we should always have :
    /// ```ignore
    /// let doc = docset.advance()?;
    /// assert_eq!(doc, docset.doc());
    /// ```
    ///
    /// If we reached the end of the DocSet, TERMINATED should be returned.
    ///
    /// Calling `.advance()` on a terminated DocSet should be supported, and TERMINATED should
    /// be returned.
    fn advance(&mut self) -> crate::Result<DocId>;

    /// Advances the DocSet forward until reaching the target, or going to the
    /// lowest DocId greater than the target.
    ///
    /// If the current document is already greater or equal to the target,
    /// the DocSet does not move and the current document is returned.
    ///
    /// If the end of the DocSet is reached, TERMINATED is returned.
    ///
    /// Calling `.seek(target)` on a terminated DocSet is legal. Implementation
    /// of DocSet should support it.
    ///
    /// Calling `seek(TERMINATED)` is also legal and is the normal way to consume a DocSet.
    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        let mut doc = self.doc();
        while doc < target {
            doc = self.advance()?;
        }
        Ok(doc)
    }

    /// Returns the current document
    /// Right after creating a new DocSet, the docset points to the first document.
    ///
    /// If the DocSet is empty, .doc() should return `TERMINATED`.
    fn doc(&self) -> DocId;

    /// Returns a best-effort hint of the
    /// length of the docset.
    fn size_hint(&self) -> u32;

    /// Returns the number of documents matching, skipping the ones rejected by
    /// `accept_docs`.
    ///
    /// Calling this method consumes the `DocSet`.
    fn count(&mut self, accept_docs: Option<&dyn AcceptDocs>) -> crate::Result<u32> {
        let mut count = 0u32;
        let mut doc = self.doc();
        while doc != TERMINATED {
            if accept_docs.map_or(true, |accept_docs| accept_docs.is_accepted(doc)) {
                count += 1u32;
            }
            doc = self.advance()?;
        }
        Ok(count)
    }
}

impl<'a> DocSet for &'a mut dyn DocSet {
    fn advance(&mut self) -> crate::Result<DocId> {
        (**self).advance()
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        (**self).seek(target)
    }

    fn doc(&self) -> DocId {
        (**self).doc()
    }

    fn size_hint(&self) -> u32 {
        (**self).size_hint()
    }

    fn count(&mut self, accept_docs: Option<&dyn AcceptDocs>) -> crate::Result<u32> {
        (**self).count(accept_docs)
    }
}

impl<TDocSet: DocSet + ?Sized> DocSet for Box<TDocSet> {
    fn advance(&mut self) -> crate::Result<DocId> {
        let unboxed: &mut TDocSet = self.borrow_mut();
        unboxed.advance()
    }

    fn seek(&mut self, target: DocId) -> crate::Result<DocId> {
        let unboxed: &mut TDocSet = self.borrow_mut();
        unboxed.seek(target)
    }

    fn doc(&self) -> DocId {
        let unboxed: &TDocSet = self.borrow();
        unboxed.doc()
    }

    fn size_hint(&self) -> u32 {
        let unboxed: &TDocSet = self.borrow();
        unboxed.size_hint()
    }

    fn count(&mut self, accept_docs: Option<&dyn AcceptDocs>) -> crate::Result<u32> {
        let unboxed: &mut TDocSet = self.borrow_mut();
        unboxed.count(accept_docs)
    }
}
