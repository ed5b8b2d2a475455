//! Postings module (also called inverted list)
//!
//! For a given term, the postings list is the sorted list of the documents
//! containing it, each with the number of occurrences of the term.

mod segment_postings;

pub use self::segment_postings::SegmentPostings;

use crate::DocId;

/// One entry of a postings list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Posting {
    /// Document containing the term.
    pub doc: DocId,
    /// Number of occurrences of the term within the document.
    pub term_freq: u32,
}
