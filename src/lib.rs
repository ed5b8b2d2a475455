#![warn(missing_docs)]
#![allow(clippy::len_without_is_empty)]

//! # `blockjoin`
//!
//! Parent-to-child block joins for segmented search indexes.
//!
//! Documents are indexed in *blocks*: the children of a parent are
//! written right before it, and the parent closes the block. Given a
//! query that matches parents, a [`ToChildBlockJoinQuery`](query::ToChildBlockJoinQuery)
//! returns the children nested under every matching parent, optionally
//! propagating the parent's score to each child.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use blockjoin::query::{BitSetCachingFilter, TermFilter, TermQuery, ToChildBlockJoinQuery};
//! use blockjoin::{DocSet, Document, Searcher, SegmentReader, Term, TERMINATED};
//!
//! # fn main() -> blockjoin::Result<()> {
//! let segment = SegmentReader::builder()
//!     .add_block(
//!         vec![Document::from_terms([("skill", "rust")])],
//!         Document::from_terms([("type", "resume"), ("country", "fr")]),
//!     )
//!     .build();
//! let searcher = Searcher::new(vec![segment]);
//!
//! let parents = Arc::new(BitSetCachingFilter::new(Arc::new(TermFilter::new(Term::new(
//!     "type", "resume",
//! )))));
//! let query = ToChildBlockJoinQuery::new(
//!     Box::new(TermQuery::new(Term::new("country", "fr"))),
//!     parents,
//!     true,
//! );
//! let weight = searcher.create_weight(&query)?;
//! let reader = searcher.segment_reader(0);
//! let mut scorer = weight
//!     .scorer(reader, reader.accept_docs())?
//!     .expect("the parent query matches");
//! assert_eq!(scorer.doc(), 0);
//! assert_eq!(scorer.advance()?, TERMINATED);
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

mod core;
mod docset;
pub mod error;
pub mod postings;
pub mod query;

pub use common::BitSet;

pub use self::core::{
    AcceptDocs, AliveBitSet, DocAddress, Document, Searcher, SegmentId, SegmentReader,
    SegmentReaderBuilder, Term,
};
pub use self::docset::{DocSet, TERMINATED};
pub use crate::error::BlockJoinError;

/// `blockjoin` result type.
///
/// Within `blockjoin`, please avoid importing `Result` using `use crate::Result`
/// and instead, refer to this as `crate::Result<T>`.
pub type Result<T> = std::result::Result<T, BlockJoinError>;

/// A `u32` identifying a document within a segment.
/// Documents have their `DocId` assigned incrementally,
/// as they are added in the segment.
///
/// At most, a segment can contain 2^31 documents.
pub type DocId = u32;

/// A f32 that represents the relevance of the document to the query
pub type Score = f32;

/// A `u32` identifying a segment within a `Searcher`.
pub type SegmentOrdinal = u32;
