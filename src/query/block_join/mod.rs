//! Parent-to-child block joins.
//!
//! Documents are laid out in blocks: the children of a parent are indexed
//! right before it, and the parent closes the block. The children of a
//! parent `p` are therefore exactly the documents between the previous
//! parent and `p`, which the parents `BitSet` answers with a single
//! `prev_set_bit` call.

mod query;
mod scorer;

pub use self::query::{ToChildBlockJoinQuery, ToChildBlockJoinWeight};
pub use self::scorer::ToChildBlockJoinScorer;

/// Relationship label of the parent scorer, as exposed by
/// [`ToChildBlockJoinScorer`]'s sub-scorers.
pub const BLOCK_JOIN_RELATIONSHIP: &str = "BLOCK_JOIN";
