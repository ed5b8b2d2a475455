//! Query Module
//!
//! The query module regroups all of blockjoin's query objects: the
//! [`Query`], [`Weight`] and [`Scorer`] abstractions, a few leaf queries
//! that match parents, the parents filters, and the
//! [`ToChildBlockJoinQuery`].

mod accept_scorer;
mod all_query;
mod bitset;
mod block_join;
mod boost_query;
mod const_score_query;
mod empty_query;
mod explanation;
mod filter;
#[allow(clippy::module_inception)]
mod query;
mod scorer;
mod term_query;
mod weight;

pub use self::accept_scorer::AcceptScorer;
pub use self::all_query::{AllQuery, AllScorer, AllWeight};
pub use self::bitset::BitSetDocSet;
pub use self::block_join::{
    ToChildBlockJoinQuery, ToChildBlockJoinScorer, ToChildBlockJoinWeight, BLOCK_JOIN_RELATIONSHIP,
};
pub use self::boost_query::BoostQuery;
pub use self::const_score_query::{ConstScoreQuery, ConstScorer};
pub use self::empty_query::{EmptyQuery, EmptyWeight};
pub use self::explanation::Explanation;
pub use self::filter::{
    BitSetCachingFilter, BitSetFilter, DocFilter, DocIdSet, FilterEq, TermFilter,
};
pub use self::query::{Query, QueryClone, QueryEq};
pub use self::scorer::{ChildScorer, Scorer};
pub use self::term_query::{TermQuery, TermScorer, TermWeight};
pub use self::weight::Weight;
