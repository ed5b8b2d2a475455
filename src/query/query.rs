use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use downcast_rs::impl_downcast;

use super::Weight;
use crate::core::Searcher;

/// The `Query` trait defines a set of documents and a scoring method
/// for those documents.
///
/// The `Query` trait is in charge of defining :
///
/// - a set of documents
/// - a way to score these documents
///
/// Because our index is actually split into segments, the
/// query does not actually directly creates [`DocSet`](crate::DocSet) object.
/// Instead, the query creates a [`Weight`] object for a given searcher.
///
/// The weight object, in turn, makes it possible to create
/// a scorer for a specific [`SegmentReader`](crate::SegmentReader).
///
/// So to sum it up :
/// - a `Query` is a recipe to define a set of documents as well the way to score them.
/// - a [`Weight`] is this recipe tied to a specific [`Searcher`]. It may for instance
/// hold statistics about the different term of the query. It is created by the query.
/// - a [`Scorer`](crate::query::Scorer) is a cursor over the set of matching documents, for a
/// specific segment. It is created by the [`Weight`].
///
/// Queries have a value identity: two queries describing the same recipe are
/// equal and hash the same, which lets query-result caches recognize them.
/// Implementors get [`QueryEq`] for free by deriving or implementing
/// `PartialEq` and `Hash`.
pub trait Query: QueryClone + QueryEq + Send + Sync + downcast_rs::Downcast + fmt::Debug {
    /// Create the weight associated with a query.
    ///
    /// The weight is not normalized yet. Prefer
    /// [`Searcher::create_weight`] which rewrites and normalizes it.
    ///
    /// See [`Weight`].
    fn weight(&self, searcher: &Searcher) -> crate::Result<Box<dyn Weight>>;

    /// Rewrites the query into a simpler, equivalent form.
    ///
    /// Queries that cannot be simplified return a clone of themselves.
    fn rewrite(&self, _searcher: &Searcher) -> crate::Result<Box<dyn Query>> {
        Ok(self.box_clone())
    }
}

/// Implements `box_clone`.
pub trait QueryClone {
    /// Returns a boxed clone of `self`.
    fn box_clone(&self) -> Box<dyn Query>;
}

impl<T> QueryClone for T
where T: 'static + Query + Clone
{
    fn box_clone(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

/// Equality and hashing across query types.
pub trait QueryEq {
    /// Returns true iff `other` is a query of the same type, equal to `self`.
    fn query_eq(&self, other: &dyn Query) -> bool;

    /// Feeds the identity of the query to `state`.
    fn query_hash(&self, state: &mut dyn Hasher);
}

impl<T> QueryEq for T
where T: 'static + Query + PartialEq + Hash
{
    fn query_eq(&self, other: &dyn Query) -> bool {
        other
            .downcast_ref::<T>()
            .map_or(false, |other_query| self == other_query)
    }

    fn query_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.as_ref().box_clone()
    }
}

impl PartialEq for Box<dyn Query> {
    fn eq(&self, other: &Box<dyn Query>) -> bool {
        self.as_ref().query_eq(other.as_ref())
    }
}

impl Eq for Box<dyn Query> {}

impl Hash for Box<dyn Query> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_ref().query_hash(state);
    }
}

impl_downcast!(Query);
