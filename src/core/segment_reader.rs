use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{AcceptDocs, AliveBitSet, Document, SegmentId, Term};
use crate::postings::{Posting, SegmentPostings};
use crate::DocId;

/// Entry point to access all of the datastructures of a segment.
///
/// The segment is held in memory: a postings list per term, and an
/// optional set of alive documents.
#[derive(Clone)]
pub struct SegmentReader {
    segment_id: SegmentId,
    max_doc: DocId,
    postings: FxHashMap<Term, Arc<[Posting]>>,
    alive_bitset_opt: Option<Arc<AliveBitSet>>,
}

impl SegmentReader {
    /// Returns a builder laying out documents in doc id order.
    pub fn builder() -> SegmentReaderBuilder {
        SegmentReaderBuilder::default()
    }

    /// Returns the segment id
    pub fn segment_id(&self) -> SegmentId {
        self.segment_id
    }

    /// Returns the highest document id ever attributed in
    /// this segment + 1.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Returns the number of alive documents.
    /// Deleted documents are not counted.
    pub fn num_docs(&self) -> DocId {
        self.max_doc - self.num_deleted_docs()
    }

    /// Returns the number of documents that have been deleted.
    pub fn num_deleted_docs(&self) -> DocId {
        self.alive_bitset_opt
            .as_ref()
            .map(|alive_bitset| alive_bitset.num_deleted() as u32)
            .unwrap_or(0u32)
    }

    /// Returns true if some of the documents of the segment have been deleted.
    pub fn has_deletes(&self) -> bool {
        self.num_deleted_docs() > 0
    }

    /// Returns the bitset representing the alive `DocId`s.
    pub fn alive_bitset(&self) -> Option<&AliveBitSet> {
        self.alive_bitset_opt.as_deref()
    }

    /// Returns the filter a scorer should apply to the documents of this
    /// segment, if any.
    pub fn accept_docs(&self) -> Option<Arc<dyn AcceptDocs>> {
        self.alive_bitset_opt
            .clone()
            .map(|alive_bitset| alive_bitset as Arc<dyn AcceptDocs>)
    }

    /// Returns the number of documents containing the term.
    pub fn doc_freq(&self, term: &Term) -> u32 {
        self.postings
            .get(term)
            .map(|postings| postings.len() as u32)
            .unwrap_or(0u32)
    }

    /// Returns the postings of a term, positioned on their first document.
    ///
    /// Returns `None` if the term does not appear in the segment.
    pub fn read_postings(&self, term: &Term) -> Option<SegmentPostings> {
        self.postings
            .get(term)
            .map(|postings| SegmentPostings::new(Arc::clone(postings)))
    }
}

impl fmt::Debug for SegmentReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentReader")
            .field("segment_id", &self.segment_id)
            .field("max_doc", &self.max_doc)
            .field("num_terms", &self.postings.len())
            .field("num_deleted_docs", &self.num_deleted_docs())
            .finish()
    }
}

/// Lays out documents in a segment.
///
/// Blocks are written with their children first and their parent last,
/// so that the parent closes the block.
#[derive(Default)]
pub struct SegmentReaderBuilder {
    docs: Vec<Document>,
    deleted_docs: Vec<DocId>,
}

impl SegmentReaderBuilder {
    /// Appends a standalone document.
    pub fn add_document(mut self, doc: Document) -> SegmentReaderBuilder {
        self.docs.push(doc);
        self
    }

    /// Appends a block: the children in order, followed by their parent.
    pub fn add_block(mut self, children: Vec<Document>, parent: Document) -> SegmentReaderBuilder {
        self.docs.extend(children);
        self.docs.push(parent);
        self
    }

    /// Marks a document as deleted.
    pub fn delete(mut self, doc: DocId) -> SegmentReaderBuilder {
        self.deleted_docs.push(doc);
        self
    }

    /// Builds the segment.
    pub fn build(self) -> SegmentReader {
        let max_doc = self.docs.len() as DocId;
        let mut postings: FxHashMap<Term, Vec<Posting>> = FxHashMap::default();
        for (doc, document) in self.docs.into_iter().enumerate() {
            let mut term_freqs: FxHashMap<Term, u32> = FxHashMap::default();
            for term in document.terms() {
                *term_freqs.entry(term.clone()).or_insert(0u32) += 1;
            }
            for (term, term_freq) in term_freqs {
                postings.entry(term).or_default().push(Posting {
                    doc: doc as DocId,
                    term_freq,
                });
            }
        }
        let alive_bitset_opt = if self.deleted_docs.is_empty() {
            None
        } else {
            Some(Arc::new(AliveBitSet::from_deleted_docs(
                &self.deleted_docs,
                max_doc,
            )))
        };
        SegmentReader {
            segment_id: SegmentId::generate(),
            max_doc,
            postings: postings
                .into_iter()
                .map(|(term, postings)| (term, Arc::from(postings)))
                .collect(),
            alive_bitset_opt,
        }
    }
}
