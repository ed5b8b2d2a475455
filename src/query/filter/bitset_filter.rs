use std::collections::BTreeMap;
use std::sync::Arc;

use common::BitSet;

use crate::core::{SegmentId, SegmentReader};
use crate::query::{DocFilter, DocIdSet};
use crate::BlockJoinError;

/// Selects explicitly listed documents, one `BitSet` per segment.
///
/// A segment without a registered bitset has no selected documents. Every
/// bitset must be sized to its segment's `max_doc`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitSetFilter {
    bitsets: BTreeMap<SegmentId, Arc<BitSet>>,
}

impl BitSetFilter {
    /// Creates a filter selecting no document.
    pub fn new() -> BitSetFilter {
        BitSetFilter::default()
    }

    /// Registers the documents selected in the given segment.
    pub fn with_segment(mut self, segment_id: SegmentId, bitset: BitSet) -> BitSetFilter {
        self.insert(segment_id, bitset);
        self
    }

    /// Registers the documents selected in the given segment, replacing any
    /// previously registered set.
    pub fn insert(&mut self, segment_id: SegmentId, bitset: BitSet) {
        self.bitsets.insert(segment_id, Arc::new(bitset));
    }
}

impl DocFilter for BitSetFilter {
    fn doc_id_set(&self, reader: &SegmentReader) -> crate::Result<Option<DocIdSet>> {
        let bitset = match self.bitsets.get(&reader.segment_id()) {
            Some(bitset) => bitset,
            None => return Ok(None),
        };
        if bitset.max_value() != reader.max_doc() {
            return Err(BlockJoinError::InvalidConfiguration(format!(
                "bitset of capacity {} registered for segment {:?} of {} documents",
                bitset.max_value(),
                reader.segment_id(),
                reader.max_doc()
            )));
        }
        Ok(Some(DocIdSet::BitSet(Arc::clone(bitset))))
    }
}
