use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static SEGMENT_ID_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Identifies a segment for the lifetime of the process.
///
/// Two distinct `SegmentReader`s never share a `SegmentId`, which makes it
/// a valid key for per-segment caches.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u32);

impl SegmentId {
    #[doc(hidden)]
    pub fn generate() -> SegmentId {
        SegmentId(SEGMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seg({:08x})", self.0)
    }
}
