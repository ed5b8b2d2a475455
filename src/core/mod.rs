mod alive_bitset;
mod document;
mod searcher;
mod segment_id;
mod segment_reader;

pub use self::alive_bitset::{AcceptDocs, AliveBitSet};
pub use self::document::{Document, Term};
pub use self::searcher::{DocAddress, Searcher};
pub use self::segment_id::SegmentId;
pub use self::segment_reader::{SegmentReader, SegmentReaderBuilder};
