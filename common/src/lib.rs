#![allow(clippy::len_without_is_empty)]

mod bitset;

pub use bitset::*;
