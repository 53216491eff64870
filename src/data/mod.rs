//! Data sources other than the record store.

pub mod sample;

pub use sample::*;
