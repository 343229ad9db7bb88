//! Modules used for compressing/encoding data into the tree header format.
pub mod bit_writer;
pub mod frame_compressor;
pub mod frequency;

pub use frame_compressor::*;
