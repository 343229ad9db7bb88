//! Structures and utilities used for decoding tree header streams

pub mod bit_reader;
pub mod errors;
pub mod frame_decoder;

pub use frame_decoder::*;
