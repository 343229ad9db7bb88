//! Re-exports of std values and the bit level channel interfaces the codec works on.
pub use std::io::{Error, ErrorKind, Read, Seek, SeekFrom, Write};

use crate::decoding::errors::GetBitsError;

/// A source of bits, consumed most significant bit first.
pub trait BitRead {
    /// Read `num_bits` bits and return them in the low bits of the result.
    ///
    /// Returns `Ok(None)` when the source cannot serve all requested bits anymore.
    /// A partial read at the end of the source is reported as end of input too.
    fn read_bits(&mut self, num_bits: u8) -> Result<Option<u32>, GetBitsError>;

    /// Number of bits handed out since creation or the last rewind.
    fn bits_read(&self) -> u64;
}

/// A [`BitRead`] that can start over from the beginning of its input.
pub trait Rewind: BitRead {
    fn rewind(&mut self) -> Result<(), GetBitsError>;
}

/// A sink of bits, filled most significant bit first.
pub trait BitWrite {
    /// Write the low `num_bits` bits of `value`, starting with the most significant one.
    fn write_bits(&mut self, num_bits: u8, value: u32) -> Result<(), Error>;

    /// Number of bits written so far, without padding.
    fn bits_written(&self) -> u64;

    /// Pad the last partial byte with zero bits and flush everything to the underlying sink.
    fn close(&mut self) -> Result<(), Error>;
}

impl<T: BitRead + ?Sized> BitRead for &mut T {
    fn read_bits(&mut self, num_bits: u8) -> Result<Option<u32>, GetBitsError> {
        (**self).read_bits(num_bits)
    }

    fn bits_read(&self) -> u64 {
        (**self).bits_read()
    }
}

impl<T: Rewind + ?Sized> Rewind for &mut T {
    fn rewind(&mut self) -> Result<(), GetBitsError> {
        (**self).rewind()
    }
}

impl<T: BitWrite + ?Sized> BitWrite for &mut T {
    fn write_bits(&mut self, num_bits: u8, value: u32) -> Result<(), Error> {
        (**self).write_bits(num_bits, value)
    }

    fn bits_written(&self) -> u64 {
        (**self).bits_written()
    }

    fn close(&mut self) -> Result<(), Error> {
        (**self).close()
    }
}
