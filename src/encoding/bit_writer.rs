//! Use [BitWriter] to write an arbitrary amount of bits into a [Write].
use crate::io::{BitWrite, Error, Write};

const FLUSH_THRESHOLD: usize = 8 * 1024;

/// An interface for writing an arbitrary number of bits into a sink.
///
/// Bits are collected into bytes most significant bit first. Complete bytes are
/// buffered and handed to the sink in chunks, the last partial byte is padded
/// with zero bits on [BitWriter::close].
pub struct BitWriter<W: Write> {
    drain: W,
    /// Complete bytes that have not been handed to the drain yet
    output: Vec<u8>,
    /// Bits of the current partial byte live in the lowest `bits_in_partial` bits
    partial: u64,
    bits_in_partial: u8,
    /// The number of bits that have been written so far, without padding
    bit_idx: u64,
    closed: bool,
}

impl<W: Write> BitWriter<W> {
    /// Initialize a new writer. Write new bits with `write_bits` and finish the
    /// stream with `close`.
    pub fn new(drain: W) -> Self {
        Self {
            drain,
            output: Vec::with_capacity(FLUSH_THRESHOLD),
            partial: 0,
            bits_in_partial: 0,
            bit_idx: 0,
            closed: false,
        }
    }

    /// Write the lowest `num_bits` of `bits`, most significant of them first.
    ///
    /// At most 32 bits can be written per call, wider writes and writes to a closed
    /// writer are errors.
    pub fn put_bits(&mut self, num_bits: u8, bits: u32) -> Result<(), Error> {
        if num_bits > 32 {
            return Err(Error::new(
                crate::io::ErrorKind::InvalidInput,
                format!("can write at most 32 bits at once, got {}", num_bits),
            ));
        }
        if self.closed {
            return Err(Error::new(
                crate::io::ErrorKind::Other,
                "tried to write bits into a closed writer",
            ));
        }
        if num_bits == 0 {
            return Ok(());
        }

        let mask = (1u64 << num_bits) - 1;
        self.partial = (self.partial << num_bits) | (u64::from(bits) & mask);
        self.bits_in_partial += num_bits;
        self.bit_idx += u64::from(num_bits);

        while self.bits_in_partial >= 8 {
            self.bits_in_partial -= 8;
            self.output.push((self.partial >> self.bits_in_partial) as u8);
        }
        self.partial &= (1u64 << self.bits_in_partial) - 1;

        if self.output.len() >= FLUSH_THRESHOLD {
            self.drain.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Returns true if the bits written so far end on a byte boundary
    pub fn is_byte_aligned(&self) -> bool {
        self.bits_in_partial == 0
    }

    /// Pad, flush and hand back the drain.
    pub fn finish(mut self) -> Result<W, Error> {
        self.close()?;
        Ok(self.drain)
    }

    pub fn get_ref(&self) -> &W {
        &self.drain
    }
}

impl<W: Write> BitWrite for BitWriter<W> {
    fn write_bits(&mut self, num_bits: u8, value: u32) -> Result<(), Error> {
        self.put_bits(num_bits, value)
    }

    fn bits_written(&self) -> u64 {
        self.bit_idx
    }

    /// Closing twice is a no-op.
    fn close(&mut self) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        if self.bits_in_partial > 0 {
            let pad = 8 - self.bits_in_partial;
            self.output.push((self.partial << pad) as u8);
            self.partial = 0;
            self.bits_in_partial = 0;
        }
        self.drain.write_all(&self.output)?;
        self.output.clear();
        self.drain.flush()?;
        self.closed = true;
        Ok(())
    }
}
