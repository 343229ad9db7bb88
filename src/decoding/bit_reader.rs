use super::errors::GetBitsError;
use crate::io::{BitRead, Read, Rewind, Seek, SeekFrom};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads bits most significant bit first from any [`Read`] implementation.
///
/// Bytes are pulled from the source in chunks, so wrapping the source into a
/// `BufReader` is not necessary.
pub struct BitReader<R: Read> {
    source: R,
    chunk: Vec<u8>,
    chunk_pos: usize,
    /// Holds up to 64 bits, the next bit to hand out is the highest valid one
    bit_container: u64,
    bits_in_container: u8,
    /// counts bits already handed out
    idx: u64,
    source_exhausted: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> BitReader<R> {
        BitReader {
            source,
            chunk: Vec::with_capacity(READ_CHUNK_SIZE),
            chunk_pos: 0,
            bit_container: 0,
            bits_in_container: 0,
            idx: 0,
            source_exhausted: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    fn refill_chunk(&mut self) -> Result<(), GetBitsError> {
        self.chunk.resize(READ_CHUNK_SIZE, 0);
        self.chunk_pos = 0;
        loop {
            match self.source.read(&mut self.chunk) {
                Ok(read) => {
                    self.chunk.truncate(read);
                    if read == 0 {
                        self.source_exhausted = true;
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == crate::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.chunk.clear();
                    return Err(e.into());
                }
            }
        }
    }

    /// Top up the container until it holds at least `n` bits or the source is exhausted
    fn refill_container(&mut self, n: u8) -> Result<(), GetBitsError> {
        while self.bits_in_container < n && !self.source_exhausted {
            if self.chunk_pos == self.chunk.len() {
                self.refill_chunk()?;
                continue;
            }
            let byte = self.chunk[self.chunk_pos];
            self.chunk_pos += 1;
            self.bit_container = (self.bit_container << 8) | u64::from(byte);
            self.bits_in_container += 8;
        }
        Ok(())
    }

    pub fn get_bits(&mut self, n: u8) -> Result<Option<u32>, GetBitsError> {
        if n > 32 {
            return Err(GetBitsError::TooManyBits {
                num_requested_bits: n,
                limit: 32,
            });
        }
        if n == 0 {
            return Ok(Some(0));
        }

        self.refill_container(n)?;
        if self.bits_in_container < n {
            // Not enough left for this request. The leftover bits stay in the container
            // so every further read reports the end of input as well.
            return Ok(None);
        }

        let value = (self.bit_container >> (self.bits_in_container - n)) & ((1 << n) - 1);
        self.bits_in_container -= n;
        self.bit_container &= (1u64 << self.bits_in_container) - 1;
        self.idx += u64::from(n);

        Ok(Some(value as u32))
    }
}

impl<R: Read> BitRead for BitReader<R> {
    fn read_bits(&mut self, num_bits: u8) -> Result<Option<u32>, GetBitsError> {
        self.get_bits(num_bits)
    }

    fn bits_read(&self) -> u64 {
        self.idx
    }
}

impl<R: Read + Seek> Rewind for BitReader<R> {
    /// Seek the source back to its very first byte and forget everything buffered.
    fn rewind(&mut self) -> Result<(), GetBitsError> {
        self.source.seek(SeekFrom::Start(0))?;
        self.chunk.clear();
        self.chunk_pos = 0;
        self.bit_container = 0;
        self.bits_in_container = 0;
        self.idx = 0;
        self.source_exhausted = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BitReader;
    use crate::decoding::errors::GetBitsError;
    use crate::io::{BitRead, Rewind};
    use std::io::Cursor;

    #[test]
    fn reads_msb_first() {
        let data = [0b1011_0010u8, 0b0111_1111];
        let mut br = BitReader::new(&data[..]);
        assert_eq!(br.read_bits(1).unwrap(), Some(1));
        assert_eq!(br.read_bits(3).unwrap(), Some(0b011));
        assert_eq!(br.read_bits(8).unwrap(), Some(0b0010_0111));
        assert_eq!(br.read_bits(4).unwrap(), Some(0b1111));
        assert_eq!(br.bits_read(), 16);
        assert_eq!(br.read_bits(1).unwrap(), None);
    }

    #[test]
    fn reads_across_many_bytes() {
        let data = [0xfa, 0xce, 0x82, 0x01, 0xff];
        let mut br = BitReader::new(&data[..]);
        assert_eq!(br.read_bits(32).unwrap(), Some(0xface_8201));
        assert_eq!(br.read_bits(8).unwrap(), Some(0xff));
    }

    #[test]
    fn zero_is_not_end_of_input() {
        let data = [0u8];
        let mut br = BitReader::new(&data[..]);
        for _ in 0..8 {
            assert_eq!(br.read_bits(1).unwrap(), Some(0));
        }
        assert_eq!(br.read_bits(1).unwrap(), None);
    }

    #[test]
    fn partial_read_at_the_end_is_end_of_input() {
        let data = [0xffu8];
        let mut br = BitReader::new(&data[..]);
        assert_eq!(br.read_bits(5).unwrap(), Some(0b11111));
        assert_eq!(br.read_bits(8).unwrap(), None);
        assert_eq!(br.read_bits(8).unwrap(), None);
        assert_eq!(br.bits_read(), 5);
    }

    #[test]
    fn empty_source() {
        let mut br = BitReader::new(&[0u8; 0][..]);
        assert_eq!(br.read_bits(8).unwrap(), None);
        assert_eq!(br.read_bits(0).unwrap(), Some(0));
    }

    #[test]
    fn refuses_wide_reads() {
        let data = [0u8; 8];
        let mut br = BitReader::new(&data[..]);
        assert!(matches!(
            br.read_bits(33),
            Err(GetBitsError::TooManyBits {
                num_requested_bits: 33,
                limit: 32
            })
        ));
    }

    #[test]
    fn rewind_starts_over() {
        let data = vec![0x12u8, 0x34, 0x56];
        let mut br = BitReader::new(Cursor::new(data));
        assert_eq!(br.read_bits(8).unwrap(), Some(0x12));
        assert_eq!(br.read_bits(12).unwrap(), Some(0x345));
        br.rewind().unwrap();
        assert_eq!(br.bits_read(), 0);
        assert_eq!(br.read_bits(24).unwrap(), Some(0x12_3456));
        assert_eq!(br.read_bits(8).unwrap(), None);
    }

    #[test]
    fn larger_than_one_chunk() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let mut br = BitReader::new(&data[..]);
        for expected in data.iter() {
            assert_eq!(br.read_bits(8).unwrap(), Some(u32::from(*expected)));
        }
        assert_eq!(br.read_bits(8).unwrap(), None);
    }
}
