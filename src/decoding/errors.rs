//! Errors that might occur while decompressing a stream or reading from a bit channel.

use crate::common::{Symbol, HUFF_TREE, PSEUDO_EOF};
use crate::io::Error;

#[derive(Debug)]
#[non_exhaustive]
pub enum GetBitsError {
    TooManyBits { num_requested_bits: u8, limit: u8 },
    Io(Error),
}

impl std::error::Error for GetBitsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GetBitsError::Io(source) => Some(source),
            _ => None,
        }
    }
}

impl core::fmt::Display for GetBitsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GetBitsError::TooManyBits {
                num_requested_bits,
                limit,
            } => write!(
                f,
                "Cant serve this request. The reader is limited to {} bits, requested {} bits",
                limit, num_requested_bits,
            ),
            GetBitsError::Io(e) => write!(f, "Error while reading from the source: {}", e),
        }
    }
}

impl From<Error> for GetBitsError {
    fn from(val: Error) -> Self {
        Self::Io(val)
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum HeaderError {
    Truncated,
    InvalidSymbol { got: u32 },
    DuplicateSymbol { symbol: Symbol },
    TreeTooDeep { limit: usize },
    MissingEndMarker,
    GetBitsError(GetBitsError),
}

impl std::error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeaderError::GetBitsError(source) => Some(source),
            _ => None,
        }
    }
}

impl core::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HeaderError::Truncated => {
                write!(f, "Input ended in the middle of the tree header")
            }
            HeaderError::InvalidSymbol { got } => write!(
                f,
                "Tree header contains leaf value {}, the largest valid symbol is {}",
                got, PSEUDO_EOF,
            ),
            HeaderError::DuplicateSymbol { symbol } => write!(
                f,
                "Tree header contains symbol {} in more than one leaf",
                symbol,
            ),
            HeaderError::TreeTooDeep { limit } => write!(
                f,
                "Tree header nests deeper than {} levels. Stream is probably corrupted",
                limit,
            ),
            HeaderError::MissingEndMarker => write!(
                f,
                "Tree header has no leaf for the end marker {}, the body could never terminate",
                PSEUDO_EOF,
            ),
            HeaderError::GetBitsError(e) => write!(f, "{}", e),
        }
    }
}

impl From<GetBitsError> for HeaderError {
    fn from(val: GetBitsError) -> Self {
        Self::GetBitsError(val)
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum DecompressError {
    MissingMagicNumber,
    BadMagicNumber { got: u32 },
    HeaderError(HeaderError),
    TruncatedStream { decoded: u64 },
    GetBitsError(GetBitsError),
    Io(Error),
}

impl DecompressError {
    /// True if the stream was not recognized as a tree header stream at all.
    pub fn is_format_mismatch(&self) -> bool {
        matches!(
            self,
            DecompressError::MissingMagicNumber | DecompressError::BadMagicNumber { .. }
        )
    }
}

impl std::error::Error for DecompressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecompressError::HeaderError(source) => Some(source),
            DecompressError::GetBitsError(source) => Some(source),
            DecompressError::Io(source) => Some(source),
            _ => None,
        }
    }
}

impl core::fmt::Display for DecompressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecompressError::MissingMagicNumber => {
                write!(f, "Input is too short to contain the magic number")
            }
            DecompressError::BadMagicNumber { got } => write!(
                f,
                "Illegal header: magic number is {:#010x}, should be {:#010x}",
                got, HUFF_TREE,
            ),
            DecompressError::HeaderError(e) => write!(f, "{}", e),
            DecompressError::TruncatedStream { decoded } => write!(
                f,
                "Input ended after {} decoded bytes without reaching the end marker",
                decoded,
            ),
            DecompressError::GetBitsError(e) => write!(f, "{}", e),
            DecompressError::Io(e) => write!(f, "Error while writing decompressed data: {}", e),
        }
    }
}

impl From<HeaderError> for DecompressError {
    fn from(val: HeaderError) -> Self {
        Self::HeaderError(val)
    }
}

impl From<GetBitsError> for DecompressError {
    fn from(val: GetBitsError) -> Self {
        Self::GetBitsError(val)
    }
}

impl From<Error> for DecompressError {
    fn from(val: Error) -> Self {
        Self::Io(val)
    }
}
