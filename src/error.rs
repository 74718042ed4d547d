
//! Error type definitions and the checked integer casts
//! used throughout this crate.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::error;
use std::fmt;
use std::io::ErrorKind;

pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;

/// A result that may contain a piz error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains a piz error.
pub type UnitResult = Result<()>;


/// An error that may happen while compressing or decompressing a pixel block.
/// Compression itself cannot fail on well-formed input; all variants except
/// `Internal` are produced while decoding untrusted bytes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {

    /// The compressed input ended before a required field could be read.
    TruncatedBlock,

    /// The block header contradicts itself or the input length,
    /// for example a bitmap end beyond the bitmap size
    /// or a negative Huffman payload length.
    CorruptBlock(Cow<'static, str>),

    /// The Huffman table or payload is malformed:
    /// the code lengths do not form a valid prefix code,
    /// a symbol is out of range, or the table is truncated.
    CorruptStream(Cow<'static, str>),

    /// The Huffman payload decoded to a different number of samples
    /// than the block geometry requires.
    LengthMismatch {
        /// The number of samples the block geometry requires.
        expected: usize,

        /// The number of samples the payload would produce.
        actual: usize,
    },

    /// An invariant maintained by the codec itself was violated.
    /// This is unreachable on correct input and indicates a bug.
    Internal(Cow<'static, str>),
}


impl Error {

    /// Create an error of the variant `CorruptBlock`.
    pub(crate) fn corrupt_block(message: impl Into<Cow<'static, str>>) -> Self {
        Error::CorruptBlock(message.into())
    }

    /// Create an error of the variant `CorruptStream`.
    pub(crate) fn corrupt_stream(message: impl Into<Cow<'static, str>>) -> Self {
        Error::CorruptStream(message.into())
    }

    /// Create an error of the variant `Internal`.
    pub(crate) fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Internal(message.into())
    }
}


/// Enable using the `?` operator on `io::Result`.
/// All reads in this crate come from in-memory slices,
/// so running out of bytes is the only error that can actually occur.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        if error.kind() == ErrorKind::UnexpectedEof { Error::TruncatedBlock }
        else { Error::internal(error.to_string()) }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedBlock => write!(formatter, "compressed block is truncated"),
            Error::CorruptBlock(message) => write!(formatter, "corrupt block header: {}", message),
            Error::CorruptStream(message) => write!(formatter, "corrupt huffman stream: {}", message),

            Error::LengthMismatch { expected, actual } => write!(
                formatter, "decoded sample count mismatch: expected {}, found {}",
                expected, actual
            ),

            Error::Internal(message) => write!(formatter, "codec invariant violated: {}", message),
        }
    }
}


/// Returns an `Internal` error when the value does not fit,
/// which cannot happen for values produced by this codec.
pub(crate) fn usize_to_u16(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::internal("value does not fit into u16"))
}

/// Panics in debug mode, silently wraps in release mode.
pub(crate) fn usize_to_i32(value: usize) -> i32 {
    debug_assert!(value <= i32::MAX as usize, "value too large for i32: {}", value);
    value as i32
}

/// Panics in debug mode, silently wraps in release mode.
pub(crate) fn usize_to_u32(value: usize) -> u32 {
    debug_assert!(value <= u32::MAX as usize, "value too large for u32: {}", value);
    value as u32
}

/// Panics in debug mode, silently truncates in release mode.
pub(crate) fn u64_to_usize(value: u64) -> usize {
    debug_assert!(value <= usize::MAX as u64, "value too large for usize: {}", value);
    value as usize
}
