use crate::Type;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MessageError {
    /// A read ran past the end of the buffer.
    #[error("message truncated: read at offset {offset} overruns buffer of {len} bytes")]
    TruncatedMessage { offset: usize, len: usize },

    #[error("label of length {0} exceeds 63 bytes: {1}")]
    NameLengthExceeded(usize, String),

    #[error("encoded name of {0} bytes exceeds 255 bytes")]
    NameTooLong(usize),

    #[error("empty label in name: {0:?}")]
    EmptyLabel(String),

    /// Compression pointers may only reference bytes that precede the name
    /// carrying them.
    #[error("compression pointer at offset {at} targets offset {target}")]
    InvalidPointer { at: usize, target: usize },

    #[error("reserved label type {0:#04x} at offset {1}")]
    UnsupportedLabelType(u8, usize),

    #[error("label is not valid UTF-8: {0}")]
    EncodingError(#[from] std::str::Utf8Error),

    #[error("address record carries {0} bytes of data, expected 4")]
    InvalidAddressLength(usize),

    #[error("record type {0} is not an address record")]
    UnsupportedRecordType(Type),

    #[error("response contains no answer records")]
    NoAnswer,
}
