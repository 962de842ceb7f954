use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category markers used when matching on codec failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecErrorKind {
    /// Decode needed more bytes than remained.
    InsufficientBytes,
    /// Offset pointed past the end of the buffer.
    InvalidOffset,
    /// Encode input fell outside a primitive's numeric domain.
    OutOfRange,
    /// Bytes or input did not follow the primitive's format.
    InvalidFormat,
    /// Sequence length did not match the declared count.
    LengthMismatch,
    /// Set encode input contained a structural duplicate.
    DuplicateElement,
    /// Decoded set payload contained a structural duplicate.
    DecodedDuplicateElement,
    /// Codec construction parameters were rejected.
    InvalidConfig,
    /// Bytes remained after a whole-buffer decode.
    TrailingBytes,
    /// Generic encode failure.
    Encode,
}

impl fmt::Display for CodecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecErrorKind::InsufficientBytes => write!(f, "insufficient bytes"),
            CodecErrorKind::InvalidOffset => write!(f, "invalid offset"),
            CodecErrorKind::OutOfRange => write!(f, "out of range"),
            CodecErrorKind::InvalidFormat => write!(f, "invalid format"),
            CodecErrorKind::LengthMismatch => write!(f, "length mismatch"),
            CodecErrorKind::DuplicateElement => write!(f, "duplicate element"),
            CodecErrorKind::DecodedDuplicateElement => write!(f, "decoded duplicate element"),
            CodecErrorKind::InvalidConfig => write!(f, "invalid config"),
            CodecErrorKind::TrailingBytes => write!(f, "trailing bytes"),
            CodecErrorKind::Encode => write!(f, "encode"),
        }
    }
}

/// Error surfaced while constructing, encoding or decoding with a codec.
///
/// Errors are raised where the violation happens and travel through
/// combinators untouched, so a failing nested field reports its own variant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CodecError {
    /// Decode attempted to read past the end of the buffer.
    #[error("insufficient bytes: need {required} at offset {offset}, {available} available")]
    InsufficientBytes {
        /// Bytes the read required.
        required: usize,
        /// Bytes remaining from `offset`.
        available: usize,
        /// Absolute offset of the read.
        offset: usize,
    },
    /// Decode was started beyond the end of the buffer.
    #[error("invalid offset {offset} for buffer of {len} bytes")]
    InvalidOffset {
        /// Requested offset.
        offset: usize,
        /// Buffer length.
        len: usize,
    },
    /// Numeric input or a decoded count outside the codec's domain.
    #[error("{codec} value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Codec that rejected the value.
        codec: String,
        /// Offending value.
        value: String,
        /// Inclusive lower bound.
        min: String,
        /// Inclusive upper bound.
        max: String,
    },
    /// Input or bytes that do not follow the codec's format.
    #[error("invalid {codec}: {reason}")]
    InvalidFormat {
        /// Codec that rejected the input.
        codec: String,
        /// Description of the violation.
        reason: String,
    },
    /// Sequence length differs from the codec's declared count.
    #[error("{codec} expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Codec that rejected the input.
        codec: String,
        /// Declared count.
        expected: usize,
        /// Supplied count.
        actual: usize,
    },
    /// Set encode input contained two structurally equal elements.
    #[error("set contains duplicate element {element}")]
    DuplicateElement {
        /// Debug rendering of the duplicate.
        element: String,
    },
    /// Decoded set payload contained two structurally equal elements.
    #[error("decoded set contains duplicate element {element}")]
    DecodedDuplicateElement {
        /// Debug rendering of the duplicate.
        element: String,
    },
    /// Codec construction rejected its parameters.
    #[error("invalid codec configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected parameters.
        reason: String,
    },
    /// Whole-buffer decode left bytes unread.
    #[error("trailing bytes: consumed {consumed}, {remaining} remaining")]
    TrailingBytes {
        /// Bytes consumed by the decode.
        consumed: usize,
        /// Bytes left over.
        remaining: usize,
    },
    /// Generic encode failure.
    #[error("encode failed: {reason}")]
    Encode {
        /// Description of the failure.
        reason: String,
    },
}

impl CodecError {
    /// Creates an insufficient-bytes error helper.
    pub fn insufficient_bytes(required: usize, available: usize, offset: usize) -> Self {
        CodecError::InsufficientBytes {
            required,
            available,
            offset,
        }
    }

    /// Creates an invalid-offset error helper.
    pub fn invalid_offset(offset: usize, len: usize) -> Self {
        CodecError::InvalidOffset { offset, len }
    }

    /// Creates an out-of-range error helper.
    pub fn out_of_range(
        codec: &str,
        value: impl fmt::Display,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        CodecError::OutOfRange {
            codec: codec.to_owned(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Creates an invalid-format error helper.
    pub fn invalid_format(codec: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidFormat {
            codec: codec.to_owned(),
            reason: reason.into(),
        }
    }

    /// Creates a length-mismatch error helper.
    pub fn length_mismatch(codec: &str, expected: usize, actual: usize) -> Self {
        CodecError::LengthMismatch {
            codec: codec.to_owned(),
            expected,
            actual,
        }
    }

    /// Creates a duplicate-element error for set encoding.
    pub fn duplicate_element(element: impl fmt::Debug) -> Self {
        CodecError::DuplicateElement {
            element: format!("{:?}", element),
        }
    }

    /// Creates a duplicate-element error for set decoding.
    pub fn decoded_duplicate_element(element: impl fmt::Debug) -> Self {
        CodecError::DecodedDuplicateElement {
            element: format!("{:?}", element),
        }
    }

    /// Creates an invalid-configuration error helper.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        CodecError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a trailing-bytes error helper.
    pub fn trailing_bytes(consumed: usize, remaining: usize) -> Self {
        CodecError::TrailingBytes {
            consumed,
            remaining,
        }
    }

    /// Creates a generic encode error helper.
    pub fn encode(reason: impl Into<String>) -> Self {
        CodecError::Encode {
            reason: reason.into(),
        }
    }

    /// Returns the category associated with the error.
    pub fn kind(&self) -> CodecErrorKind {
        match self {
            CodecError::InsufficientBytes { .. } => CodecErrorKind::InsufficientBytes,
            CodecError::InvalidOffset { .. } => CodecErrorKind::InvalidOffset,
            CodecError::OutOfRange { .. } => CodecErrorKind::OutOfRange,
            CodecError::InvalidFormat { .. } => CodecErrorKind::InvalidFormat,
            CodecError::LengthMismatch { .. } => CodecErrorKind::LengthMismatch,
            CodecError::DuplicateElement { .. } => CodecErrorKind::DuplicateElement,
            CodecError::DecodedDuplicateElement { .. } => {
                CodecErrorKind::DecodedDuplicateElement
            }
            CodecError::InvalidConfig { .. } => CodecErrorKind::InvalidConfig,
            CodecError::TrailingBytes { .. } => CodecErrorKind::TrailingBytes,
            CodecError::Encode { .. } => CodecErrorKind::Encode,
        }
    }
}

/// Convenient alias for codec results.
pub type CodecResult<T> = core::result::Result<T, CodecError>;
