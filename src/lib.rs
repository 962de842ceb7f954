//! Composable binary codecs for on-chain account and instruction data.
//!
//! Codecs are immutable values built bottom-up from primitives (integers,
//! booleans, byte blobs, strings, base58 addresses) through combinators
//! (struct, array, vector, set, option). Every codec, however deeply nested,
//! is driven through the same `encode` / `decode` / size facets, and every
//! layout is little-endian.
//!
//! ```
//! use chain_codec::codec::{self, field, Codec};
//!
//! let point = codec::struct_codec((field("x", codec::u32()), field("y", codec::u32())))?;
//! let bytes = point.encode(&(0x1234_5678, 0x9abc_def0))?;
//! assert_eq!(bytes, [0x78, 0x56, 0x34, 0x12, 0xf0, 0xde, 0xbc, 0x9a]);
//! assert_eq!(point.decode(&bytes, 0)?, ((0x1234_5678, 0x9abc_def0), 8));
//! # Ok::<(), chain_codec::CodecError>(())
//! ```
//!
//! Codecs carry no per-call state and are `Send + Sync` whenever their
//! parts are, so a codec built once can be shared freely across threads.

pub mod codec;
pub mod config;

pub use codec::{
    is_fixed_size, is_variable_size, Codec, CodecError, CodecErrorKind, CodecResult,
    FixedSizeCodec, LengthCodec, SizeClass, VariableSizeCodec,
};
pub use config::LengthPrefix;
