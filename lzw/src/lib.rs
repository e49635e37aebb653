//! LZW encoder and decoder with fixed 12 bit codes.
//!
//! This crate provides a [encoder::FixedEncoder] and a [decoder::FixedDecoder] to compress and
//! decompress data with the LZW algorithm. Codes are always written on 12 bits, packed two by two
//! into groups of 3 bytes, most significant bits first.
//!
//! The dictionary starts with the 256 single bytes, then learns one sequence per code written.
//! Once the code 2047 has been assigned, the next learning step clears it back to the 256 single
//! bytes. Encoder and decoder apply that rule at the same point, so no clear code is ever written.
//! The stream has no header either: an empty input compresses to an empty output.
//!
//! It works with any [std::io::Read] and [std::io::Write].
//!
//! # Examples
//!
//! ```
//! use lzw12::{decoder::FixedDecoder, encoder::FixedEncoder};
//!
//! let data = b"abcabcabcabcabcabc";
//! let mut compressed = vec![];
//! let mut decompressed = vec![];
//!
//! FixedEncoder::encode(&data[..], &mut compressed).unwrap();
//! FixedDecoder::decode(&compressed[..], &mut decompressed).unwrap();
//!
//! assert_eq!(decompressed, data);
//! ```

pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod io;

/// A 12 bit code, identifying a byte sequence in the dictionary.
pub type Codeword = u16;

/// Width in bits of every code written to the stream.
pub const CODE_SIZE: u8 = 12;

/// Number of single byte sequences the dictionary starts with.
pub const ALPHABET_SIZE: u16 = 256;

/// First code handed out to a learned sequence.
pub const FIRST_FREE_CODE: Codeword = ALPHABET_SIZE;

/// Last code that can be handed out before the dictionary gets reset.
pub const MAX_CODE: Codeword = 2047;

/// What happened during an encoding or decoding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of codes written when encoding, or read when decoding.
    pub codewords: u64,
    /// For every dictionary reset, the index of the first code of the new epoch.
    ///
    /// The encoder and the decoder of the same stream report the same resets.
    pub resets: Vec<u64>,
}
