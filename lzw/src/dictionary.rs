//! The code table shared by the encoder and the decoder.

use indexmap::IndexSet;
use thiserror::Error;

use crate::{Codeword, ALPHABET_SIZE, FIRST_FREE_CODE, MAX_CODE};

/// A violation of the insertion contract of the [Dictionary].
///
/// While encoding, this can only be a bug. While decoding, it means the data was not produced
/// by this crate's encoder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DictionaryError {
    /// Codes are handed out in order, the inserted code must be the next free one.
    #[error("Code {code} inserted out of order, next free code is {expected}.")]
    OutOfOrder { code: Codeword, expected: Codeword },
    /// The sequence is already known for this epoch, under the given code.
    #[error("Sequence already mapped to code {0}.")]
    Duplicate(Codeword),
    /// Every code up to the maximum is taken, the dictionary must be reset.
    #[error("Dictionary is full, no code left above 2047.")]
    Full,
}

/// Outcome of [Dictionary::learn].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Learned {
    /// The sequence got this code.
    Code(Codeword),
    /// No code was left: the sequence was dropped and the dictionary reset.
    Reset,
}

/// Code a single byte gets in a fresh dictionary.
///
/// The byte is read as a signed value and offset by 128, so `0x80` is code 0, `0x00` is code 128
/// and `0x7F` is code 255.
#[inline(always)]
pub const fn byte_code(byte: u8) -> Codeword {
    (byte as i8 as i16 + 128) as Codeword
}

/// Bidirectional mapping between byte sequences and codes.
///
/// Entries live in an insertion ordered hash set: since codes are handed out one after the other
/// from 0, the position of a sequence in the set is its code. Looking up a sequence hashes its
/// content, looking up a code is an index.
pub struct Dictionary {
    entries: IndexSet<Vec<u8>>,
}

impl Dictionary {
    /// A dictionary holding the 256 single byte sequences.
    pub fn new() -> Self {
        const MAX_ENTRY_COUNT: usize = MAX_CODE as usize + 1;
        let mut dictionary = Self {
            entries: IndexSet::with_capacity(MAX_ENTRY_COUNT),
        };
        dictionary.reset_to_byte_alphabet();
        dictionary
    }

    /// Drop every learned sequence, keeping only the single bytes.
    pub fn reset_to_byte_alphabet(&mut self) {
        self.entries.clear();
        // Walking the signed range keeps the position of each byte equal to its code.
        self.entries
            .extend((-128..=127i16).map(|value| vec![value as i8 as u8]));
        debug_assert_eq!(self.entries.len(), ALPHABET_SIZE as usize);
    }

    /// The code of a sequence, if known.
    #[inline(always)]
    pub fn code_for(&self, sequence: &[u8]) -> Option<Codeword> {
        self.entries
            .get_index_of(sequence)
            .map(|index| index as Codeword)
    }

    /// The sequence behind a code, if known.
    #[inline(always)]
    pub fn sequence_for(&self, code: Codeword) -> Option<&[u8]> {
        self.entries.get_index(code as usize).map(Vec::as_slice)
    }

    /// Add a new sequence.
    ///
    /// `code` must be [Dictionary::next_code] and `sequence` must not be known yet. Nothing is
    /// ever overwritten: breaking that contract returns an error and leaves the dictionary as is.
    pub fn insert(&mut self, sequence: Vec<u8>, code: Codeword) -> Result<(), DictionaryError> {
        let expected = self.next_code();
        if expected > MAX_CODE {
            return Err(DictionaryError::Full);
        }
        if code != expected {
            return Err(DictionaryError::OutOfOrder { code, expected });
        }

        let (index, inserted) = self.entries.insert_full(sequence);
        if inserted {
            Ok(())
        } else {
            Err(DictionaryError::Duplicate(index as Codeword))
        }
    }

    /// Give the next free code to `sequence`, or reset if all codes are taken.
    ///
    /// Encoder and decoder both go through here, so they reset at the same step.
    pub fn learn(&mut self, sequence: Vec<u8>) -> Result<Learned, DictionaryError> {
        let code = self.next_code();
        if code <= MAX_CODE {
            self.insert(sequence, code)?;
            Ok(Learned::Code(code))
        } else {
            self.reset_to_byte_alphabet();
            Ok(Learned::Reset)
        }
    }

    /// The code the next learned sequence will get.
    #[inline(always)]
    pub fn next_code(&self) -> Codeword {
        self.entries.len() as Codeword
    }

    /// Number of known sequences, single bytes included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, the single bytes are always there.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether only the single bytes are known.
    pub fn is_fresh(&self) -> bool {
        self.next_code() == FIRST_FREE_CODE
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_codes_are_offset_signed_values() {
        assert_eq!(byte_code(0x80), 0);
        assert_eq!(byte_code(0xFF), 127);
        assert_eq!(byte_code(0x00), 128);
        assert_eq!(byte_code(b'a'), 225);
        assert_eq!(byte_code(0x7F), 255);
    }

    #[test]
    fn fresh_dictionary_holds_every_byte() {
        let dictionary = Dictionary::new();

        assert_eq!(dictionary.len(), 256);
        assert_eq!(dictionary.next_code(), FIRST_FREE_CODE);
        for byte in 0..=255u8 {
            let code = byte_code(byte);
            assert_eq!(dictionary.code_for(&[byte]), Some(code));
            assert_eq!(dictionary.sequence_for(code), Some(&[byte][..]));
        }
    }

    #[test]
    fn unknown_lookups() {
        let dictionary = Dictionary::new();

        assert_eq!(dictionary.code_for(b"ab"), None);
        assert_eq!(dictionary.code_for(b""), None);
        assert_eq!(dictionary.sequence_for(256), None);
        assert_eq!(dictionary.sequence_for(4095), None);
    }

    #[test]
    fn insert_then_lookup_both_ways() -> Result<(), DictionaryError> {
        let mut dictionary = Dictionary::new();

        dictionary.insert(b"ab".to_vec(), 256)?;
        dictionary.insert(b"abc".to_vec(), 257)?;

        assert_eq!(dictionary.code_for(b"ab"), Some(256));
        assert_eq!(dictionary.code_for(b"abc"), Some(257));
        assert_eq!(dictionary.sequence_for(257), Some(&b"abc"[..]));
        assert_eq!(dictionary.next_code(), 258);

        Ok(())
    }

    #[test]
    fn insert_refuses_duplicates() -> Result<(), DictionaryError> {
        let mut dictionary = Dictionary::new();
        dictionary.insert(b"ab".to_vec(), 256)?;

        assert_eq!(
            dictionary.insert(b"ab".to_vec(), 257),
            Err(DictionaryError::Duplicate(256))
        );
        assert_eq!(
            dictionary.insert(b"a".to_vec(), 257),
            Err(DictionaryError::Duplicate(225))
        );
        assert_eq!(dictionary.next_code(), 257);

        Ok(())
    }

    #[test]
    fn insert_refuses_codes_out_of_order() {
        let mut dictionary = Dictionary::new();

        assert_eq!(
            dictionary.insert(b"ab".to_vec(), 300),
            Err(DictionaryError::OutOfOrder {
                code: 300,
                expected: 256
            })
        );
        assert_eq!(
            dictionary.insert(b"ab".to_vec(), 12),
            Err(DictionaryError::OutOfOrder {
                code: 12,
                expected: 256
            })
        );
    }

    #[test]
    fn learn_fills_up_to_max_code_then_resets() -> Result<(), DictionaryError> {
        let mut dictionary = Dictionary::new();

        for code in FIRST_FREE_CODE..=MAX_CODE {
            let sequence = code.to_be_bytes().repeat(2);
            assert_eq!(dictionary.learn(sequence)?, Learned::Code(code));
        }
        assert_eq!(dictionary.len(), 2048);
        assert_eq!(
            dictionary.insert(vec![1, 2, 3], 2048),
            Err(DictionaryError::Full)
        );

        assert_eq!(dictionary.learn(vec![1, 2, 3])?, Learned::Reset);
        assert!(dictionary.is_fresh());
        assert_eq!(dictionary.code_for(&[1, 2, 3]), None);
        assert_eq!(dictionary.code_for(&[0x80]), Some(0));

        Ok(())
    }
}
