//! Contains the implementation of the fixed 12 bit code decoder.

use std::io::{Read, Write};

use thiserror::Error;

use crate::{
    dictionary::{Dictionary, DictionaryError, Learned},
    io::{CodeReader, PackedReader},
    Codeword, Summary, MAX_CODE,
};

/// The error type for decoding operations.
///
/// Apart from [std::io::Error], every variant means the data was not produced by
/// [crate::encoder::FixedEncoder], or got corrupted.
#[derive(Debug, Error)]
pub enum DecodingError {
    /// An I/O error happened when reading or writing data.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The learned sequence could not be added to the dictionary.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    /// The stream must start with a single byte code.
    #[error("First code {0} is not a single byte code.")]
    FirstCode(Codeword),
    /// A code that is neither known nor about to be learned.
    #[error("Unexpected code {code}, next free code is {next_code}.")]
    UnknownCode { code: Codeword, next_code: Codeword },
}

/// LZW decoder reading fixed codes of 12 bits.
///
/// Mirror of [crate::encoder::FixedEncoder]: it learns one sequence per code read after the
/// first one, and resets its dictionary at the same point the encoder did.
pub struct FixedDecoder;

impl FixedDecoder {
    /// Decompress data compressed with [crate::encoder::FixedEncoder].
    ///
    /// # Arguments
    ///
    /// * `data` - The compressed data.
    /// * `into` - The output where decompressed data should be written.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error], or on codes that the encoder would not
    /// have written.
    ///
    /// # Examples
    /// ```
    /// use lzw12::decoder::{DecodingError, FixedDecoder};
    ///
    /// fn main() -> Result<(), DecodingError> {
    ///     let data = [0x0E, 0x11, 0x00];
    ///     let mut output = vec![];
    ///
    ///     FixedDecoder::decode(&data[..], &mut output)?;
    ///
    ///     assert_eq!(output, b"aaa");
    ///     Ok(())
    /// }
    /// ```
    pub fn decode<R: Read, W: Write>(data: R, into: W) -> Result<Summary, DecodingError> {
        FixedDecoder::inner_decode(PackedReader::new(data), into)
    }

    /// Decompress data compressed with [crate::encoder::FixedEncoder].
    /// Convenient wrapper that creates a [Vec<u8>] under the hood.
    ///
    /// # Examples
    /// ```
    /// use lzw12::decoder::{DecodingError, FixedDecoder};
    ///
    /// fn main() -> Result<(), DecodingError> {
    ///     let data = [0x0E, 0x10, 0xE2];
    ///
    ///     let output = FixedDecoder::decode_to_vec(&data[..])?;
    ///
    ///     assert_eq!(output, b"ab");
    ///     Ok(())
    /// }
    /// ```
    pub fn decode_to_vec<R: Read>(data: R) -> Result<Vec<u8>, DecodingError> {
        let mut output = vec![];
        FixedDecoder::decode(data, &mut output)?;
        Ok(output)
    }

    pub(crate) fn inner_decode<C: CodeReader, W: Write>(
        code_reader: C,
        into: W,
    ) -> Result<Summary, DecodingError> {
        let mut code_reader = code_reader;
        let mut into = into;
        let mut summary = Summary::default();

        let mut dictionary = Dictionary::new();

        let mut codes = code_reader.iter();

        let mut previous_entry = match codes.next() {
            Some(code) => {
                let code = code?;
                let entry = dictionary
                    .sequence_for(code)
                    .ok_or(DecodingError::FirstCode(code))?
                    .to_vec();
                into.write_all(&entry)?;
                summary.codewords += 1;
                entry
            }
            None => {
                into.flush()?;
                tracing::debug!("Decoded an empty stream");
                return Ok(summary);
            }
        };

        for code in codes {
            let code = code?;

            let entry = if let Some(sequence) = dictionary.sequence_for(code) {
                sequence.to_vec()
            } else if code == dictionary.next_code() && code <= MAX_CODE {
                // The encoder learned this code right before writing it: it can only be the
                // previous entry followed by its own first byte.
                let mut entry = previous_entry.clone();
                entry.push(previous_entry[0]);
                entry
            } else {
                return Err(DecodingError::UnknownCode {
                    code,
                    next_code: dictionary.next_code(),
                });
            };

            into.write_all(&entry)?;

            let mut learned = previous_entry;
            learned.push(entry[0]);
            if let Learned::Reset = dictionary.learn(learned)? {
                tracing::trace!(codeword = summary.codewords, "Dictionary reset");
                summary.resets.push(summary.codewords);
            }
            summary.codewords += 1;

            previous_entry = entry;
        }

        into.flush()?;

        tracing::debug!(
            codewords = summary.codewords,
            resets = summary.resets.len(),
            "Decoded stream"
        );

        Ok(summary)
    }
}
