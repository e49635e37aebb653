//! Contains the implementation of the fixed 12 bit code encoder.

use std::io::{Read, Write};

use thiserror::Error;

use crate::{
    dictionary::{byte_code, Dictionary, DictionaryError, Learned},
    io::{CodeWriter, PackedWriter},
    Codeword, Summary,
};

/// The error type for encoding operations.
///
/// Encapsulate [std::io::Error], and dictionary misuse, which would be a bug of the encoder.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// An I/O error happened when reading or writing data.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The dictionary refused a new sequence.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// LZW encoder writing fixed codes of 12 bits.
///
/// The dictionary holds at most 2048 codes. When it is full, the next sequence is not learned
/// and the dictionary starts again from the 256 single bytes.
pub struct FixedEncoder;

impl FixedEncoder {
    /// Compress data with LZW, outputting fixed codes of 12 bits.
    ///
    /// For really small amounts of data, the compressed output might take more space than the
    /// original: each byte alone is worth a code and a half.
    ///
    /// # Arguments
    ///
    /// * `data` - The source data to be compressed. It is read byte per byte, wrapping it
    ///   in a [std::io::BufReader] is a good idea.
    /// * `into` - The output where compressed data should be written.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error].
    ///
    /// # Examples
    /// ```
    /// use lzw12::encoder::{EncodingError, FixedEncoder};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let data = b"aaa";
    ///     let mut output = vec![];
    ///
    ///     let summary = FixedEncoder::encode(&data[..], &mut output)?;
    ///
    ///     assert_eq!(output, [0x0E, 0x11, 0x00]);
    ///     assert_eq!(summary.codewords, 2);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode<R: Read, W: Write>(data: R, into: W) -> Result<Summary, EncodingError> {
        FixedEncoder::inner_encode(data, PackedWriter::new(into))
    }

    /// Compress data with LZW, outputting fixed codes of 12 bits.
    /// Convenient wrapper that creates a [Vec<u8>] under the hood.
    ///
    /// # Arguments
    ///
    /// * `data` - The source data to be compressed.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error].
    ///
    /// # Examples
    /// ```
    /// use lzw12::encoder::{EncodingError, FixedEncoder};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let data = b"ab";
    ///
    ///     let output = FixedEncoder::encode_to_vec(&data[..])?;
    ///
    ///     assert_eq!(output, [0x0E, 0x10, 0xE2]);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode_to_vec<R: Read>(data: R) -> Result<Vec<u8>, EncodingError> {
        let mut output = vec![];
        FixedEncoder::encode(data, &mut output)?;
        Ok(output)
    }

    pub(crate) fn inner_encode<R: Read, C: CodeWriter>(
        data: R,
        code_writer: C,
    ) -> Result<Summary, EncodingError> {
        let mut code_writer = code_writer;
        let mut summary = Summary::default();

        let mut dictionary = Dictionary::new();

        let mut bytes = data.bytes();
        let first = match bytes.next() {
            Some(k) => k?,
            None => {
                // Well, it's an empty stream! Leaving early, nothing to write.
                code_writer.flush()?;
                tracing::debug!("Encoded an empty stream");
                return Ok(summary);
            }
        };

        let mut current_prefix: Vec<u8> = vec![first];
        let mut current_code: Codeword = byte_code(first);

        for k in bytes {
            let k = k?;

            current_prefix.push(k);
            if let Some(code) = dictionary.code_for(&current_prefix) {
                current_code = code;
            } else {
                code_writer.write(current_code)?;
                summary.codewords += 1;

                let candidate = std::mem::replace(&mut current_prefix, vec![k]);
                if let Learned::Reset = dictionary.learn(candidate)? {
                    tracing::trace!(codeword = summary.codewords, "Dictionary reset");
                    summary.resets.push(summary.codewords);
                }
                current_code = byte_code(k);
            }
        }

        code_writer.write(current_code)?;
        summary.codewords += 1;

        code_writer.fill()?;
        code_writer.flush()?;

        tracing::debug!(
            codewords = summary.codewords,
            resets = summary.resets.len(),
            "Encoded stream"
        );

        Ok(summary)
    }
}
