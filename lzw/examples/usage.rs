use anyhow::Result;
use lzw12::{decoder::FixedDecoder, encoder::FixedEncoder};

const LOREM_IPSUM: &[u8] = include_bytes!("../../test-assets/lorem_ipsum.txt");

fn main() -> Result<()> {
    let mut compressed = vec![];
    let encoded = FixedEncoder::encode(LOREM_IPSUM, &mut compressed)?;

    println!(
        "Compressed {} bytes into {} bytes: {} codes, {} dictionary resets",
        LOREM_IPSUM.len(),
        compressed.len(),
        encoded.codewords,
        encoded.resets.len()
    );

    let mut decompressed = vec![];
    let decoded = FixedDecoder::decode(&compressed[..], &mut decompressed)?;

    assert_eq!(decompressed, LOREM_IPSUM);
    assert_eq!(decoded, encoded);

    Ok(())
}
