use super::{Analysis, BitString, CodewordTable, CodingError, Symbol};

pub struct HuffmanEncoder<'a> {
    codewords: &'a CodewordTable,
}

impl<'a> HuffmanEncoder<'a> {
    pub fn new(codewords: &'a CodewordTable) -> Self {
        HuffmanEncoder { codewords }
    }

    pub fn encode_sequence<I>(&self, sequence: I) -> Result<BitString, CodingError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut encoded = BitString::new();
        for symbol in sequence {
            let codeword = self
                .codewords
                .get(symbol)
                .ok_or(CodingError::UnknownSymbol(symbol))?;
            encoded.append(codeword);
        }
        Ok(encoded)
    }
}

/// Encodes `input` with the given codewords, or with the Huffman code of
/// `input` itself when none are given.
pub fn encode(input: &str, codewords: Option<&CodewordTable>) -> Result<BitString, CodingError> {
    match codewords {
        Some(codewords) => HuffmanEncoder::new(codewords).encode_sequence(input.chars()),
        None => Analysis::of(input)?.encode(input),
    }
}
