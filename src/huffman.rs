use std::fmt::Display;

pub mod code;
pub mod encoder;
pub mod frequency;
pub mod metrics;
pub mod probability;
pub mod tree;

pub use code::{BitString, CodewordTable};
pub use encoder::{encode, HuffmanEncoder};
pub use frequency::{count, FrequencyTable};
pub use probability::{probabilities, Probability, ProbabilityTable};
pub use tree::HuffmanTree;

use crate::logger;

pub type Symbol = char;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingError {
    EmptyProbabilityTable,
    EmptyFrequencyTable,
    UnknownSymbol(Symbol),
}

impl Display for CodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProbabilityTable => {
                write!(f, "Unable to build a Huffman tree from an empty probability table")
            }
            Self::EmptyFrequencyTable => {
                write!(
                    f,
                    "Unable to calculate probabilities of an empty frequency table"
                )
            }
            Self::UnknownSymbol(symbol) => {
                write!(f, "Symbol '{}' has no codeword", symbol)
            }
        }
    }
}

impl std::error::Error for CodingError {}

/// The complete pipeline for one input: counts, probabilities, tree and
/// codewords. An empty input produces empty tables and no tree.
pub struct Analysis {
    frequencies: FrequencyTable,
    probabilities: ProbabilityTable,
    tree: Option<HuffmanTree>,
    codewords: CodewordTable,
}

impl Analysis {
    pub fn of(input: &str) -> Result<Analysis, CodingError> {
        let frequencies = count(input);
        if frequencies.is_empty() {
            return Ok(Analysis {
                frequencies,
                probabilities: ProbabilityTable::default(),
                tree: None,
                codewords: CodewordTable::default(),
            });
        }
        let probabilities = probabilities(&frequencies)?;
        let tree = HuffmanTree::new(&probabilities)?;
        let codewords = CodewordTable::from(&tree);
        logger::log_codewords(&codewords);
        Ok(Analysis {
            frequencies,
            probabilities,
            tree: Some(tree),
            codewords,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn probabilities(&self) -> &ProbabilityTable {
        &self.probabilities
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn codewords(&self) -> &CodewordTable {
        &self.codewords
    }

    pub fn entropy(&self) -> f64 {
        metrics::entropy(&self.probabilities)
    }

    pub fn expected_code_length(&self) -> Result<f64, CodingError> {
        metrics::expected_code_length(&self.probabilities, &self.codewords)
    }

    pub fn redundancy(&self) -> Result<f64, CodingError> {
        metrics::redundancy(&self.probabilities, &self.codewords)
    }

    pub fn encode(&self, input: &str) -> Result<BitString, CodingError> {
        HuffmanEncoder::new(&self.codewords).encode_sequence(input.chars())
    }
}

pub fn entropy(input: &str) -> Result<f64, CodingError> {
    Ok(Analysis::of(input)?.entropy())
}

pub fn expected_code_length(input: &str) -> Result<f64, CodingError> {
    Analysis::of(input)?.expected_code_length()
}

pub fn redundancy(input: &str) -> Result<f64, CodingError> {
    Analysis::of(input)?.redundancy()
}
