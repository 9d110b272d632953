//! Information theoretic measures of a probability table and its code, in
//! bits per symbol.

use super::{CodewordTable, CodingError, ProbabilityTable};

/// `H = Σ p·log2(1/p)`, zero for an empty table.
pub fn entropy(probabilities: &ProbabilityTable) -> f64 {
    probabilities
        .iter()
        .fold(0.0, |entropy, (_, probability)| {
            let p = probability.as_f64();
            entropy + p * (1.0 / p).log2()
        })
}

/// `L = Σ p·len(codeword)`, zero for an empty table.
pub fn expected_code_length(
    probabilities: &ProbabilityTable,
    codewords: &CodewordTable,
) -> Result<f64, CodingError> {
    probabilities
        .iter()
        .try_fold(0.0, |length, (symbol, probability)| {
            let codeword = codewords
                .get(symbol)
                .ok_or(CodingError::UnknownSymbol(symbol))?;
            Ok(length + probability.as_f64() * codeword.len() as f64)
        })
}

pub fn redundancy(
    probabilities: &ProbabilityTable,
    codewords: &CodewordTable,
) -> Result<f64, CodingError> {
    Ok(expected_code_length(probabilities, codewords)? - entropy(probabilities))
}
