use std::collections::BTreeMap;
use std::fmt;

use super::tree::{HuffmanTree, Visit};
use super::Symbol;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Sequence of bits, used for codewords and encoded inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn append(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    fn with(&self, bit: bool) -> BitString {
        let mut extended = self.clone();
        extended.push(bit);
        extended
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Hexadecimal view for display only. Groups of four bits are taken from
    /// the right end; a shorter leading group becomes a digit of its own, so
    /// leading zero bits are not recoverable.
    pub fn to_hex(&self) -> String {
        let mut digits: Vec<char> = self
            .bits
            .rchunks(4)
            .map(|nibble| {
                let value = nibble
                    .iter()
                    .fold(0, |value, &bit| (value << 1) | usize::from(bit));
                char::from(HEX_DIGITS[value])
            })
            .collect();
        digits.reverse();
        digits.into_iter().collect()
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<T: IntoIterator<Item = bool>>(bits: T) -> Self {
        BitString {
            bits: bits.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codeword of every symbol, ordered by symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodewordTable {
    codewords: BTreeMap<Symbol, BitString>,
}

impl CodewordTable {
    pub fn get(&self, symbol: Symbol) -> Option<&BitString> {
        self.codewords.get(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitString)> + '_ {
        self.codewords
            .iter()
            .map(|(&symbol, codeword)| (symbol, codeword))
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.codewords.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.codewords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codewords.is_empty()
    }

    pub fn is_prefix_free(&self) -> bool {
        self.codewords.iter().all(|(symbol, codeword)| {
            self.codewords
                .iter()
                .filter(|(other_symbol, _)| *other_symbol != symbol)
                .all(|(_, other)| !codeword.is_prefix_of(other))
        })
    }
}

impl FromIterator<(Symbol, BitString)> for CodewordTable {
    fn from_iter<T: IntoIterator<Item = (Symbol, BitString)>>(iter: T) -> Self {
        CodewordTable {
            codewords: iter.into_iter().collect(),
        }
    }
}

// Left branches append a 1, right branches a 0. A tree that is a single
// leaf yields the codeword "0".
impl From<&HuffmanTree> for CodewordTable {
    fn from(tree: &HuffmanTree) -> Self {
        let mut codewords = BTreeMap::new();
        let mut node_index_stack = vec![(tree.root_index(), BitString::new())];
        while let Some((index, path)) = node_index_stack.pop() {
            match tree.visit(index) {
                Visit::Leaf(symbol) => {
                    let codeword = if path.is_empty() { path.with(false) } else { path };
                    codewords.insert(symbol, codeword);
                }
                Visit::Inner { left, right } => {
                    node_index_stack.push((right, path.with(false)));
                    node_index_stack.push((left, path.with(true)));
                }
            }
        }
        CodewordTable { codewords }
    }
}
