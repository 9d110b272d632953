use std::collections::BTreeMap;

use super::Symbol;

/// Occurrences of every distinct symbol of an input, ordered by symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    occurrences: BTreeMap<Symbol, usize>,
}

impl FrequencyTable {
    pub fn get(&self, symbol: Symbol) -> Option<usize> {
        self.occurrences.get(&symbol).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.occurrences
            .iter()
            .map(|(&symbol, &occurrences)| (symbol, occurrences))
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.occurrences.keys().copied()
    }

    /// Length of the counted input.
    pub fn total(&self) -> usize {
        self.occurrences.values().sum()
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    fn increment_symbol(&mut self, symbol: Symbol) {
        *self.occurrences.entry(symbol).or_insert(0) += 1;
    }
}

impl FromIterator<Symbol> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = Symbol>>(symbols: T) -> Self {
        let mut table = FrequencyTable::default();
        for symbol in symbols {
            table.increment_symbol(symbol);
        }
        table
    }
}

pub fn count(input: &str) -> FrequencyTable {
    input.chars().collect()
}
