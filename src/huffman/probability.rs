use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use super::{CodingError, FrequencyTable, Symbol};

/// Exact, always reduced fraction `numerator / denominator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Probability {
    numerator: u64,
    denominator: u64,
}

fn greatest_common_divisor(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Probability {
    /// Returns `None` for a zero denominator.
    pub fn new(numerator: u64, denominator: u64) -> Option<Probability> {
        if denominator == 0 {
            return None;
        }
        let divisor = greatest_common_divisor(numerator, denominator);
        Some(Probability {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Add for Probability {
    type Output = Probability;

    fn add(self, other: Probability) -> Probability {
        let divisor = greatest_common_divisor(self.denominator, other.denominator);
        let denominator = self.denominator / divisor * other.denominator;
        let numerator = self.numerator * (denominator / self.denominator)
            + other.numerator * (denominator / other.denominator);
        let divisor = greatest_common_divisor(numerator, denominator);
        Probability {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }
}

impl Ord for Probability {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.numerator as u128 * other.denominator as u128;
        let right = other.numerator as u128 * self.denominator as u128;
        left.cmp(&right)
    }
}

impl PartialOrd for Probability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Relative frequency of every distinct symbol of an input, ordered by symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProbabilityTable {
    probabilities: BTreeMap<Symbol, Probability>,
}

impl ProbabilityTable {
    pub fn get(&self, symbol: Symbol) -> Option<Probability> {
        self.probabilities.get(&symbol).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Probability)> + '_ {
        self.probabilities
            .iter()
            .map(|(&symbol, &probability)| (symbol, probability))
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities, `None` for an empty table.
    pub fn sum(&self) -> Option<Probability> {
        self.probabilities.values().copied().reduce(|a, b| a + b)
    }
}

impl FromIterator<(Symbol, Probability)> for ProbabilityTable {
    fn from_iter<T: IntoIterator<Item = (Symbol, Probability)>>(iter: T) -> Self {
        ProbabilityTable {
            probabilities: iter.into_iter().collect(),
        }
    }
}

pub fn probabilities(frequencies: &FrequencyTable) -> Result<ProbabilityTable, CodingError> {
    let total = frequencies.total() as u64;
    if total == 0 {
        return Err(CodingError::EmptyFrequencyTable);
    }
    frequencies
        .iter()
        .map(|(symbol, occurrences)| {
            Probability::new(occurrences as u64, total)
                .map(|probability| (symbol, probability))
                .ok_or(CodingError::EmptyFrequencyTable)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{probabilities, Probability};
    use crate::huffman::{count, CodingError, FrequencyTable};

    fn fraction(numerator: u64, denominator: u64) -> Probability {
        Probability::new(numerator, denominator).unwrap()
    }

    #[test]
    fn test_fractions_are_reduced() {
        let probability = fraction(4, 22);
        assert_eq!(probability.numerator(), 2);
        assert_eq!(probability.denominator(), 11);
        assert_eq!(probability, fraction(2, 11));
        assert_eq!(probability.to_string(), "2/11");
        assert_eq!(fraction(5, 5).to_string(), "1");
    }

    #[test]
    fn test_zero_denominator_is_rejected() {
        assert_eq!(Probability::new(1, 0), None);
    }

    #[test]
    fn test_addition_is_exact() {
        assert_eq!(fraction(1, 3) + fraction(1, 6), fraction(1, 2));
        assert_eq!(fraction(2, 11) + fraction(2, 11), fraction(4, 11));
        assert_eq!(fraction(1, 10) + fraction(2, 10) + fraction(7, 10), fraction(1, 1));
    }

    #[test]
    fn test_ordering_compares_values() {
        assert!(fraction(1, 3) < fraction(1, 2));
        assert!(fraction(2, 11) > fraction(1, 11));
        assert_eq!(fraction(2, 4).cmp(&fraction(1, 2)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_probabilities_of_abracadabra() {
        let table = probabilities(&count("abracadabra")).unwrap();
        assert_eq!(table.get('a'), Some(fraction(5, 11)));
        assert_eq!(table.get('b'), Some(fraction(2, 11)));
        assert_eq!(table.get('c'), Some(fraction(1, 11)));
        assert_eq!(table.get('d'), Some(fraction(1, 11)));
        assert_eq!(table.get('r'), Some(fraction(2, 11)));
    }

    #[test]
    fn test_probabilities_sum_to_exactly_one() {
        for input in ["abracadabra", "mississippi", "x", "abcdefghij"] {
            let table = probabilities(&count(input)).unwrap();
            assert_eq!(table.sum(), Some(fraction(1, 1)), "input '{}'", input);
        }
    }

    #[test]
    fn test_probabilities_of_empty_table_fail() {
        let result = probabilities(&FrequencyTable::default());
        assert_eq!(result, Err(CodingError::EmptyFrequencyTable));
    }
}
