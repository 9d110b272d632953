use std::cmp::Ordering;
use std::collections::BTreeMap;

use clap::{builder::PossibleValue, ValueEnum};

use crate::huffman::{Analysis, BitString, Probability, Symbol};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Column {
    Symbol,
    Occurrences,
    Probability,
    Codeword,
    Length,
}

impl ValueEnum for Column {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Symbol,
            Self::Occurrences,
            Self::Probability,
            Self::Codeword,
            Self::Length,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Symbol => Some(PossibleValue::new("symbol").alias("s")),
            Self::Occurrences => Some(PossibleValue::new("occurrences").alias("o")),
            Self::Probability => Some(PossibleValue::new("probability").alias("p")),
            Self::Codeword => Some(PossibleValue::new("codeword").alias("w")),
            Self::Length => Some(PossibleValue::new("length").alias("l")),
        }
    }
}

impl Column {
    pub fn default_header(&self) -> &'static str {
        match self {
            Column::Symbol => "Chars",
            Column::Occurrences => "n",
            Column::Probability => "P",
            Column::Codeword => "Codewords",
            Column::Length => "Lengths",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbabilityFormat {
    Fraction,
    Decimal { precision: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStyle {
    Pretty,
    Delimited,
}

/// Presentation settings of the symbol table, built once per invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub columns: Vec<Column>,
    pub sort_by: Column,
    pub reverse: bool,
    pub probability_format: ProbabilityFormat,
    pub codeword_hex: bool,
    pub headers: BTreeMap<Column, String>,
    pub style: TableStyle,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            columns: vec![Column::Probability],
            sort_by: Column::Symbol,
            reverse: false,
            probability_format: ProbabilityFormat::Fraction,
            codeword_hex: false,
            headers: BTreeMap::new(),
            style: TableStyle::Pretty,
        }
    }
}

impl ReportOptions {
    /// The symbol column followed by the selected columns, without duplicates.
    fn visible_columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::Symbol];
        for &column in &self.columns {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        if columns.len() == 1 {
            columns.push(Column::Probability);
        }
        columns
    }

    fn header(&self, column: Column) -> &str {
        self.headers
            .get(&column)
            .map(String::as_str)
            .unwrap_or_else(|| column.default_header())
    }
}

struct Row<'a> {
    symbol: Symbol,
    occurrences: usize,
    probability: Probability,
    codeword: Option<&'a BitString>,
}

impl Row<'_> {
    fn codeword_length(&self) -> usize {
        self.codeword.map_or(0, BitString::len)
    }

    fn compare(&self, other: &Row, column: Column) -> Ordering {
        match column {
            Column::Symbol => self.symbol.cmp(&other.symbol),
            Column::Occurrences => self.occurrences.cmp(&other.occurrences),
            Column::Probability => self.probability.cmp(&other.probability),
            Column::Codeword => self
                .codeword_length()
                .cmp(&other.codeword_length())
                .then_with(|| self.codeword.cmp(&other.codeword)),
            Column::Length => self.codeword_length().cmp(&other.codeword_length()),
        }
    }

    fn cell(&self, column: Column, options: &ReportOptions) -> String {
        match column {
            Column::Symbol => self.symbol.to_string(),
            Column::Occurrences => self.occurrences.to_string(),
            Column::Probability => match options.probability_format {
                ProbabilityFormat::Fraction => self.probability.to_string(),
                ProbabilityFormat::Decimal { precision } => {
                    format!("{:.*}", precision, self.probability.as_f64())
                }
            },
            Column::Codeword => match self.codeword {
                Some(codeword) if options.codeword_hex => codeword.to_hex(),
                Some(codeword) => codeword.to_string(),
                None => String::new(),
            },
            Column::Length => self.codeword_length().to_string(),
        }
    }
}

fn collect_rows(analysis: &Analysis) -> Vec<Row<'_>> {
    analysis
        .frequencies()
        .iter()
        .filter_map(|(symbol, occurrences)| {
            let probability = analysis.probabilities().get(symbol)?;
            Some(Row {
                symbol,
                occurrences,
                probability,
                codeword: analysis.codewords().get(symbol),
            })
        })
        .collect()
}

fn render_pretty(headers: &[&str], cells: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator: String = widths
        .iter()
        .map(|width| format!("+{}", "-".repeat(width + 2)))
        .chain(std::iter::once("+".to_string()))
        .collect();
    let format_line = |values: &[&str]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(value, &width)| format!("| {:^width$} ", value, width = width))
            .chain(std::iter::once("|".to_string()))
            .collect()
    };

    let mut lines = vec![separator.clone(), format_line(headers), separator.clone()];
    for row in cells {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_line(&values));
    }
    if !cells.is_empty() {
        lines.push(separator);
    }
    lines.join("\n")
}

fn render_delimited(headers: &[&str], cells: &[Vec<String>]) -> String {
    std::iter::once(headers.join(";"))
        .chain(cells.iter().map(|row| row.join(";")))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Renders one row per symbol with the columns selected in `options`.
pub fn render_table(analysis: &Analysis, options: &ReportOptions) -> String {
    let columns = options.visible_columns();
    let mut rows = collect_rows(analysis);
    rows.sort_by(|a, b| {
        let ordering = a.compare(b, options.sort_by);
        if options.reverse {
            ordering.reverse()
        } else {
            ordering
        }
    });

    let headers: Vec<&str> = columns.iter().map(|&column| options.header(column)).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&column| row.cell(column, options))
                .collect()
        })
        .collect();

    match options.style {
        TableStyle::Pretty => render_pretty(&headers, &cells),
        TableStyle::Delimited => render_delimited(&headers, &cells),
    }
}

/// Entropy, expected code length and redundancy, one per line.
pub fn render_metrics(analysis: &Analysis) -> crate::Result<String> {
    let entropy = analysis.entropy();
    let expected_code_length = analysis.expected_code_length()?;
    Ok(format!(
        "Entropy: {:.4} bits/symbol\nExpected code length: {:.4} bits/symbol\nRedundancy: {:.4} bits/symbol",
        entropy,
        expected_code_length,
        expected_code_length - entropy
    ))
}
