use crate::report::{Column, ProbabilityFormat, ReportOptions, TableStyle};
use crate::Arguments;
use clap::{
    arg, builder::RangedU64ValueParser, crate_authors, crate_description, crate_name,
    crate_version, value_parser, Arg, ArgAction, ArgMatches, Command, ValueEnum,
};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct HeaderOverride {
    column: Column,
    name: String,
}

fn parse_header_override(value: &str) -> Result<HeaderOverride, String> {
    let (column, name) = value
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=NAME, got '{}'", value))?;
    let column = Column::from_str(column, true)?;
    Ok(HeaderOverride {
        column,
        name: name.to_owned(),
    })
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_argument(command);
        let command = Self::register_output_arguments(command);
        let command = Self::register_columns_argument(command);
        let command = Self::register_sort_arguments(command);
        let command = Self::register_format_arguments(command);
        Self::register_threads_argument(command)
    }

    fn register_input_argument(command: Command) -> Command {
        command.arg(Self::create_input_argument())
    }

    fn register_output_arguments(command: Command) -> Command {
        command
            .arg(Self::create_flag_argument(
                "show_encoded",
                'e',
                "show-encoded",
                "Show the encoded string",
            ))
            .arg(Self::create_flag_argument(
                "hex",
                'x',
                "hex",
                "Show the encoded string in hexadecimal (display only, leading zeros are lost)",
            ))
            .arg(Self::create_flag_argument(
                "tree",
                't',
                "tree",
                "Show the resulting Huffman tree",
            ))
            .arg(Self::create_flag_argument(
                "metrics",
                'm',
                "metrics",
                "Show entropy, expected code length and redundancy",
            ))
            .arg(Self::create_flag_argument(
                "data",
                'd',
                "data",
                "Show the symbol table",
            ))
    }

    fn register_columns_argument(command: Command) -> Command {
        command.arg(Self::create_columns_argument())
    }

    fn register_sort_arguments(command: Command) -> Command {
        command
            .arg(Self::create_sort_by_argument())
            .arg(Self::create_flag_argument(
                "reverse",
                'r',
                "reverse",
                "Sort the symbol table in descending order",
            ))
    }

    fn register_format_arguments(command: Command) -> Command {
        command
            .arg(Self::create_precision_argument())
            .arg(
                arg!(codeword_hex: --"codeword-hex" "Show codewords in hexadecimal")
                    .action(ArgAction::SetTrue),
            )
            .arg(Self::create_header_argument())
            .arg(
                arg!(delimited: --delimited "Print semicolon delimited rows instead of a table")
                    .action(ArgAction::SetTrue),
            )
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_argument() -> Arg {
        Arg::new("input")
            .help("The string to encode, each line of standard input is encoded if omitted")
            .value_parser(value_parser!(String))
            .required(false)
    }

    fn create_flag_argument(
        id: &'static str,
        short: char,
        long: &'static str,
        help: &'static str,
    ) -> Arg {
        Arg::new(id)
            .short(short)
            .long(long)
            .help(help)
            .action(ArgAction::SetTrue)
    }

    fn create_columns_argument() -> Arg {
        arg!(columns: -c --columns <COLUMNS> "Columns of the symbol table")
            .value_delimiter(',')
            .value_parser(value_parser!(Column))
            .default_value("probability")
    }

    fn create_sort_by_argument() -> Arg {
        arg!(sort_by: -s --"sort-by" <COLUMN> "Column to sort the symbol table by")
            .value_parser(value_parser!(Column))
            .default_value("symbol")
    }

    fn create_precision_argument() -> Arg {
        arg!(precision: -p --precision <DIGITS> "Show probabilities as decimals with the given number of digits")
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_header_argument() -> Arg {
        arg!(header: --header <HEADER> "Custom column header as COLUMN=NAME")
            .required(false)
            .action(ArgAction::Append)
            .value_parser(parse_header_override)
    }

    fn create_threads_argument() -> Arg {
        arg!(-j --threads <THREADS> "Number of threads for standard input lines")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        let show_hex = Self::extract_flag(matches, "hex");
        let show_tree = Self::extract_flag(matches, "tree");
        let show_metrics = Self::extract_flag(matches, "metrics");
        let show_data = Self::extract_flag(matches, "data");
        let nothing_selected = !(show_hex || show_tree || show_metrics || show_data);
        Arguments {
            input: Self::extract_input_argument(matches),
            show_encoded: Self::extract_flag(matches, "show_encoded") || nothing_selected,
            show_hex,
            show_tree,
            show_metrics,
            show_data,
            report_options: Self::extract_report_options(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_input_argument(matches: &ArgMatches) -> Option<String> {
        matches.get_one::<String>("input").cloned()
    }

    fn extract_flag(matches: &ArgMatches, id: &str) -> bool {
        matches.get_flag(id)
    }

    fn extract_report_options(matches: &ArgMatches) -> ReportOptions {
        ReportOptions {
            columns: Self::extract_columns_argument(matches),
            sort_by: Self::extract_sort_by_argument(matches),
            reverse: Self::extract_flag(matches, "reverse"),
            probability_format: Self::extract_probability_format(matches),
            codeword_hex: Self::extract_flag(matches, "codeword_hex"),
            headers: Self::extract_header_arguments(matches),
            style: if Self::extract_flag(matches, "delimited") {
                TableStyle::Delimited
            } else {
                TableStyle::Pretty
            },
        }
    }

    fn extract_columns_argument(matches: &ArgMatches) -> Vec<Column> {
        matches
            .get_many::<Column>("columns")
            .expect("Columns must be provided, but were unset.")
            .copied()
            .collect()
    }

    fn extract_sort_by_argument(matches: &ArgMatches) -> Column {
        matches
            .get_one::<Column>("sort_by")
            .expect("Sort column must be provided, but was unset.")
            .to_owned()
    }

    fn extract_probability_format(matches: &ArgMatches) -> ProbabilityFormat {
        match matches.get_one::<usize>("precision") {
            Some(&precision) => ProbabilityFormat::Decimal { precision },
            None => ProbabilityFormat::Fraction,
        }
    }

    fn extract_header_arguments(matches: &ArgMatches) -> BTreeMap<Column, String> {
        matches
            .get_many::<HeaderOverride>("header")
            .map(|overrides| {
                overrides
                    .map(|header| (header.column, header.name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
