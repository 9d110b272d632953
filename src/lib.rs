use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

pub use cli::CLIParser;
pub use error::Error;
use huffman::Analysis;
use report::ReportOptions;

mod cli;
mod error;
pub mod huffman;
mod logger;
pub mod report;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Clone)]
pub struct Arguments {
    input: Option<String>,
    show_encoded: bool,
    show_hex: bool,
    show_tree: bool,
    show_metrics: bool,
    show_data: bool,
    report_options: ReportOptions,
    number_of_threads: usize,
}

/// Everything requested by `arguments` for a single input, one section per
/// line block in the order table, tree, metrics, encoded string.
pub fn render_analysis(input: &str, arguments: &Arguments) -> Result<String> {
    let analysis = Analysis::of(input)?;
    let mut sections = Vec::new();
    if arguments.show_data {
        sections.push(report::render_table(&analysis, &arguments.report_options));
    }
    if arguments.show_tree {
        if let Some(tree) = analysis.tree() {
            sections.push(tree.to_string().trim_end_matches('\n').to_owned());
        }
    }
    if arguments.show_metrics {
        sections.push(report::render_metrics(&analysis)?);
    }
    if arguments.show_encoded || arguments.show_hex {
        let encoded = analysis.encode(input)?;
        if arguments.show_encoded {
            sections.push(encoded.to_string());
        }
        if arguments.show_hex {
            sections.push(encoded.to_hex());
        }
    }
    Ok(sections.join("\n"))
}

/// Renders every line independently on a thread pool, keeping input order.
pub fn render_lines(lines: Vec<String>, arguments: &Arguments) -> Result<Vec<String>> {
    let threadpool = ThreadPool::new(arguments.number_of_threads.max(1));
    let arguments = Arc::new(arguments.clone());
    let (sender, receiver) = mpsc::channel();
    let number_of_lines = lines.len();
    log::info!(
        "Analysing {} lines on {} threads",
        number_of_lines,
        threadpool.max_count()
    );

    for (index, line) in lines.into_iter().enumerate() {
        let sender = sender.clone();
        let arguments = Arc::clone(&arguments);
        threadpool.execute(move || {
            let rendered = render_analysis(&line, &arguments);
            // The receiver only hangs up after an earlier failure.
            let _ = sender.send((index, rendered));
        });
    }
    drop(sender);

    let mut results: Vec<(usize, Result<String>)> = receiver.iter().collect();
    if results.len() != number_of_lines {
        return Err(Error::WorkerDisconnected(number_of_lines - results.len()));
    }
    results.sort_by_key(|&(index, _)| index);
    results.into_iter().map(|(_, rendered)| rendered).collect()
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .map_err(Error::FailedToReadStandardInput)
}

pub fn calculate_huffman_codes(arguments: &Arguments) -> Result<()> {
    let outputs = match &arguments.input {
        Some(input) => vec![render_analysis(input, arguments)?],
        None => {
            let lines = read_lines(io::stdin().lock())?;
            render_lines(lines, arguments)?
        }
    };
    let mut writer = io::stdout().lock();
    for output in outputs {
        writeln!(writer, "{}", output).map_err(Error::FailedToWriteOutput)?;
    }
    Ok(())
}
