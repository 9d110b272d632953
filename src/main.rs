use std::env::args_os;
use std::process::ExitCode;

use huffman_codes::{calculate_huffman_codes, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match calculate_huffman_codes(&arguments) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Calculation failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
