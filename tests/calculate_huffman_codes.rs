use huffman_codes::huffman::{
    count, encode, entropy, expected_code_length, probabilities, Analysis, CodewordTable,
    HuffmanTree,
};
use huffman_codes::{render_analysis, CLIParser};

const PROGRAM_NAME_ARGUMENT: &str = "test";

const INPUTS: &[&str] = &[
    "a",
    "aaaa",
    "ab",
    "abracadabra",
    "mississippi",
    "she sells sea shells by the sea shore",
    "the quick brown fox jumps over the lazy dog",
    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaabbbbbbbbbbbbbbbbccccccccddddeef",
    "Grüße aus Köln",
];

fn derive_codewords(input: &str) -> CodewordTable {
    let probabilities = probabilities(&count(input)).expect("Input must not be empty");
    let tree = HuffmanTree::new(&probabilities).expect("Tree construction failed");
    CodewordTable::from(&tree)
}

#[test]
fn test_codewords_are_deterministic() {
    for input in INPUTS {
        assert_eq!(
            derive_codewords(input),
            derive_codewords(input),
            "Codewords of '{}' differ between runs",
            input
        );
    }
}

#[test]
fn test_codewords_are_prefix_free_and_complete() {
    for input in INPUTS {
        let codewords = derive_codewords(input);
        assert!(codewords.is_prefix_free(), "Codewords of '{}' are not prefix free", input);
        let expected_symbols: Vec<char> = count(input).symbols().collect();
        let actual_symbols: Vec<char> = codewords.symbols().collect();
        assert_eq!(actual_symbols, expected_symbols, "Symbols of '{}' differ", input);
    }
}

#[test]
fn test_expected_code_length_is_at_least_entropy() {
    for input in INPUTS {
        let entropy = entropy(input).unwrap();
        let expected_code_length = expected_code_length(input).unwrap();
        assert!(
            expected_code_length + 1e-9 >= entropy,
            "Expected code length {} of '{}' is below entropy {}",
            expected_code_length,
            input,
            entropy
        );
        assert!(
            expected_code_length <= entropy + 1.0,
            "Expected code length {} of '{}' exceeds entropy {} by more than a bit",
            expected_code_length,
            input,
            entropy
        );
    }
}

#[test]
fn test_encoded_length_is_sum_of_codeword_lengths() {
    for input in INPUTS {
        let analysis = Analysis::of(input).unwrap();
        let expected: usize = analysis
            .frequencies()
            .iter()
            .map(|(symbol, occurrences)| {
                occurrences * analysis.codewords().get(symbol).map_or(0, |c| c.len())
            })
            .sum();
        let encoded = encode(input, None).unwrap();
        assert_eq!(encoded.len(), expected, "Encoded length of '{}'", input);
    }
}

#[test]
fn test_abracadabra_code_length_distribution() {
    let codewords = derive_codewords("abracadabra");
    let mut lengths: Vec<usize> = codewords.iter().map(|(_, c)| c.len()).collect();
    lengths.sort();
    assert_eq!(lengths, vec![1, 3, 3, 3, 3]);
    assert_eq!(codewords.get('a').map(|c| c.len()), Some(1));
}

#[test]
fn test_single_symbol_input() {
    let codewords = derive_codewords("aaaa");
    assert_eq!(codewords.get('a').map(|c| c.to_string()).as_deref(), Some("0"));
    let encoded = encode("aaaa", None).unwrap();
    assert_eq!(encoded.to_string(), "0000");
    assert_eq!(encoded.to_hex(), "0");
}

#[test]
fn test_render_data_table_tree_metrics_and_encoding() {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        PROGRAM_NAME_ARGUMENT,
        "-d",
        "-t",
        "-m",
        "-e",
        "-x",
        "--columns",
        "o,p,w,l",
        "--delimited",
    ]);
    let rendered = render_analysis("ab", &arguments).expect("Rendering failed");
    let expected = [
        "Chars;n;P;Codewords;Lengths",
        "a;1;1/2;1;1",
        "b;1;1/2;0;1",
        "       •       ",
        "       ║       ",
        "   1═══╩═══0   ",
        "(a,1/2) (b,1/2)",
        "Entropy: 1.0000 bits/symbol",
        "Expected code length: 1.0000 bits/symbol",
        "Redundancy: 0.0000 bits/symbol",
        "10",
        "2",
    ]
    .join("\n");
    assert_eq!(rendered, expected);
}

#[test]
fn test_render_empty_input() {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, "-m", "-t"]);
    let rendered = render_analysis("", &arguments).expect("Rendering failed");
    let expected = [
        "Entropy: 0.0000 bits/symbol",
        "Expected code length: 0.0000 bits/symbol",
        "Redundancy: 0.0000 bits/symbol",
    ]
    .join("\n");
    assert_eq!(rendered, expected);
}
