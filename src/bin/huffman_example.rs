use huffman_codes::huffman::{Analysis, CodingError};

fn main() -> Result<(), CodingError> {
    let input = "abracadabra";

    let analysis = Analysis::of(input)?;
    println!("symbol frequencies");
    for (symbol, occurrences) in analysis.frequencies().iter() {
        println!("{}: {}", symbol, occurrences);
    }

    if let Some(tree) = analysis.tree() {
        println!("huffman tree\n{}", tree);
    }

    println!("codewords");
    for (symbol, codeword) in analysis.codewords().iter() {
        println!("{}: {}", symbol, codeword);
    }

    let encoded = analysis.encode(input)?;
    println!("sequence to encode\n{}", input);
    println!("encoded sequence\n{} (hex {})", encoded, encoded.to_hex());

    println!(
        "entropy {:.4}, expected code length {:.4}, redundancy {:.4}",
        analysis.entropy(),
        analysis.expected_code_length()?,
        analysis.redundancy()?
    );
    Ok(())
}
