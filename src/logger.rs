use crate::huffman::CodewordTable;

#[ctor::ctor]
fn init() {
    // Without a readable log4rs.yaml logging stays disabled.
    let _ = log4rs::init_file("log4rs.yaml", Default::default());
}

pub fn log_codewords(codewords: &CodewordTable) {
    let entries: Vec<String> = codewords
        .iter()
        .map(|(symbol, codeword)| format!("{:?}={}", symbol, codeword))
        .collect();
    log::debug!("Derived {} codewords: {}", entries.len(), entries.join(" "));
}
