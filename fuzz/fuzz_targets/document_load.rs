#![no_main]
use libfuzzer_sys::fuzz_target;
use tagtree::{Document, ParserConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut document = Document::new();
        if document.load_with(s, &ParserConfig::recovering()).is_ok() {
            let printed = document.print();
            let _ = Document::parse(&printed);
        }
    }
});
