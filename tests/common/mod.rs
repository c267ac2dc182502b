use lopdf::{content::Content, Document, Object};

/// Maps a WinAnsi byte back to its character.
fn decode_win_ansi_byte(byte: u8) -> char {
    match byte {
        0x80 => '€',
        0x85 => '…',
        0x91 => '‘',
        0x92 => '’',
        0x93 => '“',
        0x94 => '”',
        0x95 => '•',
        0x96 => '–',
        0x97 => '—',
        other => char::from(other),
    }
}

/// The strings shown by the `Tj` operators of every page, page by page.
pub fn shown_text_per_page(pdf_bytes: &[u8]) -> Vec<Vec<String>> {
    let document = Document::load_mem(pdf_bytes).unwrap();
    document
        .get_pages()
        .values()
        .map(|page_id| {
            let content = Content::decode(&document.get_page_content(*page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|operation| operation.operator == "Tj")
                .filter_map(|operation| match operation.operands.first() {
                    Some(Object::String(bytes, _)) => {
                        Some(bytes.iter().copied().map(decode_win_ansi_byte).collect())
                    }
                    _ => None,
                })
                .collect()
        })
        .collect()
}
