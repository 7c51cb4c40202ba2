use std::path::{Path, PathBuf};

/// Orders documents for double-sided printing: a blank page follows every
/// document with an odd page count so the next one starts on a fresh sheet.
/// Documents whose page count is unknown are padded as if odd.
pub fn pad_for_duplex(documents: &[(PathBuf, Option<u32>)], blank: &Path) -> Vec<PathBuf> {
    let mut padded = Vec::with_capacity(documents.len() * 2);
    for (document, pages) in documents {
        padded.push(document.clone());
        let pages = pages.unwrap_or_else(|| {
            tracing::warn!(
                "Cannot determine number of pages for {}, assuming odd number",
                document.display()
            );
            1
        });
        if pages % 2 == 1 {
            padded.push(blank.to_path_buf());
        }
    }
    padded
}

/// Single empty page the duplex merge pads with.
pub const BLANK_PAGE_HTML: &str = r#"<html lang="en"><head><style>
@page {
    size: letter portrait;
    margin: 0.25in;
}
</style></head></html>"#;
