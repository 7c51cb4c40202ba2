/// Replacements applied to every inventory cell. `&` must come first so the
/// entities produced by later entries are not escaped again.
const SPECIAL: [(&str, &str); 8] = [
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\u{2019}", "'"),
    ("\u{2018}", "'"),
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
    ("\u{2013}", "-"),
];

/// Makes spreadsheet text HTML-safe and folds typographic punctuation to ASCII.
pub fn fix_text(text: &str) -> String {
    SPECIAL
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Forces spaces to non-breaking spaces.
pub fn nbsp(text: &str) -> String {
    text.replace(' ', "&nbsp;")
}

/// Splits already-escaped text into display units: single characters, with a
/// whole `&name;` entity kept as one unit.
pub fn display_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let len = if first == '&' {
            match rest.find(';') {
                Some(end) if is_entity_name(&rest[1..end]) => end + 1,
                _ => 1,
            }
        } else {
            first.len_utf8()
        };
        units.push(&rest[..len]);
        rest = &rest[len..];
    }
    units
}

fn is_entity_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
}
