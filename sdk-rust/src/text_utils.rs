use unicode_normalization::UnicodeNormalization;

const ITSON_ID_MAX_LEN: usize = 6;

/// Remove combining diacritical marks (U+0300..=U+036F) after canonical
/// decomposition, so "Contraseña inválida" becomes "Contrasena invalida".
#[must_use]
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Replace `& < > " '` with their entities. Every other character is left
/// untouched, and already escaped input is escaped again.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Split comma separated input into trimmed, non-empty entries.
#[must_use]
pub fn parse_csv(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Keep only ASCII digits, at most six of them.
#[must_use]
pub fn filter_itson_id(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(ITSON_ID_MAX_LEN)
        .collect()
}
