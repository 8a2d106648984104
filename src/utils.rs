/// Get the extension of a file name: the text after the last dot, lowercased.
/// A name without a dot has no extension.
pub fn get_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// First `max_chars` characters of `text`, cut on a char boundary
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
