/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .trim_matches('.')
        .to_string()
}

/// `filename` followed by the names browsers use for duplicates:
/// `name (1).ext`, `name (2).ext`, ...
pub fn numbered_file_names(filename: &str) -> impl Iterator<Item = String> + '_ {
    let (stem, ext) = match filename.rfind('.') {
        Some(idx) if idx > 0 => (&filename[..idx], &filename[idx..]),
        _ => (filename, ""),
    };

    std::iter::once(filename.to_string())
        .chain((1u32..).map(move |n| format!("{} ({}){}", stem, n, ext)))
}
