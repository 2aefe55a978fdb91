//! Capitalization of names and place names.

/// Hyphen segments that stay lowercase when they open a segment, as in
/// `Ростов-на-Дону`.
pub const LOWERCASE_EXCEPTIONS: &[&str] = &["на"];

/// **CAPITALIZE**
///
/// First pass: split on `-` and uppercase the first letter of each segment
/// unless the segment's first word is a lowercase exception. Second pass:
/// split on spaces and uppercase the first letter of every word.
pub fn capitalize(value: &str) -> String {
    let hyphenated = value
        .split('-')
        .map(|segment| {
            let first_word = segment.split(' ').next().unwrap_or_default();
            if LOWERCASE_EXCEPTIONS.contains(&first_word) {
                segment.to_string()
            } else {
                upper_first(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("-");

    hyphenated
        .split(' ')
        .map(upper_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
