//! Canonical phone mask `+7 DDD DDD-DD-DD`.

/// Number of subscriber digits the mask holds.
pub const SUBSCRIBER_DIGITS: usize = 10;

/// Digit groups after the `+7` country prefix, with the separator placed
/// before each group.
const GROUPS: [(char, usize); 4] = [(' ', 3), (' ', 3), ('-', 2), ('-', 2)];

/// **MASK PHONE**
///
/// Keeps digits only, drops a leading `7`/`8` trunk digit and renders what is
/// left into the mask. Separators are only written in front of a group that
/// has digits, so a partial number never ends with a dangling separator.
/// A value without any digit masks to the empty string.
pub fn mask_phone(value: &str) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let subscriber = match digits.first() {
        Some('7') | Some('8') => &digits[1..],
        _ => &digits[..],
    };
    let subscriber = &subscriber[..subscriber.len().min(SUBSCRIBER_DIGITS)];

    let mut out = String::from("+7");
    let mut rest = subscriber;
    for (separator, width) in GROUPS {
        if rest.is_empty() {
            break;
        }
        let take = width.min(rest.len());
        out.push(separator);
        out.extend(&rest[..take]);
        rest = &rest[take..];
    }
    out
}
