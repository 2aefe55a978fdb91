//! # TGFORM NORMALIZER
//!
//! **PER-KEYSTROKE VALUE TRANSFORM**
//!
//! Steps run in a fixed order:
//!
//! 1. **TRIM** - strip leading whitespace
//! 2. **CHARSET FILTER** - drop characters the field does not accept
//! 3. **PHONE MASK** - re-render phone fields as `+7 DDD DDD-DD-DD`
//! 4. **CAPITALIZE** - uppercase hyphen segments and words
//!
//! **GUARANTEE**: `normalize(&normalize(x, spec), spec) == normalize(x, spec)`.

use crate::types::{CharsetFilter, FieldKind, FieldSpec};
use once_cell::sync::Lazy;
use regex::Regex;

pub mod capitalize;
pub mod phone;

pub use capitalize::{capitalize, LOWERCASE_EXCEPTIONS};
pub use phone::mask_phone;

static NOT_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-zА-Яа-яЁё-]").expect("letters filter pattern is valid"));
static NOT_LETTER_OR_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-zА-Яа-яЁё -]").expect("letters and spaces filter pattern is valid")
});
static NOT_DATE_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.]").expect("date filter pattern is valid"));
static NOT_EMAIL_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.@-]").expect("email filter pattern is valid"));

/// **NORMALIZE** - Apply every transform the spec declares, in order
pub fn normalize(value: &str, spec: &FieldSpec) -> String {
    let mut out = value.trim_start().to_string();

    if let Some(filter) = spec.charset_filter {
        out = filter_charset(&out, filter);
        // Stripping can expose whitespace at the front.
        out = out.trim_start().to_string();
    }

    if spec.kind == FieldKind::Phone {
        out = mask_phone(&out);
    }

    if spec.capitalize {
        out = capitalize(&out);
    }

    out
}

/// Remove every character `filter` disallows.
pub fn filter_charset(value: &str, filter: CharsetFilter) -> String {
    let disallowed: &Regex = match filter {
        CharsetFilter::Letters => &NOT_LETTER,
        CharsetFilter::LettersAndSpaces => &NOT_LETTER_OR_SPACE,
        CharsetFilter::DateChars => &NOT_DATE_CHAR,
        CharsetFilter::EmailChars => &NOT_EMAIL_CHAR,
    };
    disallowed.replace_all(value, "").into_owned()
}
