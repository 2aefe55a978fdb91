//! # CONCRETE RULE IMPLEMENTATIONS
//!
//! **CRITICAL**: Seven checks implementing the core `Rule` trait.
//! **MANDATE**: Shape checks (date, caps lock, hyphen, pattern) pass on an
//! empty value; emptiness is reported by `RequiredRule` alone.

use super::Rule;
use crate::types::{ErrorKind, PatternKind};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// ================================================================================================
// PATTERNS - Compiled once per process
// ================================================================================================

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("date pattern is valid"));

static CAPS_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[А-ЯЁ]{2,}").expect("caps lock pattern is valid"));

static MISPLACED_HYPHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"( -)|(- )|(^-)|(-$)").expect("hyphen pattern is valid"));

static NAME_SURNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[А-ЯЁA-Z][а-яёa-z]*(?:-[А-ЯЁA-Z][а-яёa-z]*)*$")
        .expect("name pattern is valid")
});

static CITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[А-ЯЁA-Z][а-яёa-z]*(?:(?:-на-|[- ])[А-ЯЁA-Z][а-яёa-z]*)*$")
        .expect("city pattern is valid")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+7 [0-9]{3} [0-9]{3}-[0-9]{2}-[0-9]{2}$").expect("phone pattern is valid")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@(?:[A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("email pattern is valid")
});

static FEEDBACK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"^[А-Яа-яЁёA-Za-z0-9\s.,!?:;"'()«»№%+=/@#&*_–—-]*$"##)
        .expect("feedback pattern is valid")
});

/// Strict `DD.MM.YYYY` check: shape first, then a real calendar date.
pub fn is_strict_date(value: &str) -> bool {
    DATE_SHAPE.is_match(value) && NaiveDate::parse_from_str(value, "%d.%m.%Y").is_ok()
}

// ================================================================================================
// PRESENCE AND LENGTH
// ================================================================================================

/// **REQUIRED RULE** - Value must not be empty
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredRule;

impl Rule for RequiredRule {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Required
    }

    fn passes(&self, value: &str) -> bool {
        !value.is_empty()
    }
}

/// **MIN LENGTH RULE** - Counted in characters, not bytes
#[derive(Debug, Clone, Copy)]
pub struct MinLengthRule {
    min: usize,
}

impl MinLengthRule {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Rule for MinLengthRule {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::TooShort
    }

    fn passes(&self, value: &str) -> bool {
        value.chars().count() >= self.min
    }
}

/// **MAX LENGTH RULE**
#[derive(Debug, Clone, Copy)]
pub struct MaxLengthRule {
    max: usize,
}

impl MaxLengthRule {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Rule for MaxLengthRule {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::TooLong
    }

    fn passes(&self, value: &str) -> bool {
        value.chars().count() <= self.max
    }
}

// ================================================================================================
// SHAPE CHECKS
// ================================================================================================

/// **DATE RULE**
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRule;

impl Rule for DateRule {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::InvalidDate
    }

    fn passes(&self, value: &str) -> bool {
        value.is_empty() || is_strict_date(value)
    }
}

/// **CAPS LOCK RULE** - Two or more consecutive uppercase Cyrillic letters
#[derive(Debug, Clone, Copy, Default)]
pub struct CapsLockRule;

impl Rule for CapsLockRule {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::CapsLockSuspected
    }

    fn passes(&self, value: &str) -> bool {
        !CAPS_RUN.is_match(value)
    }
}

/// **HYPHEN RULE**
#[derive(Debug, Clone, Copy, Default)]
pub struct HyphenRule;

impl Rule for HyphenRule {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::MisplacedHyphen
    }

    fn passes(&self, value: &str) -> bool {
        !MISPLACED_HYPHEN.is_match(value)
    }
}

/// **PATTERN RULE** - Field-specific shape
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    kind: PatternKind,
}

impl PatternRule {
    pub fn new(kind: PatternKind) -> Self {
        Self { kind }
    }

    fn regex(&self) -> &'static Regex {
        match self.kind {
            PatternKind::NameSurname => &NAME_SURNAME,
            PatternKind::City => &CITY,
            PatternKind::Phone => &PHONE,
            PatternKind::Email => &EMAIL,
            PatternKind::Feedback => &FEEDBACK,
        }
    }
}

impl Rule for PatternRule {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::PatternMismatch(self.kind)
    }

    fn passes(&self, value: &str) -> bool {
        value.is_empty() || self.regex().is_match(value)
    }
}

// ================================================================================================
// UNIT TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod length_rule_tests {
        use super::*;

        #[test]
        fn test_required() {
            assert!(!RequiredRule.passes(""));
            assert!(RequiredRule.passes(" "));
        }

        #[test]
        fn test_min_length_counts_chars() {
            let rule = MinLengthRule::new(2);
            assert!(rule.passes("Ян"));
            assert!(!rule.passes("Я"));
            assert!(!rule.passes(""));
        }

        #[test]
        fn test_max_length_boundary() {
            let rule = MaxLengthRule::new(3);
            assert!(rule.passes("Ивн"));
            assert!(!rule.passes("Иван"));
        }
    }

    mod shape_rule_tests {
        use super::*;

        #[test]
        fn test_strict_date() {
            assert!(is_strict_date("01.01.2000"));
            assert!(is_strict_date("29.02.2024"));
            assert!(!is_strict_date("29.02.2023"));
            assert!(!is_strict_date("1.1.2000"));
            assert!(!is_strict_date("01.13.2000"));
            assert!(!is_strict_date("01-01-2000"));
            assert!(!is_strict_date("01.01.20000"));
        }

        #[test]
        fn test_caps_lock() {
            assert!(CapsLockRule.passes("Мария"));
            assert!(CapsLockRule.passes("Мария-Анна"));
            assert!(!CapsLockRule.passes("МАрия"));
            assert!(!CapsLockRule.passes("мариЯЁ"));
            // Latin capitals are not considered.
            assert!(CapsLockRule.passes("MCDONALD"));
        }

        #[test]
        fn test_misplaced_hyphen() {
            assert!(HyphenRule.passes("Анна-Мария"));
            assert!(!HyphenRule.passes("-Анна"));
            assert!(!HyphenRule.passes("Анна-"));
            assert!(!HyphenRule.passes("Анна -Мария"));
            assert!(!HyphenRule.passes("Анна- Мария"));
        }

        #[test]
        fn test_name_pattern() {
            let rule = PatternRule::new(PatternKind::NameSurname);
            assert!(rule.passes("Мария"));
            assert!(rule.passes("Анна-Мария"));
            assert!(rule.passes("John"));
            assert!(!rule.passes("мария"));
            assert!(!rule.passes("Анна Мария"));
            assert!(!rule.passes("Анна-мария"));
        }

        #[test]
        fn test_city_pattern() {
            let rule = PatternRule::new(PatternKind::City);
            assert!(rule.passes("Москва"));
            assert!(rule.passes("Нижний Новгород"));
            assert!(rule.passes("Санкт-Петербург"));
            assert!(rule.passes("Ростов-на-Дону"));
            assert!(!rule.passes("Ростов-На-дону"));
            assert!(!rule.passes("москва"));
        }

        #[test]
        fn test_phone_pattern() {
            let rule = PatternRule::new(PatternKind::Phone);
            assert!(rule.passes("+7 999 123-45-67"));
            assert!(!rule.passes("+7 999 123-45"));
            assert!(!rule.passes("89991234567"));
        }

        #[test]
        fn test_email_pattern() {
            let rule = PatternRule::new(PatternKind::Email);
            assert!(rule.passes("ivan.ivanov@mail.ru"));
            assert!(rule.passes("a_b-c@sub.domain.info"));
            assert!(!rule.passes("ivan@mail"));
            assert!(!rule.passes("иван@mail.ru"));
            assert!(!rule.passes("ivan@mail.travel"));
        }

        #[test]
        fn test_feedback_pattern() {
            let rule = PatternRule::new(PatternKind::Feedback);
            assert!(rule.passes("Здравствуйте! Как подать заявку (№ 5)?\nСпасибо."));
            assert!(!rule.passes("<script>"));
            assert!(!rule.passes("emoji 🙂"));
        }

        #[test]
        fn test_shape_rules_pass_on_empty() {
            assert!(DateRule.passes(""));
            assert!(CapsLockRule.passes(""));
            assert!(HyphenRule.passes(""));
            assert!(PatternRule::new(PatternKind::Phone).passes(""));
        }
    }
}
