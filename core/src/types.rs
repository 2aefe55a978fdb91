//! # TGFORM TYPE DEFINITIONS
//!
//! **CRITICAL**: Field specifications, error kinds and per-field verdicts.
//! **MANDATE**: Field specs are immutable once a form variant is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// **SHAPE PATTERN FAMILIES** - Subkind of a pattern mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    NameSurname,
    City,
    Phone,
    Email,
    Feedback,
}

/// **ERROR KIND**
///
/// Declaration order is check precedence: the derived `Ord` sorts kinds the
/// way the validator runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    InvalidDate,
    TooShort,
    TooLong,
    CapsLockSuspected,
    MisplacedHyphen,
    PatternMismatch(PatternKind),
}

impl ErrorKind {
    /// Fallback message used when a field spec carries no message for the kind.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Required => "Пожалуйста, заполните поле",
            ErrorKind::InvalidDate => "Укажите дату в формате ДД.ММ.ГГГГ",
            ErrorKind::TooShort => "Введите не менее 2 символов",
            ErrorKind::TooLong => "Допускается ввод не более 100 символов",
            ErrorKind::CapsLockSuspected => "Убедитесь, что у Вас выключен CAPS LOCK",
            ErrorKind::MisplacedHyphen => "Убедитесь, что дефис находится в нужном месте",
            ErrorKind::PatternMismatch(PatternKind::NameSurname) => {
                "Доступно использование только кириллицы, латиницы и \"-\""
            }
            ErrorKind::PatternMismatch(PatternKind::City) => {
                "Доступно использование только кириллицы, латиницы, пробела и \"-\""
            }
            ErrorKind::PatternMismatch(PatternKind::Phone) => {
                "Укажите номер телефона в формате +7 XXX XXX-XX-XX"
            }
            ErrorKind::PatternMismatch(PatternKind::Email) => {
                "Неверный формат адреса email. Используйте только латиницу, \"-\", \"@\" и \"_\""
            }
            ErrorKind::PatternMismatch(PatternKind::Feedback) => {
                "Сообщение содержит недопустимые символы"
            }
        }
    }
}

/// **FIELD KIND** - Selects kind-specific normalization and checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    /// Strict `DD.MM.YYYY` calendar date.
    Date,
    /// Re-rendered to the canonical `+7 DDD DDD-DD-DD` mask.
    Phone,
}

/// **CHARSET FILTERS** - Characters stripped from a value while typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharsetFilter {
    /// Keeps Cyrillic and Latin letters and hyphens.
    Letters,
    /// Same as `Letters`, plus spaces.
    LettersAndSpaces,
    /// Keeps digits and dots.
    DateChars,
    /// Keeps ASCII letters, digits and `_ . @ -`.
    EmailChars,
}

/// **FIELD SPECIFICATION**
///
/// **PURPOSE**: Declares how one named control is normalized and validated.
/// **GUARANTEE**: Built once per form variant and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// **FIELD NAME** - Unique key, also the payload key
    pub name: String,

    pub kind: FieldKind,

    /// **REQUIRED** - Empty optional fields are valid and skip every check
    pub required: bool,

    pub charset_filter: Option<CharsetFilter>,

    pub capitalize: bool,

    pub min_length: Option<usize>,

    pub max_length: Option<usize>,

    /// **CAPS LOCK GUARD** - Reject runs of uppercase Cyrillic letters
    pub caps_lock_guard: bool,

    /// **HYPHEN GUARD** - Reject hyphens next to spaces or at the edges
    pub hyphen_guard: bool,

    pub pattern: Option<PatternKind>,

    /// **LOCALIZED MESSAGES** - Overrides for `ErrorKind::default_message`
    pub error_messages: BTreeMap<ErrorKind, String>,
}

impl FieldSpec {
    /// **CONSTRUCTOR** - Required plain text field with no checks
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            required: true,
            charset_filter: None,
            capitalize: false,
            min_length: None,
            max_length: None,
            caps_lock_guard: false,
            hyphen_guard: false,
            pattern: None,
            error_messages: BTreeMap::new(),
        }
    }

    /// **DATE CONSTRUCTOR**
    pub fn date(name: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Date,
            charset_filter: Some(CharsetFilter::DateChars),
            ..Self::text(name)
        }
    }

    /// **PHONE CONSTRUCTOR** - Masked and shape-checked
    pub fn phone(name: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Phone,
            pattern: Some(PatternKind::Phone),
            ..Self::text(name)
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn filter(mut self, filter: CharsetFilter) -> Self {
        self.charset_filter = Some(filter);
        self
    }

    pub fn capitalized(mut self) -> Self {
        self.capitalize = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn guard_caps_lock(mut self) -> Self {
        self.caps_lock_guard = true;
        self
    }

    pub fn guard_hyphens(mut self) -> Self {
        self.hyphen_guard = true;
        self
    }

    pub fn pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn message(mut self, kind: ErrorKind, text: impl Into<String>) -> Self {
        self.error_messages.insert(kind, text.into());
        self
    }

    /// **MESSAGE LOOKUP** - Localized text for `kind`, falling back to the default
    pub fn message_for(&self, kind: ErrorKind) -> &str {
        self.error_messages
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_message())
    }

    /// Constraints the bound control declares natively.
    pub fn native_constraints(&self) -> NativeConstraints {
        NativeConstraints {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }
}

/// **NATIVE CONSTRAINTS**
///
/// Mirrors the `required` / `minlength` / `maxlength` attributes of a bound
/// control. Length constraints do not apply to an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NativeConstraints {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl NativeConstraints {
    pub fn check(&self, value: &str) -> bool {
        if value.is_empty() {
            return !self.required;
        }
        let len = value.chars().count();
        if self.min_length.is_some_and(|min| len < min) {
            return false;
        }
        !self.max_length.is_some_and(|max| len > max)
    }
}

/// **FIELD VERDICT**
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Valid,
    /// Failing kinds in check precedence order, never empty.
    Invalid(Vec<ErrorKind>),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn errors(&self) -> &[ErrorKind] {
        match self {
            Verdict::Valid => &[],
            Verdict::Invalid(kinds) => kinds,
        }
    }
}

/// **FIELD STATE** - Current bound value and latest verdict of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub raw_value: String,
    pub verdict: Verdict,
    /// Result of the bound control's native constraint check.
    pub native_valid: bool,
}

impl FieldState {
    /// Empty field, judged the way an untouched control would be.
    pub fn empty(spec: &FieldSpec) -> Self {
        let verdict = if spec.required {
            Verdict::Invalid(vec![ErrorKind::Required])
        } else {
            Verdict::Valid
        };
        Self {
            raw_value: String::new(),
            verdict,
            native_valid: spec.native_constraints().check(""),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.native_valid && self.verdict.is_valid()
    }
}
