//! # TGFORM VALIDATION MODULE
//!
//! **RULE SETS WITH TRAIT-BASED CHECKS**
//!
//! Every field owns a `RuleSet`: an ordered list of `Rule` trait objects built
//! from its `FieldSpec`. Rules always run in this precedence:
//!
//! 1. **REQUIRED** - value must not be empty
//! 2. **DATE** - strict `DD.MM.YYYY` calendar date (date fields only)
//! 3. **MIN LENGTH** / 4. **MAX LENGTH** - character counts
//! 5. **CAPS LOCK** - no run of uppercase Cyrillic letters
//! 6. **HYPHEN** - no hyphen next to a space or at either end
//! 7. **PATTERN** - field-specific shape
//!
//! ## USAGE
//!
//! ```rust
//! use tgform::types::{FieldSpec, Verdict};
//! use tgform::validation::{RuleSet, ValidationMode};
//!
//! let rules = RuleSet::for_spec(&FieldSpec::phone("phone_number"));
//! let verdict = rules.evaluate("+7 999 123-45-67", ValidationMode::ShortCircuit);
//! assert_eq!(verdict, Verdict::Valid);
//! ```

use crate::types::{ErrorKind, FieldKind, FieldSpec, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod validators;

pub use validators::{
    CapsLockRule, DateRule, HyphenRule, MaxLengthRule, MinLengthRule, PatternRule, RequiredRule,
};

/// **VALIDATION MODE**
///
/// `ShortCircuit` stops at the first failing rule; `Aggregate` collects every
/// failing rule so the presenter can show all messages at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    ShortCircuit,
    Aggregate,
}

/// **CORE RULE TRAIT**
///
/// **MANDATE**: ALL checks MUST implement this trait.
/// **GUARANTEE**: Rules are pure functions of the value; MUST NOT panic.
pub trait Rule: Debug + Send + Sync {
    /// **ERROR KIND** - Reported when `passes` returns false
    fn error_kind(&self) -> ErrorKind;

    /// **CHECK EXECUTION**
    fn passes(&self, value: &str) -> bool;
}

/// **RULE SET** - Ordered checks for one field
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    required: bool,
}

impl RuleSet {
    /// **CONSTRUCTOR** - Derive the rule list a field spec declares
    pub fn for_spec(spec: &FieldSpec) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        if spec.required {
            rules.push(Box::new(RequiredRule));
        }
        if spec.kind == FieldKind::Date {
            rules.push(Box::new(DateRule));
        }
        if let Some(min) = spec.min_length {
            rules.push(Box::new(MinLengthRule::new(min)));
        }
        if let Some(max) = spec.max_length {
            rules.push(Box::new(MaxLengthRule::new(max)));
        }
        if spec.caps_lock_guard {
            rules.push(Box::new(CapsLockRule));
        }
        if spec.hyphen_guard {
            rules.push(Box::new(HyphenRule));
        }
        if let Some(pattern) = spec.pattern {
            rules.push(Box::new(PatternRule::new(pattern)));
        }

        Self::from_rules(rules, spec.required)
    }

    /// **CUSTOM CONSTRUCTOR** - Rules are re-sorted into precedence order
    pub fn from_rules(mut rules: Vec<Box<dyn Rule>>, required: bool) -> Self {
        rules.sort_by_key(|rule| rule.error_kind());
        Self { rules, required }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// **EVALUATE**
    ///
    /// An empty value on an optional field is valid without running any rule.
    pub fn evaluate(&self, value: &str, mode: ValidationMode) -> Verdict {
        if value.is_empty() && !self.required {
            return Verdict::Valid;
        }

        let mut failures = Vec::new();
        for rule in &self.rules {
            if rule.passes(value) {
                continue;
            }
            failures.push(rule.error_kind());
            if mode == ValidationMode::ShortCircuit {
                break;
            }
        }

        if failures.is_empty() {
            Verdict::Valid
        } else {
            Verdict::Invalid(failures)
        }
    }
}

/// **VALIDATE** - One-shot helper for callers without a cached rule set
pub fn validate(value: &str, spec: &FieldSpec, mode: ValidationMode) -> Verdict {
    RuleSet::for_spec(spec).evaluate(value, mode)
}
