//! # FORM STATE
//!
//! **PURPOSE**: Per-field state of one active form.
//! **GUARANTEE**: Field keys exactly match the active field spec set; there is
//! no way to add or remove a field after construction.

use crate::errors::{error_codes, FormError};
use crate::normalize::normalize;
use crate::types::{FieldSpec, FieldState, Verdict};
use crate::validation::{RuleSet, ValidationMode};
use std::collections::HashSet;

/// One field: its spec, its compiled rules and its current state.
#[derive(Debug)]
pub struct FormEntry {
    pub spec: FieldSpec,
    pub state: FieldState,
    rules: RuleSet,
}

impl FormEntry {
    fn new(spec: FieldSpec) -> Self {
        let rules = RuleSet::for_spec(&spec);
        let state = FieldState::empty(&spec);
        Self { spec, state, rules }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// **VALUE CHANGE** - Normalize, store, then re-judge the field
    ///
    /// Returns true when normalization changed the value that was typed.
    pub fn apply_value(&mut self, raw: &str, mode: ValidationMode) -> bool {
        let normalized = normalize(raw, &self.spec);
        let rewritten = normalized != raw;
        self.state.raw_value = normalized;
        self.revalidate(mode);
        rewritten
    }

    /// Store a value verbatim, without normalizing or re-judging it.
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.state.raw_value = raw.into();
    }

    /// Re-judge the current value. The verdict depends on nothing else.
    pub fn revalidate(&mut self, mode: ValidationMode) -> &Verdict {
        self.state.verdict = self.rules.evaluate(&self.state.raw_value, mode);
        self.state.native_valid = self
            .spec
            .native_constraints()
            .check(&self.state.raw_value);
        &self.state.verdict
    }
}

/// **FORM STATE**
#[derive(Debug)]
pub struct FormState {
    entries: Vec<FormEntry>,
}

impl FormState {
    /// **CONSTRUCTOR** - Rejects duplicate field names
    pub fn new(specs: Vec<FieldSpec>) -> Result<Self, FormError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name.clone()) {
                return Err(FormError::Config {
                    code: error_codes::INVALID_CONFIG.to_string(),
                    message: format!("Duplicate field name '{}'", spec.name),
                });
            }
        }

        Ok(Self {
            entries: specs.into_iter().map(FormEntry::new).collect(),
        })
    }

    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut FormEntry> {
        self.entries.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(FormEntry::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FormEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut FormEntry, FormError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.spec.name == name)
            .ok_or_else(|| FormError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Current bound value of `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|entry| entry.state.raw_value.as_str())
    }

    /// **AGGREGATE VALIDITY** - AND over native checks and verdicts
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|entry| entry.state.is_valid())
    }

    /// Re-judge every field against its current value.
    pub fn revalidate_all(&mut self, mode: ValidationMode) {
        for entry in &mut self.entries {
            entry.revalidate(mode);
        }
    }
}
