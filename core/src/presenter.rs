//! # ERROR PRESENTER
//!
//! Turns a verdict into the invalid flag and error text of one field.

use crate::types::{FieldSpec, Verdict};
use crate::view::FormView;

/// Visible state of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Presentation {
    pub invalid: bool,
    /// Localized messages, newline-joined in check precedence order.
    pub message: String,
}

impl Presentation {
    pub fn valid() -> Self {
        Self::default()
    }
}

/// **PRESENT** - Valid clears the slot, Invalid lists every reported kind
pub fn present(spec: &FieldSpec, verdict: &Verdict) -> Presentation {
    match verdict {
        Verdict::Valid => Presentation::valid(),
        Verdict::Invalid(kinds) => Presentation {
            invalid: true,
            message: kinds
                .iter()
                .map(|kind| spec.message_for(*kind))
                .collect::<Vec<_>>()
                .join("\n"),
        },
    }
}

/// Present `verdict` and push it to the view.
pub fn render<V: FormView>(view: &mut V, spec: &FieldSpec, verdict: &Verdict) -> Presentation {
    let presentation = present(spec, verdict);
    view.show_field(&spec.name, &presentation);
    presentation
}
