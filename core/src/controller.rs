//! # FORM CONTROLLER
//!
//! **ORCHESTRATES ONE FORM FROM LAUNCH TO SUBMISSION**
//!
//! Value change: normalize -> validate -> present -> gate recompute, always
//! completed before the next event is looked at.
//! Submit: lock the affordance -> collect -> deliver -> close or report.

use crate::bridge::{ClickHandler, HostBridge};
use crate::config::{FailurePolicy, FormConfig};
use crate::delivery::{DeliveryOutcome, Payload, SubmitStrategy};
use crate::errors::FormError;
use crate::form::FormState;
use crate::gate::{GateState, SubmitGate};
use crate::params::{apply_prefill, LaunchParams, ParamKey};
use crate::presenter::{self, Presentation};
use crate::types::FieldSpec;
use crate::view::FormView;

/// Outcome of one submit trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Trigger arrived while the gate was closed or a submission was running.
    Ignored,
    Delivered,
    Failed { message: String },
}

pub struct FormController<B, V, S> {
    form: FormState,
    config: FormConfig,
    prefill_anchor: Option<ParamKey>,
    gate: SubmitGate,
    bridge: B,
    view: V,
    strategy: S,
    submitting: bool,
}

impl<B, V, S> FormController<B, V, S>
where
    B: HostBridge,
    V: FormView,
    S: SubmitStrategy,
{
    /// **CONSTRUCTOR** - Captures the host theme for the enabled gate colors
    pub fn new(
        fields: Vec<FieldSpec>,
        config: FormConfig,
        bridge: B,
        view: V,
        strategy: S,
    ) -> Result<Self, FormError> {
        let form = FormState::new(fields)?;
        let gate = SubmitGate::new(bridge.theme(), config.disabled_colors.clone());
        Ok(Self {
            form,
            config,
            prefill_anchor: None,
            gate,
            bridge,
            view,
            strategy,
            submitting: false,
        })
    }

    /// Only prefill when `anchor` is among the launch parameters.
    pub fn with_prefill_anchor(mut self, anchor: Option<ParamKey>) -> Self {
        self.prefill_anchor = anchor;
        self
    }

    /// **INITIALIZE**
    ///
    /// Signals the host, applies prefill and mode copy, judges every field
    /// and shows the submit affordance wired to `on_submit`.
    pub fn initialize(&mut self, params: &LaunchParams, on_submit: ClickHandler) {
        self.bridge.ready();
        self.bridge.expand();

        let filled = apply_prefill(&mut self.form, params, self.prefill_anchor);
        for name in &filled {
            if let Some(value) = self.form.value(name) {
                self.view.set_value(name, value);
            }
        }

        let copy = self.config.copy.select(params.is_update());
        self.view.set_title(&copy.headline);
        self.bridge.set_button_text(&copy.button_label);

        // Untouched fields are judged silently; only prefilled ones are shown.
        self.form.revalidate_all(self.config.mode);
        if self.config.normalize_prefill {
            for name in &filled {
                let raw = self.form.value(name).unwrap_or_default().to_string();
                if let Err(err) = self.process_value(name, &raw) {
                    log::warn!("prefill of '{}' not applied: {}", name, err);
                }
            }
        }
        self.gate.sync(&self.form, &mut self.bridge);

        self.bridge.on_button_click(on_submit);
        self.bridge.show_button();
        log::info!(
            "form initialized with {} fields ({} prefilled, update={})",
            self.form.len(),
            filled.len(),
            params.is_update()
        );
    }

    /// **VALUE CHANGED** - Full per-event pipeline for one field
    pub fn handle_value_change(&mut self, field: &str, raw: &str) -> Result<GateState, FormError> {
        self.process_value(field, raw)?;
        Ok(self.gate.sync(&self.form, &mut self.bridge))
    }

    fn process_value(&mut self, field: &str, raw: &str) -> Result<Presentation, FormError> {
        let mode = self.config.mode;
        let entry = self.form.get_mut(field)?;
        if entry.apply_value(raw, mode) {
            self.view.set_value(field, &entry.state.raw_value);
        }
        log::debug!(
            "field '{}' = {:?} -> {:?}",
            field,
            entry.state.raw_value,
            entry.state.verdict
        );
        Ok(presenter::render(
            &mut self.view,
            &entry.spec,
            &entry.state.verdict,
        ))
    }

    /// **CLEAR FIELD** - Empty a field and show it as valid
    pub fn clear_field(&mut self, field: &str) -> Result<GateState, FormError> {
        let mode = self.config.mode;
        let entry = self.form.get_mut(field)?;
        entry.set_raw("");
        entry.revalidate(mode);
        self.view.set_value(field, "");
        self.view.show_field(field, &Presentation::valid());
        Ok(self.gate.sync(&self.form, &mut self.bridge))
    }

    /// **SUBMIT**
    ///
    /// The affordance is disabled before the first await point, so a second
    /// trigger can never start a parallel delivery.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.submitting || !self.gate.state().is_enabled() {
            log::warn!(
                "submit ignored (submitting={}, gate={:?})",
                self.submitting,
                self.gate.state()
            );
            return SubmitOutcome::Ignored;
        }

        self.gate.lock(&mut self.bridge);
        self.submitting = true;

        let payload = Payload::collect(&self.form);
        log::info!("submitting payload with {} fields", payload.len());
        let outcome = self.strategy.deliver(&mut self.bridge, &payload).await;
        self.submitting = false;

        match outcome {
            DeliveryOutcome::Delivered => SubmitOutcome::Delivered,
            DeliveryOutcome::Failed { message } => {
                self.view.alert(&message);
                if self.config.on_failure == FailurePolicy::Reenable {
                    self.gate.sync(&self.form, &mut self.bridge);
                }
                SubmitOutcome::Failed { message }
            }
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}
