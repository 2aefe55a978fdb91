//! # SUBMIT GATE
//!
//! **TWO-STATE MACHINE DRIVING THE HOST'S SUBMIT AFFORDANCE**
//!
//! The gate state is never stored as a source of truth: it is derived from
//! `FormState` after every field update. `SubmitGate` only remembers what it
//! last pushed to the host so it can act on transitions.

use crate::bridge::{ButtonColors, ButtonParams, HostBridge};
use crate::form::FormState;

/// Fallback colors of a disabled affordance, readable on any theme.
pub const DISABLED_BUTTON_COLOR: &str = "#9e9e9e";
pub const DISABLED_BUTTON_TEXT_COLOR: &str = "#eceff1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Disabled,
    Enabled,
}

impl GateState {
    /// **DERIVE** - Enabled iff every field passes native and custom checks
    pub fn derive(form: &FormState) -> Self {
        if form.is_valid() {
            GateState::Enabled
        } else {
            GateState::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == GateState::Enabled
    }
}

#[derive(Debug, Clone)]
pub struct SubmitGate {
    /// Theme colors captured once at form initialization.
    enabled_colors: ButtonColors,
    disabled_colors: ButtonColors,
    applied: Option<GateState>,
}

impl SubmitGate {
    pub fn new(enabled_colors: ButtonColors, disabled_colors: ButtonColors) -> Self {
        Self {
            enabled_colors,
            disabled_colors,
            applied: None,
        }
    }

    /// State last pushed to the host; Disabled before the first sync.
    pub fn state(&self) -> GateState {
        self.applied.unwrap_or_default()
    }

    pub fn button_params(&self, state: GateState) -> ButtonParams {
        match state {
            GateState::Enabled => ButtonParams::new(true, &self.enabled_colors),
            GateState::Disabled => ButtonParams::new(false, &self.disabled_colors),
        }
    }

    /// **SYNC** - Recompute from `form`; push to the host on transition only
    pub fn sync<B: HostBridge>(&mut self, form: &FormState, bridge: &mut B) -> GateState {
        let next = GateState::derive(form);
        if self.applied != Some(next) {
            log::debug!("submit gate {:?} -> {:?}", self.applied, next);
            bridge.set_button_params(&self.button_params(next));
            self.applied = Some(next);
        }
        next
    }

    /// Disable the affordance right away, ahead of any delivery.
    pub fn lock<B: HostBridge>(&mut self, bridge: &mut B) {
        bridge.disable_button();
        self.applied = Some(GateState::Disabled);
    }
}
