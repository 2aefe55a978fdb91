//! # HOST BRIDGE
//!
//! **CAPABILITY SET OF THE EMBEDDING CHAT PLATFORM**
//!
//! The engine talks to the host only through this trait. No other host
//! capability may be assumed.

use crate::errors::FormError;
use serde::{Deserialize, Serialize};

/// Handler invoked when the user taps the submit affordance.
pub type ClickHandler = Box<dyn FnMut() + 'static>;

/// **BUTTON COLORS** - Background and foreground of the submit affordance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonColors {
    pub color: String,
    pub text_color: String,
}

impl ButtonColors {
    pub fn new(color: impl Into<String>, text_color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            text_color: text_color.into(),
        }
    }
}

/// **BUTTON PARAMS** - Argument of `HostBridge::set_button_params`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonParams {
    pub is_active: bool,
    pub color: String,
    pub text_color: String,
}

impl ButtonParams {
    pub fn new(is_active: bool, colors: &ButtonColors) -> Self {
        Self {
            is_active,
            color: colors.color.clone(),
            text_color: colors.text_color.clone(),
        }
    }
}

/// **HOST BRIDGE TRAIT**
///
/// **MANDATE**: Implementations forward each call to the host verbatim.
/// **GUARANTEE**: Only `send_data` can fail; every other call is fire-and-forget.
pub trait HostBridge {
    /// Lifecycle: tell the host the mini-app is ready.
    fn ready(&mut self);

    /// Lifecycle: expand the mini-app to full height.
    fn expand(&mut self);

    /// Current accent and accent-text colors.
    fn theme(&self) -> ButtonColors;

    fn set_button_text(&mut self, label: &str);

    fn show_button(&mut self);

    fn set_button_params(&mut self, params: &ButtonParams);

    fn on_button_click(&mut self, handler: ClickHandler);

    fn disable_button(&mut self);

    /// Hand a serialized payload to the host.
    fn send_data(&mut self, payload: &str) -> Result<(), FormError>;

    /// Close the mini-app.
    fn close(&mut self);
}
