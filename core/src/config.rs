//! # FORM CONFIGURATION
//!
//! **PURPOSE**: Everything a form needs besides its field specs, built once at
//! initialization and handed to the controller.

use crate::bridge::ButtonColors;
use crate::errors::{error_codes, FormError};
use crate::gate::{DISABLED_BUTTON_COLOR, DISABLED_BUTTON_TEXT_COLOR};
use crate::validation::ValidationMode;
use serde::{Deserialize, Serialize};

/// Relative endpoint of the network delivery strategy.
pub const DEFAULT_ENDPOINT: &str = "/api/feedback";

/// **FORM COPY** - Title and submit label shown for one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormCopy {
    pub headline: String,
    pub button_label: String,
}

/// **COPY SET** - New-submission and update-submission texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopySet {
    pub new_submission: FormCopy,
    pub update_submission: FormCopy,
}

impl CopySet {
    pub fn select(&self, update: bool) -> &FormCopy {
        if update {
            &self.update_submission
        } else {
            &self.new_submission
        }
    }
}

impl Default for CopySet {
    fn default() -> Self {
        Self {
            new_submission: FormCopy {
                headline: "* необходимо заполнить поля".to_string(),
                button_label: "Отправить".to_string(),
            },
            update_submission: FormCopy {
                headline: "Рады снова видеть Вас в нашем проекте.<br>\
                           Пожалуйста, проверьте свои данные."
                    .to_string(),
                button_label: "Подать заявку на участие в смене".to_string(),
            },
        }
    }
}

/// **FAILURE POLICY** - Submit affordance after a failed network delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stay disabled until the next value change recomputes the gate.
    KeepDisabled,
    /// Recompute the gate right after the failure is reported.
    #[default]
    Reenable,
}

/// **FORM CONFIG**
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// **VALIDATION MODE** - Short-circuit or aggregate error reporting
    pub mode: ValidationMode,

    pub copy: CopySet,

    /// **DISABLED COLORS** - Used instead of the theme while the gate is closed
    pub disabled_colors: ButtonColors,

    /// **ENDPOINT** - Target of network delivery
    pub endpoint: String,

    pub on_failure: FailurePolicy,

    /// **NORMALIZE PREFILL** - Run the value-change pipeline over prefilled fields
    pub normalize_prefill: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            copy: CopySet::default(),
            disabled_colors: ButtonColors::new(DISABLED_BUTTON_COLOR, DISABLED_BUTTON_TEXT_COLOR),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            on_failure: FailurePolicy::default(),
            normalize_prefill: true,
        }
    }
}

impl FormConfig {
    /// **LOAD** - Parse a JSON config document; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let config: FormConfig = serde_json::from_str(json).map_err(|e| FormError::Config {
            code: error_codes::INVALID_CONFIG.to_string(),
            message: format!("Invalid form config: {}", e),
        })?;
        if config.endpoint.is_empty() {
            return Err(FormError::Config {
                code: error_codes::INVALID_CONFIG.to_string(),
                message: "Endpoint must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }
}
