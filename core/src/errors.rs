use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("TRANSPORT ERROR: {code} - {message}")]
    Transport { code: String, message: String },

    #[error("SERIALIZATION ERROR: {code} - {message}")]
    Serialization { code: String, message: String },

    #[error("CONFIG ERROR: {code} - {message}")]
    Config { code: String, message: String },

    #[error("UNKNOWN FIELD: '{name}' is not part of this form")]
    UnknownField { name: String },

    #[error("BRIDGE ERROR: {code} - {message}")]
    Bridge { code: String, message: String },
}

impl FormError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            FormError::Transport { code, .. }
            | FormError::Serialization { code, .. }
            | FormError::Config { code, .. }
            | FormError::Bridge { code, .. } => code,
            FormError::UnknownField { .. } => error_codes::UNKNOWN_FIELD,
        }
    }

    /// Message without the category prefix, suitable for showing to a user.
    pub fn message(&self) -> String {
        match self {
            FormError::Transport { message, .. }
            | FormError::Serialization { message, .. }
            | FormError::Config { message, .. }
            | FormError::Bridge { message, .. } => message.clone(),
            FormError::UnknownField { name } => format!("unknown field '{}'", name),
        }
    }
}

/// **FORM ERROR CODES**
///
/// **MANDATE**: Use these standardized codes for consistent error reporting.
pub mod error_codes {
    pub const TRANSPORT_FAILED: &str = "TGFORM_DELIVERY_TRANSPORT_FAILED";
    pub const PAYLOAD_ENCODE: &str = "TGFORM_DELIVERY_PAYLOAD_ENCODE";
    pub const INVALID_CONFIG: &str = "TGFORM_CONFIG_INVALID";
    pub const UNKNOWN_FIELD: &str = "TGFORM_FORM_UNKNOWN_FIELD";
    pub const BRIDGE_UNAVAILABLE: &str = "TGFORM_BRIDGE_UNAVAILABLE";
}
