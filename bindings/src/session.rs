//! Host-independent session setup shared by every page adapter.

use tgform::api::{FormConfig, FormError, FormVariant};

/// Variant and configuration a page session runs with.
#[derive(Debug)]
pub struct SessionSetup {
    /// Field specs, prefill anchor and delivery kind of the page's form.
    pub variant: FormVariant,
    /// Effective configuration.
    pub config: FormConfig,
}

/// Resolve `variant_name` and merge the optional JSON config over its defaults.
///
/// A config document that does not name a `mode` keeps the variant's own
/// validation mode.
///
/// # Errors
///
/// Returns `FormError::Config` for an unknown variant or a malformed config.
pub fn prepare(variant_name: &str, config_json: Option<&str>) -> Result<SessionSetup, FormError> {
    let variant = FormVariant::by_name(variant_name)?;
    let config = match config_json.filter(|json| !json.trim().is_empty()) {
        None => variant.default_config(),
        Some(json) => {
            let mut config = FormConfig::from_json(json)?;
            if !declares_mode(json) {
                config.mode = variant.mode;
            }
            config
        }
    };
    log::info!(
        "session for '{}' ({:?}, endpoint {})",
        variant.name,
        config.mode,
        config.endpoint
    );
    Ok(SessionSetup { variant, config })
}

fn declares_mode(json: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .is_some_and(|value| value.get("mode").is_some())
}
