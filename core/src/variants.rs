//! # FORM VARIANTS
//!
//! **THE THREE SHIPPED FORMS**
//!
//! - `feedback` - free-form message, aggregate errors, posted to an endpoint
//! - `registration` - personal data, first error only, sent through the host
//! - `external_registration` - registration plus identifiers of an external site

use crate::config::FormConfig;
use crate::delivery::{Delivery, DirectDelivery, NetworkDelivery};
use crate::errors::{error_codes, FormError};
use crate::params::ParamKey;
use crate::types::{CharsetFilter, ErrorKind, FieldSpec, PatternKind};
use crate::validation::ValidationMode;

/// How a variant hands its payload off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    Direct,
    Network,
}

#[derive(Debug)]
pub struct FormVariant {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
    /// Prefill only runs when this launch parameter is present.
    pub prefill_anchor: Option<ParamKey>,
    pub mode: ValidationMode,
    pub delivery: DeliveryKind,
}

impl FormVariant {
    /// **LOOKUP** - Variant by its page name
    pub fn by_name(name: &str) -> Result<Self, FormError> {
        match name {
            "feedback" => Ok(feedback()),
            "registration" => Ok(registration()),
            "external_registration" => Ok(external_registration()),
            other => Err(FormError::Config {
                code: error_codes::INVALID_CONFIG.to_string(),
                message: format!("Unknown form variant '{}'", other),
            }),
        }
    }

    pub fn default_config(&self) -> FormConfig {
        FormConfig::default().with_mode(self.mode)
    }

    /// Build the delivery strategy; `client` is only kept for network variants.
    pub fn delivery<C>(&self, client: C, config: &FormConfig) -> Delivery<C> {
        match self.delivery {
            DeliveryKind::Direct => Delivery::Direct(DirectDelivery),
            DeliveryKind::Network => {
                Delivery::Network(NetworkDelivery::new(client, config.endpoint.clone()))
            }
        }
    }
}

// =============================================================================
// SHARED FIELDS
// =============================================================================

fn person_name(name: &str, required_message: &str) -> FieldSpec {
    FieldSpec::text(name)
        .filter(CharsetFilter::Letters)
        .capitalized()
        .min_length(2)
        .max_length(100)
        .guard_caps_lock()
        .guard_hyphens()
        .pattern(PatternKind::NameSurname)
        .message(ErrorKind::Required, required_message)
        .message(ErrorKind::TooShort, "Введите не менее 2 символов")
        .message(ErrorKind::TooLong, "Допускается ввод не более 100 символов")
}

fn date_of_birth() -> FieldSpec {
    FieldSpec::date("date_of_birth")
        .message(ErrorKind::Required, "Пожалуйста, укажите дату рождения")
        .message(ErrorKind::InvalidDate, "Введите дату в формате дд.мм.гггг")
}

fn city() -> FieldSpec {
    FieldSpec::text("city")
        .filter(CharsetFilter::LettersAndSpaces)
        .capitalized()
        .min_length(2)
        .max_length(50)
        .guard_caps_lock()
        .guard_hyphens()
        .pattern(PatternKind::City)
        .message(ErrorKind::Required, "Пожалуйста, укажите название города")
        .message(ErrorKind::TooShort, "Введите не менее 2 символов")
        .message(ErrorKind::TooLong, "Допускается ввод не более 50 символов")
        .message(
            ErrorKind::PatternMismatch(PatternKind::City),
            "Доступно использование только кириллицы, пробела и \"-\"",
        )
}

fn phone_number() -> FieldSpec {
    FieldSpec::phone("phone_number")
        .min_length(16)
        .max_length(16)
        .message(ErrorKind::Required, "Пожалуйста, укажите номер телефона")
        .message(ErrorKind::TooShort, "Введите номер телефона")
        .message(
            ErrorKind::TooLong,
            "Номер телефона не должен содержать более 11 цифр",
        )
}

fn email(required: bool) -> FieldSpec {
    let spec = FieldSpec::text("email")
        .filter(CharsetFilter::EmailChars)
        .max_length(100)
        .pattern(PatternKind::Email)
        .message(ErrorKind::Required, "Пожалуйста, укажите email")
        .message(ErrorKind::TooLong, "Допускается ввод не более 100 символов");
    if required {
        spec
    } else {
        spec.optional()
    }
}

fn hidden(name: &str) -> FieldSpec {
    FieldSpec::text(name).optional()
}

fn registration_fields() -> Vec<FieldSpec> {
    vec![
        person_name("surname", "Пожалуйста, укажите фамилию"),
        person_name("name", "Пожалуйста, укажите имя"),
        date_of_birth(),
        city(),
        phone_number(),
    ]
}

// =============================================================================
// VARIANTS
// =============================================================================

/// **FEEDBACK FORM**
pub fn feedback() -> FormVariant {
    FormVariant {
        name: "feedback",
        fields: vec![
            person_name("name", "Пожалуйста, укажите имя"),
            person_name("surname", "Пожалуйста, укажите фамилию"),
            email(false),
            FieldSpec::text("message")
                .min_length(2)
                .max_length(2500)
                .pattern(PatternKind::Feedback)
                .message(ErrorKind::Required, "Пожалуйста, напишите сообщение")
                .message(ErrorKind::TooShort, "Введите не менее 2 символов")
                .message(ErrorKind::TooLong, "Допускается ввод не более 2500 символов"),
            hidden("telegram_link"),
            hidden("external_id"),
        ],
        prefill_anchor: None,
        mode: ValidationMode::Aggregate,
        delivery: DeliveryKind::Network,
    }
}

/// **REGISTRATION FORM** - Prefilled only for returning users
pub fn registration() -> FormVariant {
    FormVariant {
        name: "registration",
        fields: registration_fields(),
        prefill_anchor: Some(ParamKey::Surname),
        mode: ValidationMode::ShortCircuit,
        delivery: DeliveryKind::Direct,
    }
}

pub fn external_registration() -> FormVariant {
    let mut fields = registration_fields();
    fields.push(email(true));
    fields.push(hidden("telegram_link"));
    fields.push(hidden("external_id"));
    FormVariant {
        name: "external_registration",
        fields,
        prefill_anchor: Some(ParamKey::Surname),
        mode: ValidationMode::ShortCircuit,
        delivery: DeliveryKind::Direct,
    }
}
