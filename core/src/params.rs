//! # LAUNCH PARAMETERS AND PREFILL
//!
//! The host opens the mini-app with a query string carrying known user data.
//! This module parses it, offers a typed lookup and copies values into a form.

use crate::form::FormState;
use std::collections::HashMap;

/// Parse `key=value&...` with percent-decoding. `+` decodes to a space and a
/// key without `=` maps to an empty value.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|decoded| decoded.into_owned())
}

/// **KNOWN PARAMETER KEYS**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Name,
    Surname,
    DateOfBirth,
    City,
    PhoneNumber,
    Email,
    TelegramLink,
    ExternalId,
    /// Mode flag, not a field.
    Update,
}

impl ParamKey {
    /// Keys that map onto a field of the same name.
    pub const FIELDS: [ParamKey; 8] = [
        ParamKey::Name,
        ParamKey::Surname,
        ParamKey::DateOfBirth,
        ParamKey::City,
        ParamKey::PhoneNumber,
        ParamKey::Email,
        ParamKey::TelegramLink,
        ParamKey::ExternalId,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::Name => "name",
            ParamKey::Surname => "surname",
            ParamKey::DateOfBirth => "date_of_birth",
            ParamKey::City => "city",
            ParamKey::PhoneNumber => "phone_number",
            ParamKey::Email => "email",
            ParamKey::TelegramLink => "telegram_link",
            ParamKey::ExternalId => "external_id",
            ParamKey::Update => "update",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::FIELDS
            .into_iter()
            .chain([ParamKey::Update])
            .find(|candidate| candidate.as_str() == key)
    }
}

/// **LAUNCH PARAMS** - Typed view over the launch query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    values: HashMap<String, String>,
}

impl LaunchParams {
    pub fn from_query(query: &str) -> Self {
        let values = parse_query_string(query);
        for key in values.keys() {
            if ParamKey::parse(key).is_none() {
                log::warn!("ignoring unknown launch parameter '{}'", key);
            }
        }
        Self { values }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Value of `key`; empty values count as absent.
    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.values
            .get(key.as_str())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// **UPDATE FLAG** - Truthy unless absent, empty, `0`, `false` or `no`
    pub fn is_update(&self) -> bool {
        match self.get(ParamKey::Update) {
            Some(flag) => !matches!(flag.to_ascii_lowercase().as_str(), "0" | "false" | "no"),
            None => false,
        }
    }
}

/// **APPLY PREFILL**
///
/// With an anchor, nothing is copied unless the anchor key is present. Every
/// recognized key that names a field of `form` is copied verbatim. Returns
/// the names of the fields that were filled.
pub fn apply_prefill(
    form: &mut FormState,
    params: &LaunchParams,
    anchor: Option<ParamKey>,
) -> Vec<String> {
    if let Some(anchor) = anchor {
        if params.get(anchor).is_none() {
            log::debug!("prefill skipped: anchor '{}' absent", anchor.as_str());
            return Vec::new();
        }
    }

    let mut filled = Vec::new();
    for key in ParamKey::FIELDS {
        let Some(value) = params.get(key) else {
            continue;
        };
        if let Ok(entry) = form.get_mut(key.as_str()) {
            entry.set_raw(value);
            filled.push(key.as_str().to_string());
        }
    }
    log::debug!("prefilled fields: {:?}", filled);
    filled
}
