//! # SUBMISSION DELIVERY
//!
//! **PLUGGABLE STRATEGIES FOR HANDING THE PAYLOAD OFF**
//!
//! - `DirectDelivery` - host bridge `send_data`, then close
//! - `NetworkDelivery` - JSON `POST` to a relative endpoint, close on 2xx

use crate::bridge::HostBridge;
use crate::errors::{error_codes, FormError};
use crate::form::FormState;
use serde_json::{Map, Value as JsonValue};

pub mod direct;
pub mod http;
pub mod network;

pub use direct::DirectDelivery;
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use network::NetworkDelivery;

/// **PAYLOAD** - Flat record of trimmed field values keyed by field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    fields: Map<String, JsonValue>,
}

impl Payload {
    /// **COLLECT** - One key per active field, values trimmed
    pub fn collect(form: &FormState) -> Self {
        let fields = form
            .entries()
            .iter()
            .map(|entry| {
                (
                    entry.name().to_string(),
                    JsonValue::String(entry.state.raw_value.trim().to_string()),
                )
            })
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(JsonValue::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Result<String, FormError> {
        serde_json::to_string(&self.fields).map_err(|e| FormError::Serialization {
            code: error_codes::PAYLOAD_ENCODE.to_string(),
            message: format!("Failed to encode payload: {}", e),
        })
    }
}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Payload accepted; the mini-app has been closed.
    Delivered,
    /// Payload not accepted; `message` is shown to the user.
    Failed { message: String },
}

/// **SUBMIT STRATEGY TRAIT**
///
/// **GUARANTEE**: Failures come back as `DeliveryOutcome::Failed`, never as a
/// panic; no retry is attempted.
#[allow(async_fn_in_trait)]
pub trait SubmitStrategy {
    async fn deliver<B: HostBridge>(&self, bridge: &mut B, payload: &Payload) -> DeliveryOutcome;
}

/// **DELIVERY** - Strategy chosen at runtime, e.g. per form variant
#[derive(Debug)]
pub enum Delivery<C> {
    Direct(DirectDelivery),
    Network(NetworkDelivery<C>),
}

impl<C: HttpClient> SubmitStrategy for Delivery<C> {
    async fn deliver<B: HostBridge>(&self, bridge: &mut B, payload: &Payload) -> DeliveryOutcome {
        match self {
            Delivery::Direct(direct) => direct.deliver(bridge, payload).await,
            Delivery::Network(network) => network.deliver(bridge, payload).await,
        }
    }
}
