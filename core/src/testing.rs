//! # IN-MEMORY DOUBLES
//!
//! Host bridge, view and HTTP client implementations that record every call.
//! Used by unit and integration tests and by the benchmarks.

use crate::bridge::{ButtonColors, ButtonParams, ClickHandler, HostBridge};
use crate::delivery::{HttpClient, HttpRequest, HttpResponse};
use crate::errors::{error_codes, FormError};
use crate::presenter::Presentation;
use crate::view::FormView;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// One recorded `HostBridge` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    Ready,
    Expand,
    SetText(String),
    Show,
    SetParams(ButtonParams),
    OnClick,
    Disable,
    SendData(String),
    Close,
}

pub struct RecordingBridge {
    pub theme: ButtonColors,
    pub calls: Vec<BridgeCall>,
    /// When set, `send_data` fails as an unavailable host would.
    pub reject_send: bool,
    handler: Option<ClickHandler>,
}

impl Default for RecordingBridge {
    fn default() -> Self {
        Self {
            theme: ButtonColors::new("#2481cc", "#ffffff"),
            calls: Vec::new(),
            reject_send: false,
            handler: None,
        }
    }
}

impl fmt::Debug for RecordingBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingBridge")
            .field("theme", &self.theme)
            .field("calls", &self.calls)
            .field("reject_send", &self.reject_send)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl RecordingBridge {
    pub fn rejecting() -> Self {
        Self {
            reject_send: true,
            ..Self::default()
        }
    }

    /// Simulate a tap on the submit affordance. Returns false when no
    /// handler has been registered.
    pub fn click(&mut self) -> bool {
        match self.handler.as_mut() {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn count(&self, wanted: &BridgeCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }

    pub fn sent_payloads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::SendData(json) => Some(json.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Last button params pushed, if any.
    pub fn last_params(&self) -> Option<&ButtonParams> {
        self.calls.iter().rev().find_map(|call| match call {
            BridgeCall::SetParams(params) => Some(params),
            _ => None,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.calls.contains(&BridgeCall::Close)
    }
}

impl HostBridge for RecordingBridge {
    fn ready(&mut self) {
        self.calls.push(BridgeCall::Ready);
    }

    fn expand(&mut self) {
        self.calls.push(BridgeCall::Expand);
    }

    fn theme(&self) -> ButtonColors {
        self.theme.clone()
    }

    fn set_button_text(&mut self, label: &str) {
        self.calls.push(BridgeCall::SetText(label.to_string()));
    }

    fn show_button(&mut self) {
        self.calls.push(BridgeCall::Show);
    }

    fn set_button_params(&mut self, params: &ButtonParams) {
        self.calls.push(BridgeCall::SetParams(params.clone()));
    }

    fn on_button_click(&mut self, handler: ClickHandler) {
        self.calls.push(BridgeCall::OnClick);
        self.handler = Some(handler);
    }

    fn disable_button(&mut self) {
        self.calls.push(BridgeCall::Disable);
    }

    fn send_data(&mut self, payload: &str) -> Result<(), FormError> {
        if self.reject_send {
            return Err(FormError::Bridge {
                code: error_codes::BRIDGE_UNAVAILABLE.to_string(),
                message: "host refused data".to_string(),
            });
        }
        self.calls.push(BridgeCall::SendData(payload.to_string()));
        Ok(())
    }

    fn close(&mut self) {
        self.calls.push(BridgeCall::Close);
    }
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub values: HashMap<String, String>,
    pub fields: HashMap<String, Presentation>,
    pub title: Option<String>,
    pub alerts: Vec<String>,
}

impl RecordingView {
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn presentation(&self, field: &str) -> Option<&Presentation> {
        self.fields.get(field)
    }
}

impl FormView for RecordingView {
    fn set_value(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    fn show_field(&mut self, field: &str, presentation: &Presentation) {
        self.fields.insert(field.to_string(), presentation.clone());
    }

    fn set_title(&mut self, text: &str) {
        self.title = Some(text.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Canned HTTP client answering every request the same way.
#[derive(Debug)]
pub struct StubHttpClient {
    reply: Result<HttpResponse, String>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl StubHttpClient {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(HttpResponse::new(status, body)),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Every request fails at the transport level with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl HttpClient for StubHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FormError> {
        self.requests.borrow_mut().push(request);
        match &self.reply {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(FormError::Transport {
                code: error_codes::TRANSPORT_FAILED.to_string(),
                message: message.clone(),
            }),
        }
    }
}
