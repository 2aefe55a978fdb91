#![forbid(unsafe_code)]

use crate::session::prepare;
use js_sys::{Function, Promise, Reflect, JSON};
use std::cell::RefCell;
use std::rc::Rc;
use tgform::api::{
    error_codes, run_event_loop, submit_trigger, ButtonColors, ButtonParams, ClickHandler,
    Delivery, EventDeduplicator, FormController, FormError, FormEvent, FormView, HostBridge,
    HttpClient, HttpRequest, HttpResponse, InputTrigger, LaunchParams, Presentation, SyncedView,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    console, Document, Element, Headers, HtmlInputElement, HtmlTextAreaElement, Request,
    RequestInit, Response, Window,
};

const FALLBACK_BUTTON_COLOR: &str = "#2481cc";
const FALLBACK_BUTTON_TEXT_COLOR: &str = "#ffffff";
const INVALID_CLASS: &str = "invalid";
const TITLE_ELEMENT_ID: &str = "form-title";

// =============================================================================
// CONSOLE LOGGING
// =============================================================================

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            log::Level::Error => console::error_1(&line),
            log::Level::Warn => console::warn_1(&line),
            _ => console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

// =============================================================================
// JS HELPERS
// =============================================================================

fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn bridge_error(message: impl Into<String>) -> FormError {
    FormError::Bridge {
        code: error_codes::BRIDGE_UNAVAILABLE.to_string(),
        message: message.into(),
    }
}

fn transport_error(value: &JsValue) -> FormError {
    FormError::Transport {
        code: error_codes::TRANSPORT_FAILED.to_string(),
        message: js_error_text(value),
    }
}

fn window() -> Result<Window, FormError> {
    web_sys::window().ok_or_else(|| bridge_error("window is not available"))
}

// =============================================================================
// HOST BRIDGE
// =============================================================================

#[wasm_bindgen]
extern "C" {
    /// `Telegram.WebApp`
    type WebApp;

    #[wasm_bindgen(method)]
    fn ready(this: &WebApp);

    #[wasm_bindgen(method)]
    fn expand(this: &WebApp);

    #[wasm_bindgen(method)]
    fn close(this: &WebApp);

    #[wasm_bindgen(method, catch, js_name = sendData)]
    fn send_data(this: &WebApp, data: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, getter, js_name = MainButton)]
    fn main_button(this: &WebApp) -> MainButton;

    #[wasm_bindgen(method, getter, js_name = themeParams)]
    fn theme_params(this: &WebApp) -> ThemeParams;

    type MainButton;

    #[wasm_bindgen(method, js_name = setText)]
    fn set_text(this: &MainButton, text: &str);

    #[wasm_bindgen(method)]
    fn show(this: &MainButton);

    #[wasm_bindgen(method)]
    fn disable(this: &MainButton);

    #[wasm_bindgen(method, js_name = setParams)]
    fn set_params(this: &MainButton, params: &JsValue);

    #[wasm_bindgen(method, js_name = onClick)]
    fn on_click(this: &MainButton, callback: &Function);

    type ThemeParams;

    #[wasm_bindgen(method, getter)]
    fn button_color(this: &ThemeParams) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn button_text_color(this: &ThemeParams) -> Option<String>;
}

struct TelegramBridge {
    web_app: WebApp,
    main_button: MainButton,
    on_click: Option<Closure<dyn FnMut()>>,
}

impl TelegramBridge {
    fn connect() -> Result<Self, FormError> {
        let global: JsValue = js_sys::global().into();
        let web_app: WebApp = Reflect::get(&global, &JsValue::from_str("Telegram"))
            .ok()
            .filter(|telegram| telegram.is_object())
            .and_then(|telegram| Reflect::get(&telegram, &JsValue::from_str("WebApp")).ok())
            .filter(|web_app| web_app.is_object())
            .ok_or_else(|| bridge_error("Telegram.WebApp is not available"))?
            .unchecked_into();
        let main_button = web_app.main_button();
        Ok(Self {
            web_app,
            main_button,
            on_click: None,
        })
    }
}

impl HostBridge for TelegramBridge {
    fn ready(&mut self) {
        self.web_app.ready();
    }

    fn expand(&mut self) {
        self.web_app.expand();
    }

    fn theme(&self) -> ButtonColors {
        let params = self.web_app.theme_params();
        ButtonColors::new(
            params
                .button_color()
                .unwrap_or_else(|| FALLBACK_BUTTON_COLOR.to_string()),
            params
                .button_text_color()
                .unwrap_or_else(|| FALLBACK_BUTTON_TEXT_COLOR.to_string()),
        )
    }

    fn set_button_text(&mut self, label: &str) {
        self.main_button.set_text(label);
    }

    fn show_button(&mut self) {
        self.main_button.show();
    }

    fn set_button_params(&mut self, params: &ButtonParams) {
        let parsed = serde_json::to_string(params)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|json| JSON::parse(&json));
        match parsed {
            Ok(object) => self.main_button.set_params(&object),
            Err(err) => log::error!("button params not encoded: {}", js_error_text(&err)),
        }
    }

    fn on_button_click(&mut self, handler: ClickHandler) {
        let closure = Closure::wrap(handler);
        self.main_button.on_click(closure.as_ref().unchecked_ref());
        // The host keeps a reference; dropping the closure would invalidate it.
        self.on_click = Some(closure);
    }

    fn disable_button(&mut self) {
        self.main_button.disable();
    }

    fn send_data(&mut self, payload: &str) -> Result<(), FormError> {
        self.web_app
            .send_data(payload)
            .map_err(|err| bridge_error(js_error_text(&err)))
    }

    fn close(&mut self) {
        self.web_app.close();
    }
}

// =============================================================================
// FETCH CLIENT
// =============================================================================

struct FetchClient;

impl FetchClient {
    fn build_request(request: &HttpRequest) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        for (name, value) in &request.headers {
            headers.set(name, value)?;
        }
        let init = RequestInit::new();
        init.set_method(&request.method);
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&request.body));
        Request::new_with_str_and_init(&request.path, &init)
    }
}

impl HttpClient for FetchClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FormError> {
        let window = window()?;
        let js_request = Self::build_request(&request).map_err(|err| transport_error(&err))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .and_then(|value| value.dyn_into::<Response>())
            .map_err(|err| transport_error(&err))?;

        let status = response.status();
        let text: Promise = response.text().map_err(|err| transport_error(&err))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|err| transport_error(&err))?
            .as_string()
            .unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

// =============================================================================
// DOM VIEW
// =============================================================================

/// Controls are found by field name; each error slot has id `<name>-error`.
struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    fn connect() -> Result<Self, FormError> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| bridge_error("document is not available"))?;
        Ok(Self { window, document })
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl FormView for DomView {
    fn set_value(&mut self, field: &str, value: &str) {
        let Some(control) = self.element(field) else {
            log::warn!("no control for field '{}'", field);
            return;
        };
        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            log::warn!("control for '{}' does not hold a value", field);
        }
    }

    fn show_field(&mut self, field: &str, presentation: &Presentation) {
        if let Some(control) = self.element(field) {
            let class_list = control.class_list();
            let toggled = if presentation.invalid {
                class_list.add_1(INVALID_CLASS)
            } else {
                class_list.remove_1(INVALID_CLASS)
            };
            if let Err(err) = toggled {
                log::warn!("class toggle on '{}' failed: {}", field, js_error_text(&err));
            }
        }
        if let Some(slot) = self.element(&format!("{}-error", field)) {
            slot.set_text_content(Some(&presentation.message));
        }
    }

    fn set_title(&mut self, text: &str) {
        // Copy may carry a line break tag.
        if let Some(title) = self.element(TITLE_ELEMENT_ID) {
            title.set_inner_html(text);
        }
    }

    fn alert(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {}", js_error_text(&err));
        }
    }
}

// =============================================================================
// PAGE SESSION
// =============================================================================

/// One running form on the page.
#[wasm_bindgen]
pub struct FormSession {
    events: UnboundedSender<FormEvent>,
    dedup: Rc<RefCell<EventDeduplicator>>,
}

#[wasm_bindgen]
impl FormSession {
    /// Start `variant` with an optional JSON config and the launch query string.
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str, config_json: Option<String>, query: &str) -> Result<FormSession, JsValue> {
        init_logging();
        let to_js = |err: FormError| JsValue::from_str(&err.to_string());

        let setup = prepare(variant, config_json.as_deref()).map_err(to_js)?;
        let bridge = TelegramBridge::connect().map_err(to_js)?;
        let dedup = Rc::new(RefCell::new(EventDeduplicator::new()));
        let view = SyncedView::new(DomView::connect().map_err(to_js)?, Rc::clone(&dedup));
        let strategy: Delivery<FetchClient> = setup.variant.delivery(FetchClient, &setup.config);
        let anchor = setup.variant.prefill_anchor;

        let mut controller =
            FormController::new(setup.variant.fields, setup.config, bridge, view, strategy)
                .map_err(to_js)?
                .with_prefill_anchor(anchor);

        let (events, receiver) = unbounded_channel();
        controller.initialize(&LaunchParams::from_query(query), submit_trigger(events.clone()));

        spawn_local(async move {
            let outcome = run_event_loop(&mut controller, receiver).await;
            log::info!("form session finished: {:?}", outcome);
        });

        Ok(FormSession { events, dedup })
    }

    /// Report a control's current value; `trigger` is the DOM event name.
    #[wasm_bindgen(js_name = valueChanged)]
    pub fn value_changed(&mut self, field: &str, value: &str, trigger: &str) {
        let trigger = InputTrigger::parse(trigger).unwrap_or(InputTrigger::Input);
        let event = self.dedup.borrow_mut().observe(field, value, trigger);
        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    /// Empty a control whose section was hidden.
    #[wasm_bindgen(js_name = clearField)]
    pub fn clear_field(&mut self, field: &str) {
        self.dedup.borrow_mut().acknowledge(field, "");
        self.dispatch(FormEvent::FieldCleared {
            field: field.to_string(),
        });
    }

    /// Submit from a page-level control instead of the host affordance.
    pub fn submit(&self) {
        self.dispatch(FormEvent::SubmitTriggered);
    }
}

impl FormSession {
    fn dispatch(&self, event: FormEvent) {
        if self.events.send(event).is_err() {
            log::debug!("event after form session finished");
        }
    }
}
