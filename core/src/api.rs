pub use crate::bridge::{ButtonColors, ButtonParams, ClickHandler, HostBridge};
pub use crate::config::{CopySet, FailurePolicy, FormConfig, FormCopy, DEFAULT_ENDPOINT};
pub use crate::controller::{FormController, SubmitOutcome};
pub use crate::delivery::{
    Delivery, DeliveryOutcome, DirectDelivery, HttpClient, HttpRequest, HttpResponse,
    NetworkDelivery, Payload, SubmitStrategy,
};
pub use crate::errors::{error_codes, FormError};
pub use crate::events::{
    run_event_loop, submit_trigger, EventDeduplicator, FormEvent, InputTrigger, SyncedView,
};
pub use crate::form::{FormEntry, FormState};
pub use crate::gate::{GateState, SubmitGate};
pub use crate::normalize::normalize;
pub use crate::params::{apply_prefill, parse_query_string, LaunchParams, ParamKey};
pub use crate::presenter::{present, render, Presentation};
pub use crate::types::{
    CharsetFilter, ErrorKind, FieldKind, FieldSpec, FieldState, NativeConstraints, PatternKind,
    Verdict,
};
pub use crate::validation::{validate, Rule, RuleSet, ValidationMode};
pub use crate::variants::{external_registration, feedback, registration, DeliveryKind, FormVariant};
pub use crate::view::FormView;
