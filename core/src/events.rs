//! # FORM EVENTS
//!
//! Typing, pasting, committing and leaving a control all raise the same
//! semantic `ValueChanged` event. `EventDeduplicator` collapses repeated
//! triggers carrying an unchanged value at the event-source boundary, and
//! `run_event_loop` drains events strictly one at a time.

use crate::bridge::{ClickHandler, HostBridge};
use crate::controller::{FormController, SubmitOutcome};
use crate::delivery::SubmitStrategy;
use crate::presenter::Presentation;
use crate::view::FormView;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// DOM-level trigger that produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTrigger {
    Input,
    Paste,
    Change,
    Blur,
}

impl InputTrigger {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "input" => Some(InputTrigger::Input),
            "paste" => Some(InputTrigger::Paste),
            "change" => Some(InputTrigger::Change),
            "blur" => Some(InputTrigger::Blur),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ValueChanged { field: String, value: String },
    FieldCleared { field: String },
    SubmitTriggered,
}

/// Emits one `ValueChanged` per distinct value of a field.
#[derive(Debug, Default)]
pub struct EventDeduplicator {
    last_seen: HashMap<String, String>,
}

impl EventDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// **OBSERVE** - `None` when `value` equals what the field last carried
    pub fn observe(&mut self, field: &str, value: &str, trigger: InputTrigger) -> Option<FormEvent> {
        if self.last_seen.get(field).map(String::as_str) == Some(value) {
            log::trace!("dropping duplicate {:?} on '{}'", trigger, field);
            return None;
        }
        self.last_seen.insert(field.to_string(), value.to_string());
        Some(FormEvent::ValueChanged {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// Record a value written back by the engine so its echo is dropped.
    pub fn acknowledge(&mut self, field: &str, value: &str) {
        self.last_seen.insert(field.to_string(), value.to_string());
    }
}

/// **SYNCED VIEW**
///
/// Wraps a `FormView` and acknowledges every value the engine writes back,
/// so the deduplicator's record always matches what the control displays.
#[derive(Debug)]
pub struct SyncedView<V> {
    inner: V,
    dedup: Rc<RefCell<EventDeduplicator>>,
}

impl<V: FormView> SyncedView<V> {
    pub fn new(inner: V, dedup: Rc<RefCell<EventDeduplicator>>) -> Self {
        Self { inner, dedup }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn deduplicator(&self) -> &Rc<RefCell<EventDeduplicator>> {
        &self.dedup
    }
}

impl<V: FormView> FormView for SyncedView<V> {
    fn set_value(&mut self, field: &str, value: &str) {
        self.inner.set_value(field, value);
        self.dedup.borrow_mut().acknowledge(field, value);
    }

    fn show_field(&mut self, field: &str, presentation: &Presentation) {
        self.inner.show_field(field, presentation);
    }

    fn set_title(&mut self, text: &str) {
        self.inner.set_title(text);
    }

    fn alert(&mut self, message: &str) {
        self.inner.alert(message);
    }
}

/// Click handler that enqueues `SubmitTriggered`.
pub fn submit_trigger(sender: UnboundedSender<FormEvent>) -> ClickHandler {
    Box::new(move || {
        if sender.send(FormEvent::SubmitTriggered).is_err() {
            log::debug!("submit click after event loop shut down");
        }
    })
}

/// **EVENT LOOP**
///
/// Processes events in arrival order until the channel closes or a
/// submission is delivered (the mini-app is closed at that point). Returns
/// the last submit outcome, if any submit was triggered.
pub async fn run_event_loop<B, V, S>(
    controller: &mut FormController<B, V, S>,
    mut events: UnboundedReceiver<FormEvent>,
) -> Option<SubmitOutcome>
where
    B: HostBridge,
    V: FormView,
    S: SubmitStrategy,
{
    let mut last_outcome = None;
    while let Some(event) = events.recv().await {
        match event {
            FormEvent::ValueChanged { field, value } => {
                if let Err(err) = controller.handle_value_change(&field, &value) {
                    log::warn!("value change dropped: {}", err);
                }
            }
            FormEvent::FieldCleared { field } => {
                if let Err(err) = controller.clear_field(&field) {
                    log::warn!("clear dropped: {}", err);
                }
            }
            FormEvent::SubmitTriggered => {
                let outcome = controller.submit().await;
                let delivered = outcome == SubmitOutcome::Delivered;
                last_outcome = Some(outcome);
                if delivered {
                    break;
                }
            }
        }
    }
    last_outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_names() {
        assert_eq!(InputTrigger::parse("paste"), Some(InputTrigger::Paste));
        assert_eq!(InputTrigger::parse("blur"), Some(InputTrigger::Blur));
        assert_eq!(InputTrigger::parse("keyup"), None);
    }

    #[test]
    fn test_redundant_triggers_collapse() {
        let mut dedup = EventDeduplicator::new();
        assert!(dedup.observe("name", "Мари", InputTrigger::Input).is_some());
        assert!(dedup.observe("name", "Мари", InputTrigger::Change).is_none());
        assert!(dedup.observe("name", "Мари", InputTrigger::Blur).is_none());
        assert_eq!(
            dedup.observe("name", "Мария", InputTrigger::Paste),
            Some(FormEvent::ValueChanged {
                field: "name".to_string(),
                value: "Мария".to_string(),
            })
        );
    }

    #[test]
    fn test_first_blur_on_untouched_field_is_emitted() {
        let mut dedup = EventDeduplicator::new();
        assert!(dedup.observe("surname", "", InputTrigger::Blur).is_some());
        assert!(dedup.observe("surname", "", InputTrigger::Blur).is_none());
    }

    #[test]
    fn test_fields_are_tracked_independently() {
        let mut dedup = EventDeduplicator::new();
        assert!(dedup.observe("name", "А", InputTrigger::Input).is_some());
        assert!(dedup.observe("surname", "А", InputTrigger::Input).is_some());
    }

    #[test]
    fn test_acknowledged_echo_is_dropped() {
        let mut dedup = EventDeduplicator::new();
        dedup.observe("phone_number", "89991234567", InputTrigger::Input);
        dedup.acknowledge("phone_number", "+7 999 123-45-67");
        assert!(dedup
            .observe("phone_number", "+7 999 123-45-67", InputTrigger::Change)
            .is_none());
    }

    #[test]
    fn test_rewritten_value_can_be_entered_again() {
        use crate::delivery::DirectDelivery;
        use crate::params::LaunchParams;
        use crate::testing::{RecordingBridge, RecordingView};
        use crate::variants::registration;

        let dedup = Rc::new(RefCell::new(EventDeduplicator::new()));
        let variant = registration();
        let config = variant.default_config();
        let mut controller = FormController::new(
            variant.fields,
            config,
            RecordingBridge::default(),
            SyncedView::new(RecordingView::default(), Rc::clone(&dedup)),
            DirectDelivery,
        )
        .unwrap();
        controller.initialize(&LaunchParams::default(), Box::new(|| {}));

        let event = dedup
            .borrow_mut()
            .observe("name", "мария", InputTrigger::Input)
            .unwrap();
        let FormEvent::ValueChanged { field, value } = event else {
            panic!("expected a value change");
        };
        controller.handle_value_change(&field, &value).unwrap();
        assert_eq!(controller.view().inner().value("name"), Some("Мария"));

        // The echo of the written-back value is dropped, while typing the
        // lowercase text again is a real change.
        assert!(dedup
            .borrow_mut()
            .observe("name", "Мария", InputTrigger::Change)
            .is_none());
        assert!(dedup
            .borrow_mut()
            .observe("name", "мария", InputTrigger::Input)
            .is_some());
    }

    #[test]
    fn test_submit_trigger_enqueues() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut handler = submit_trigger(tx);
        handler();
        assert_eq!(rx.try_recv().ok(), Some(FormEvent::SubmitTriggered));
    }
}
