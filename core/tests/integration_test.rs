use tgform::api::*;
use tgform::testing::{BridgeCall, RecordingBridge, RecordingView, StubHttpClient};
use tokio::sync::mpsc::unbounded_channel;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type DirectController = FormController<RecordingBridge, RecordingView, DirectDelivery>;
type NetworkController =
    FormController<RecordingBridge, RecordingView, Delivery<StubHttpClient>>;

fn registration_controller() -> DirectController {
    let variant = registration();
    let config = variant.default_config();
    FormController::new(
        variant.fields,
        config,
        RecordingBridge::default(),
        RecordingView::default(),
        DirectDelivery,
    )
    .unwrap()
    .with_prefill_anchor(variant.prefill_anchor)
}

fn feedback_controller(client: StubHttpClient, policy: FailurePolicy) -> NetworkController {
    let variant = feedback();
    let config = variant.default_config().with_failure_policy(policy);
    let delivery = variant.delivery(client, &config);
    FormController::new(
        variant.fields,
        config,
        RecordingBridge::default(),
        RecordingView::default(),
        delivery,
    )
    .unwrap()
}

fn fill_feedback(controller: &mut NetworkController) {
    controller.handle_value_change("name", "мария").unwrap();
    controller.handle_value_change("surname", "иванова").unwrap();
    controller
        .handle_value_change("message", "Спасибо за смену!")
        .unwrap();
}

// =============================================================================
// INITIALIZATION AND PREFILL
// =============================================================================

#[test]
fn test_returning_user_prefill_and_update_copy() {
    init_logging();
    let mut controller = registration_controller();
    let params = LaunchParams::from_query(
        "surname=%D0%98%D0%B2%D0%B0%D0%BD%D0%BE%D0%B2%D0%B0&name=%D0%9C%D0%B0%D1%80%D0%B8%D1%8F\
         &date_of_birth=01.01.2000&city=%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0\
         &phone_number=%2B79991234567&update=1",
    );
    controller.initialize(&params, Box::new(|| {}));

    let view = controller.view();
    assert_eq!(
        view.title.as_deref(),
        Some("Рады снова видеть Вас в нашем проекте.<br>Пожалуйста, проверьте свои данные.")
    );
    assert_eq!(view.value("surname"), Some("Иванова"));
    assert_eq!(view.value("phone_number"), Some("+7 999 123-45-67"));
    assert_eq!(controller.gate_state(), GateState::Enabled);

    assert_eq!(
        controller.bridge().calls,
        vec![
            BridgeCall::Ready,
            BridgeCall::Expand,
            BridgeCall::SetText("Подать заявку на участие в смене".to_string()),
            BridgeCall::SetParams(ButtonParams::new(true, &ButtonColors::new("#2481cc", "#ffffff"))),
            BridgeCall::OnClick,
            BridgeCall::Show,
        ]
    );
}

#[test]
fn test_update_flag_changes_copy_but_not_values() {
    init_logging();
    let query = "surname=%D0%B8%D0%B2%D0%B0%D0%BD%D0%BE%D0%B2%D0%B0&name=%D0%BC%D0%B0%D1%80%D0%B8%D1%8F\
                 &date_of_birth=01.01.2000&city=%D0%BC%D0%BE%D1%81%D0%BA%D0%B2%D0%B0\
                 &phone_number=89991234567";

    let mut first_visit = registration_controller();
    first_visit.initialize(&LaunchParams::from_query(query), Box::new(|| {}));
    let mut returning = registration_controller();
    returning.initialize(
        &LaunchParams::from_query(&format!("{}&update=1", query)),
        Box::new(|| {}),
    );

    assert_eq!(
        first_visit.view().title.as_deref(),
        Some("* необходимо заполнить поля")
    );
    assert_ne!(first_visit.view().title, returning.view().title);

    for field in ["surname", "name", "date_of_birth", "city", "phone_number"] {
        assert_eq!(
            first_visit.form().value(field),
            returning.form().value(field),
            "field {}",
            field
        );
        assert_eq!(first_visit.view().value(field), returning.view().value(field));
    }
    assert_eq!(first_visit.form().value("surname"), Some("Иванова"));
    assert_eq!(first_visit.form().value("phone_number"), Some("+7 999 123-45-67"));
    assert_eq!(first_visit.gate_state(), returning.gate_state());
}

#[test]
fn test_prefill_skipped_without_anchor() {
    init_logging();
    let mut controller = registration_controller();
    let params = LaunchParams::from_query("name=%D0%9C%D0%B0%D1%80%D0%B8%D1%8F&city=Moscow");
    controller.initialize(&params, Box::new(|| {}));

    assert_eq!(controller.form().value("name"), Some(""));
    assert_eq!(controller.view().title.as_deref(), Some("* необходимо заполнить поля"));
    assert_eq!(controller.gate_state(), GateState::Disabled);
    // Untouched fields are judged without showing any error.
    assert!(controller.view().fields.is_empty());
    assert!(!controller.bridge().last_params().unwrap().is_active);
}

#[test]
fn test_feedback_prefills_hidden_fields_individually() {
    init_logging();
    let mut controller = feedback_controller(StubHttpClient::responding(200, ""), FailurePolicy::Reenable);
    let params = LaunchParams::from_pairs([("telegram_link", "t.me/maria"), ("external_id", "42")]);
    controller.initialize(&params, Box::new(|| {}));

    assert_eq!(controller.form().value("telegram_link"), Some("t.me/maria"));
    assert_eq!(controller.form().value("external_id"), Some("42"));
    assert_eq!(controller.bridge().count(&BridgeCall::SetText("Отправить".to_string())), 1);
}

// =============================================================================
// VALUE CHANGES
// =============================================================================

#[test]
fn test_phone_is_masked_while_typing() {
    let mut controller = registration_controller();
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));

    controller.handle_value_change("phone_number", "123").unwrap();
    assert_eq!(controller.view().value("phone_number"), Some("+7 123"));
    let presentation = controller.view().presentation("phone_number").unwrap();
    assert!(presentation.invalid);
    assert_eq!(presentation.message, "Введите номер телефона");

    controller
        .handle_value_change("phone_number", "89991234567")
        .unwrap();
    assert_eq!(controller.view().value("phone_number"), Some("+7 999 123-45-67"));
    assert_eq!(
        controller.view().presentation("phone_number"),
        Some(&Presentation::valid())
    );
}

#[test]
fn test_aggregate_mode_joins_messages() {
    let mut controller = feedback_controller(StubHttpClient::responding(200, ""), FailurePolicy::Reenable);
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));

    controller.handle_value_change("message", "").unwrap();
    let presentation = controller.view().presentation("message").unwrap();
    assert!(presentation.invalid);
    assert_eq!(
        presentation.message,
        "Пожалуйста, напишите сообщение\nВведите не менее 2 символов"
    );
}

#[test]
fn test_unknown_field_is_an_error() {
    let mut controller = registration_controller();
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));
    let err = controller.handle_value_change("nickname", "x").unwrap_err();
    assert_eq!(err.code(), error_codes::UNKNOWN_FIELD);
}

#[test]
fn test_clearing_a_field_hides_its_error() {
    let mut controller = feedback_controller(StubHttpClient::responding(200, ""), FailurePolicy::Reenable);
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));
    fill_feedback(&mut controller);

    controller.handle_value_change("email", "maria@").unwrap();
    assert_eq!(controller.gate_state(), GateState::Disabled);

    let state = controller.clear_field("email").unwrap();
    assert_eq!(state, GateState::Enabled);
    assert_eq!(controller.view().value("email"), Some(""));
    assert_eq!(
        controller.view().presentation("email"),
        Some(&Presentation::valid())
    );
}

// =============================================================================
// SUBMISSION
// =============================================================================

#[tokio::test(flavor = "current_thread")]
async fn test_submit_ignored_while_gate_closed() {
    let mut controller = registration_controller();
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));

    assert_eq!(controller.submit().await, SubmitOutcome::Ignored);
    assert_eq!(controller.bridge().count(&BridgeCall::Disable), 0);
    assert!(controller.bridge().sent_payloads().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn test_event_loop_delivers_through_bridge() {
    init_logging();
    let (tx, rx) = unbounded_channel();
    let mut controller = registration_controller();
    controller.initialize(&LaunchParams::default(), submit_trigger(tx.clone()));

    for (field, value) in [
        ("surname", "иванова"),
        ("name", "мария"),
        ("date_of_birth", "01.01.2000"),
        ("city", "ростов-на-дону"),
        ("phone_number", "89991234567"),
    ] {
        tx.send(FormEvent::ValueChanged {
            field: field.to_string(),
            value: value.to_string(),
        })
        .unwrap();
    }
    assert!(controller.bridge_mut().click());
    assert!(controller.bridge_mut().click());

    let outcome = run_event_loop(&mut controller, rx).await;
    assert_eq!(outcome, Some(SubmitOutcome::Delivered));

    let bridge = controller.bridge();
    assert_eq!(bridge.count(&BridgeCall::Disable), 1);
    let payloads = bridge.sent_payloads();
    assert_eq!(payloads.len(), 1);

    let disable_at = bridge.calls.iter().position(|c| *c == BridgeCall::Disable).unwrap();
    let send_at = bridge
        .calls
        .iter()
        .position(|c| matches!(c, BridgeCall::SendData(_)))
        .unwrap();
    assert!(disable_at < send_at);
    assert_eq!(bridge.calls.last(), Some(&BridgeCall::Close));

    let payload: serde_json::Value = serde_json::from_str(payloads[0]).unwrap();
    assert_eq!(
        payload,
        serde_json::json!({
            "surname": "Иванова",
            "name": "Мария",
            "date_of_birth": "01.01.2000",
            "city": "Ростов-на-Дону",
            "phone_number": "+7 999 123-45-67",
        })
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_network_success_closes() {
    let mut controller = feedback_controller(StubHttpClient::responding(201, ""), FailurePolicy::Reenable);
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));
    fill_feedback(&mut controller);

    assert_eq!(controller.submit().await, SubmitOutcome::Delivered);
    assert!(controller.bridge().is_closed());
    assert!(controller.view().alerts.is_empty());

    let Delivery::Network(network) = controller.strategy() else {
        panic!("feedback posts to the endpoint");
    };
    let requests = network.client().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, DEFAULT_ENDPOINT);
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["email", "external_id", "message", "name", "surname", "telegram_link"]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_network_failure_reenables_by_default() {
    let mut controller = feedback_controller(StubHttpClient::responding(500, ""), FailurePolicy::Reenable);
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));
    fill_feedback(&mut controller);

    let outcome = controller.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Server response with status 500!".to_string()
        }
    );
    assert_eq!(controller.view().alerts, vec!["Server response with status 500!"]);
    assert!(!controller.bridge().is_closed());
    assert!(!controller.is_submitting());
    assert_eq!(controller.gate_state(), GateState::Enabled);
    assert!(controller.bridge().last_params().unwrap().is_active);
}

#[tokio::test(flavor = "current_thread")]
async fn test_network_failure_keep_disabled() {
    let mut controller = feedback_controller(
        StubHttpClient::failing("connection refused"),
        FailurePolicy::KeepDisabled,
    );
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));
    fill_feedback(&mut controller);

    let outcome = controller.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Network error: connection refused".to_string()
        }
    );
    assert_eq!(controller.gate_state(), GateState::Disabled);
    assert_eq!(controller.bridge().calls.last(), Some(&BridgeCall::Disable));
    assert_eq!(controller.submit().await, SubmitOutcome::Ignored);

    // The next edit recomputes the gate.
    let state = controller
        .handle_value_change("message", "Спасибо за смену!!")
        .unwrap();
    assert_eq!(state, GateState::Enabled);
}

#[tokio::test(flavor = "current_thread")]
async fn test_server_message_is_shown() {
    let mut controller = feedback_controller(
        StubHttpClient::responding(400, r#""Сообщение уже отправлено""#),
        FailurePolicy::Reenable,
    );
    controller.initialize(&LaunchParams::default(), Box::new(|| {}));
    fill_feedback(&mut controller);

    controller.submit().await;
    assert_eq!(controller.view().alerts, vec!["Сообщение уже отправлено"]);
}
