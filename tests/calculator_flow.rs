use calcline::{
    config::{ClientSettings, DEFAULT_FAILURE_MESSAGE, ERROR_TOKEN},
    io::{MockEventStream, MockRenderStream, MockTerminalState},
    AppController, CalcApiClient, CalculationError, Operation,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestController = AppController<MockEventStream, MockRenderStream>;

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings::new(&format!("{}/api/v1", server.uri()), Duration::from_secs(5)).unwrap()
}

fn create_controller(server: &MockServer) -> (TestController, Arc<Mutex<MockTerminalState>>) {
    let render_stream = MockRenderStream::new();
    let screen = render_stream.state_handle();
    let controller =
        AppController::with_io_streams(&settings_for(server), MockEventStream::empty(), render_stream)
            .unwrap();
    (controller, screen)
}

fn press_keys(controller: &mut TestController, keys: &str) {
    for ch in keys.chars() {
        controller
            .process_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
            .unwrap();
    }
}

async fn mount_result(server: &MockServer, endpoint: &str, body: serde_json::Value, result: f64) {
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/calculate/{endpoint}")))
        .and(body_json(body))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": result, "operation": endpoint })),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn addition_should_show_result_and_record_history() {
    let server = MockServer::start().await;
    mount_result(&server, "add", json!({"a": 10.0, "b": 5.0}), 15.0).await;
    let (mut controller, screen) = create_controller(&server);

    press_keys(&mut controller, "10+5");
    assert_eq!(
        controller.view_model().pending_line().as_deref(),
        Some("10 +")
    );

    press_keys(&mut controller, "=");
    assert!(controller.view_model().is_loading());
    assert_eq!(controller.view_model().display_text(), "Loading...");

    assert!(controller.settle().await.unwrap());
    assert_eq!(controller.view_model().display_text(), "15");
    assert!(controller.view_model().pending_line().is_none());
    assert_eq!(controller.view_model().history_entries(), vec!["10 + 5 = 15"]);

    let screen = screen.lock().unwrap();
    assert!(screen.screen_contains("15"));
    assert!(screen.screen_contains("10 + 5 = 15"));
}

#[tokio::test]
async fn request_should_be_sent_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/calculate/multiply"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"a": 2.5, "b": 4.0})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": 10.0, "operation": "multiply"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (mut controller, _screen) = create_controller(&server);

    press_keys(&mut controller, "2.5*4=");
    controller.settle().await.unwrap();

    assert_eq!(controller.view_model().display_text(), "10");
    assert_eq!(controller.view_model().history_entries(), vec!["2.5 × 4 = 10"]);
}

#[tokio::test]
async fn division_by_zero_should_show_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/calculate/divide"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "division by zero"})))
        .mount(&server)
        .await;
    let (mut controller, screen) = create_controller(&server);

    press_keys(&mut controller, "8/0=");
    controller.settle().await.unwrap();

    assert_eq!(controller.view_model().display_text(), ERROR_TOKEN);
    assert_eq!(
        controller.view_model().error_message(),
        Some("division by zero")
    );
    assert!(controller.view_model().history_entries().is_empty());
    assert!(screen.lock().unwrap().screen_contains("division by zero"));

    // A digit replaces the error token and clears the message
    press_keys(&mut controller, "3");
    assert_eq!(controller.view_model().display_text(), "3");
    assert!(controller.view_model().error_message().is_none());
}

#[tokio::test]
async fn sqrt_should_send_single_operand() {
    let server = MockServer::start().await;
    mount_result(&server, "sqrt", json!({"a": 25.0}), 5.0).await;
    let (mut controller, _screen) = create_controller(&server);

    press_keys(&mut controller, "25s");
    controller.settle().await.unwrap();

    assert_eq!(controller.view_model().display_text(), "5");
    assert_eq!(controller.view_model().history_entries(), vec!["√25 = 5"]);
}

#[tokio::test]
async fn percentage_should_describe_share_of_base() {
    let server = MockServer::start().await;
    mount_result(&server, "percentage", json!({"a": 200.0, "b": 15.0}), 30.0).await;
    let (mut controller, _screen) = create_controller(&server);

    press_keys(&mut controller, "200%15=");
    controller.settle().await.unwrap();

    assert_eq!(controller.view_model().display_text(), "30");
    assert_eq!(
        controller.view_model().history_entries(),
        vec!["200% of 15 = 30"]
    );
}

#[tokio::test]
async fn chained_operator_should_evaluate_stored_operation() {
    let server = MockServer::start().await;
    mount_result(&server, "add", json!({"a": 2.0, "b": 3.0}), 5.0).await;
    let (mut controller, _screen) = create_controller(&server);

    press_keys(&mut controller, "2+3*");
    controller.settle().await.unwrap();

    assert_eq!(controller.view_model().display_text(), "5");
    assert!(controller.view_model().pending_line().is_none());
    assert_eq!(controller.view_model().history_entries(), vec!["2 + 3 = 5"]);
}

#[tokio::test]
async fn history_should_keep_five_newest_entries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/calculate/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 2.0, "operation": "add"})))
        .mount(&server)
        .await;
    let (mut controller, _screen) = create_controller(&server);

    for _ in 0..6 {
        press_keys(&mut controller, "1+1=");
        controller.settle().await.unwrap();
        press_keys(&mut controller, "c");
    }

    let entries = controller.view_model().history_entries();
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|entry| *entry == "1 + 1 = 2"));

    press_keys(&mut controller, "H");
    assert!(controller.view_model().history_entries().is_empty());
}

#[tokio::test]
async fn failure_after_clear_should_be_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/calculate/subtract"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "boom"}))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;
    let (mut controller, _screen) = create_controller(&server);

    press_keys(&mut controller, "9-1=");
    controller
        .process_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
        .unwrap();
    assert_eq!(controller.view_model().model().display(), "0");

    controller.settle().await.unwrap();
    assert_eq!(controller.view_model().display_text(), "0");
    assert!(controller.view_model().error_message().is_none());
    assert!(!controller.view_model().is_loading());
}

#[tokio::test]
async fn client_should_fall_back_to_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/calculate/power"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    let client = CalcApiClient::new(&settings_for(&server)).unwrap();

    let error = client
        .calculate(Operation::Power, 2.0, Some(3.0))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), DEFAULT_FAILURE_MESSAGE);
    assert!(!error.has_server_message());
    assert!(matches!(error, CalculationError::Server { status, .. } if status.as_u16() == 502));
}

#[tokio::test]
async fn client_should_reject_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/calculate/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 3})))
        .mount(&server)
        .await;
    let client = CalcApiClient::new(&settings_for(&server)).unwrap();

    let error = client
        .calculate(Operation::Add, 1.0, Some(2.0))
        .await
        .unwrap_err();

    assert!(matches!(error, CalculationError::InvalidResponse(_)));
}
