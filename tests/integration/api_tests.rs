//! Integration tests for the control API: request line in, response out,
//! with the service state checked after each call.

use crate::mock_hw::{MockBoard, MockDisplay, MockStore, RecordingSink};

use smart_irrigation::api::{self, ApiRequest, ApiResponse};
use smart_irrigation::api::handlers::{MODE_TOGGLED, THRESHOLD_UPDATED};
use smart_irrigation::app::service::AppService;
use smart_irrigation::config::SystemConfig;
use smart_irrigation::control::mode::OperatingMode;
use smart_irrigation::control::threshold::THRESHOLD_KEY;

struct Api {
    app: AppService,
    board: MockBoard,
    display: MockDisplay,
    store: MockStore,
    sink: RecordingSink,
}

impl Api {
    fn new(moisture: u16) -> Self {
        let mut cfg = SystemConfig::default();
        cfg.raw_max = 100;
        let store = MockStore::new();
        let mut app = AppService::new(cfg, &store);
        let mut display = MockDisplay::new();
        let mut sink = RecordingSink::new();
        app.start(0, &mut display, &mut sink);
        Self {
            app,
            board: MockBoard::new(moisture),
            display,
            store,
            sink,
        }
    }

    fn get(&mut self, target: &str) -> ApiResponse {
        let line = format!("GET {} HTTP/1.1", target);
        api::handle(
            ApiRequest::parse(&line),
            1000,
            &mut self.app,
            &mut self.board,
            &mut self.display,
            &mut self.store,
            &mut self.sink,
        )
    }
}

#[test]
fn index_serves_the_page() {
    let mut api = Api::new(35);
    let resp = api.get("/");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, "text/html");
    assert!(resp.body.contains("/status"));
}

#[test]
fn status_returns_json_snapshot() {
    let mut api = Api::new(35);
    let resp = api.get("/status");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, "application/json");

    let v: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(v["moisture"], 35);
    assert_eq!(v["threshold"], 40);
    assert_eq!(v["status"], "Irrigating (Manual)");
}

#[test]
fn relative_and_absolute_threshold_updates() {
    let mut api = Api::new(35);

    let resp = api.get("/threshold?action=increase");
    assert_eq!(resp.body, THRESHOLD_UPDATED);
    assert_eq!(api.app.threshold(), 41);

    api.get("/threshold?action=decrease");
    api.get("/threshold?action=decrease");
    assert_eq!(api.app.threshold(), 39);

    api.get("/threshold?value=75");
    assert_eq!(api.app.threshold(), 75);
    assert_eq!(api.store.values.get(THRESHOLD_KEY), Some(&75));

    api.get("/threshold?value=400");
    assert_eq!(api.app.threshold(), 100);
}

#[test]
fn malformed_threshold_requests_change_nothing() {
    let mut api = Api::new(35);
    for target in [
        "/threshold",
        "/threshold?action=sideways",
        "/threshold?value=abc",
        "/threshold?action=bogus&value=10",
    ] {
        let resp = api.get(target);
        assert_eq!(resp.status, 200, "{}", target);
        assert_eq!(resp.body, THRESHOLD_UPDATED, "{}", target);
    }
    assert_eq!(api.app.threshold(), 40);
    assert_eq!(api.store.writes, 0);
}

#[test]
fn toggle_mode_flips_and_remote_status_drives_relay() {
    let mut api = Api::new(35);

    let resp = api.get("/toggle-mode");
    assert_eq!(resp.body, MODE_TOGGLED);
    assert_eq!(api.app.mode(), OperatingMode::Remote);
    assert_eq!(api.display.row(0), "Remote Mode");
    assert!(api.board.calls.is_empty());

    let resp = api.get("/status");
    let v: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(v["status"], "Irrigating (Remote)");
    assert!(api.board.relay());

    api.get("/toggle-mode");
    assert_eq!(api.app.mode(), OperatingMode::Manual);
}

#[test]
fn unknown_routes_and_methods_are_404() {
    let mut api = Api::new(35);
    assert_eq!(api.get("/nope").status, 404);

    let resp = api::handle(
        ApiRequest::parse("POST /toggle-mode HTTP/1.1"),
        0,
        &mut api.app,
        &mut api.board,
        &mut api.display,
        &mut api.store,
        &mut api.sink,
    );
    assert_eq!(resp.status, 404);
    assert_eq!(api.app.mode(), OperatingMode::Manual);
}
