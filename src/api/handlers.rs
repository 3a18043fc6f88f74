//! Request → service dispatch.
//!
//! Each handler reads or mutates the [`AppService`] through explicit
//! references and renders a response.  Malformed threshold parameters
//! leave state unchanged and still get the normal confirmation text.

use log::warn;

use crate::app::ports::{DisplayPort, EventSink, OutputPort, SensorPort, StoragePort};
use crate::app::service::AppService;

use super::page::INDEX_HTML;
use super::request::ApiRequest;
use super::response::ApiResponse;

pub const THRESHOLD_UPDATED: &str = "Threshold updated";
pub const MODE_TOGGLED: &str = "Mode toggled";

pub fn handle(
    req: ApiRequest,
    now_ms: u32,
    app: &mut AppService,
    hw: &mut (impl SensorPort + OutputPort),
    display: &mut impl DisplayPort,
    storage: &mut impl StoragePort,
    sink: &mut impl EventSink,
) -> ApiResponse {
    match req {
        ApiRequest::Index => ApiResponse::html(INDEX_HTML),
        ApiRequest::Status => {
            let report = app.status_report(hw, sink);
            match serde_json::to_string(&report) {
                Ok(body) => ApiResponse::json(body),
                Err(e) => {
                    warn!("API: status encode failed: {}", e);
                    ApiResponse::server_error()
                }
            }
        }
        ApiRequest::Threshold(params) => {
            match params.command() {
                Some(cmd) => app.handle_command(cmd, now_ms, display, storage, sink),
                None => warn!("API: ignoring malformed threshold request {:?}", params),
            }
            ApiResponse::text(THRESHOLD_UPDATED)
        }
        ApiRequest::ToggleMode => {
            app.handle_command(
                crate::app::commands::AppCommand::ToggleMode,
                now_ms,
                display,
                storage,
                sink,
            );
            ApiResponse::text(MODE_TOGGLED)
        }
        ApiRequest::NotFound => ApiResponse::not_found(),
    }
}
