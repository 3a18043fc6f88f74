//! Fuzz target: HTTP request-line parser
//!
//! Feeds arbitrary text to `ApiRequest::parse` and verifies:
//! - No panics on any input
//! - A parsed threshold command never carries an unknown action
//! - Non-GET methods never reach a handler route
//!
//! cargo fuzz run fuzz_request_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use smart_irrigation::api::{ApiRequest, ThresholdParams};
use smart_irrigation::app::commands::AppCommand;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    let req = ApiRequest::parse(line);

    let is_get = line.split_whitespace().next() == Some("GET");
    if !is_get {
        assert_eq!(req, ApiRequest::NotFound);
    }

    if let ApiRequest::Threshold(params) = req {
        match (params, params.command()) {
            (ThresholdParams::Action(Some(_)), Some(AppCommand::AdjustThreshold(_))) => {}
            (ThresholdParams::Value(Some(v)), Some(AppCommand::SetThreshold(c))) => {
                assert_eq!(v, c);
            }
            (_, None) => {}
            (p, c) => panic!("inconsistent params {:?} -> {:?}", p, c),
        }
    }
});
