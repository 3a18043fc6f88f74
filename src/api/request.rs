//! HTTP request-line parsing into typed API requests.
//!
//! Only the request line matters: headers and bodies are ignored.  Query
//! values are taken verbatim (the page never sends escaped characters).

use crate::app::commands::{Adjust, AppCommand};

/// Parameters of `GET /threshold`.
///
/// `action` wins over `value` when both are present, even if the action
/// itself is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdParams {
    /// `action=` present; `None` if it was neither `increase` nor `decrease`.
    Action(Option<Adjust>),
    /// `value=` present; `None` if it was not an integer.
    Value(Option<i32>),
    /// Neither parameter present.
    Missing,
}

impl ThresholdParams {
    pub fn from_query(query: &str) -> Self {
        let action = query_param(query, "action");
        let value = query_param(query, "value");
        match (action, value) {
            (Some(a), _) => Self::Action(Adjust::parse(a)),
            (None, Some(v)) => Self::Value(v.trim().parse().ok()),
            (None, None) => Self::Missing,
        }
    }

    /// The command these parameters request, or `None` when malformed.
    pub fn command(self) -> Option<AppCommand> {
        match self {
            Self::Action(Some(adjust)) => Some(AppCommand::AdjustThreshold(adjust)),
            Self::Value(Some(v)) => Some(AppCommand::SetThreshold(v)),
            Self::Action(None) | Self::Value(None) | Self::Missing => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRequest {
    /// `GET /`: status page.
    Index,
    /// `GET /status`: JSON snapshot.
    Status,
    /// `GET /threshold?...`
    Threshold(ThresholdParams),
    /// `GET /toggle-mode`
    ToggleMode,
    /// Unknown route or non-GET method.
    NotFound,
}

impl ApiRequest {
    /// Parse an HTTP request line such as `GET /threshold?value=55 HTTP/1.1`.
    pub fn parse(request_line: &str) -> Self {
        let mut parts = request_line.split_whitespace();
        let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
            return Self::NotFound;
        };
        if method != "GET" {
            return Self::NotFound;
        }

        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        match path {
            "/" => Self::Index,
            "/status" => Self::Status,
            "/threshold" => Self::Threshold(ThresholdParams::from_query(query)),
            "/toggle-mode" => Self::ToggleMode,
            _ => Self::NotFound,
        }
    }
}

/// First value for `key` in an `a=1&b=2` query string.
fn query_param<'q>(query: &'q str, key: &str) -> Option<&'q str> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
