//! API responses and their HTTP/1.1 wire form.

use std::borrow::Cow;
use std::io::Write;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Cow<'static, str>,
}

impl ApiResponse {
    pub fn html(body: &'static str) -> Self {
        Self {
            status: 200,
            content_type: TEXT_HTML,
            body: Cow::Borrowed(body),
        }
    }

    pub fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: APPLICATION_JSON,
            body: Cow::Owned(body),
        }
    }

    pub fn text(body: &'static str) -> Self {
        Self {
            status: 200,
            content_type: TEXT_PLAIN,
            body: Cow::Borrowed(body),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            content_type: TEXT_PLAIN,
            body: Cow::Borrowed("Not found"),
        }
    }

    pub fn server_error() -> Self {
        Self {
            status: 500,
            content_type: TEXT_PLAIN,
            body: Cow::Borrowed("Internal error"),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }

    /// Serialise as a complete `Connection: close` response.
    pub fn write_to(&self, w: &mut impl Write) -> std::io::Result<()> {
        write!(
            w,
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason(),
            self.content_type,
            self.body.len()
        )?;
        w.write_all(self.body.as_bytes())?;
        w.flush()
    }
}
