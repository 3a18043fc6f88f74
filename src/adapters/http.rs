//! Polled HTTP listener for the control API.
//!
//! A non-blocking `std::net::TcpListener` (lwIP sockets on ESP-IDF) that the
//! control loop polls once per pass.  Accepted connections stay
//! non-blocking and are parked in a small table while their request head
//! arrives; whatever bytes are available are buffered each pass, so a slow
//! or silent client never holds up the loop.  Once the request line is
//! complete it is handed to the caller's handler and the response is
//! written with `Connection: close`.  Nothing runs on a background thread,
//! so handlers execute inline with the loop.

use std::io::{ErrorKind, Read};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use log::{debug, info, warn};

use crate::api::{ApiRequest, ApiResponse};
use crate::error::NetworkError;

/// Longest request head we buffer.  Longer heads are cut at this size.
const MAX_HEAD_BYTES: usize = 512;

/// Connections waiting for their request line.  Further clients stay in
/// the listen backlog until a slot frees up.
const MAX_PENDING: usize = 4;

/// Passes a connection gets to deliver its request line before it is
/// dropped.  About two seconds at the default loop period.
const MAX_HEAD_PASSES: u16 = 100;

/// Write timeout for the response, once a request line is in.
const WRITE_TIMEOUT: Duration = Duration::from_millis(250);

/// One accepted connection and the head bytes received so far.
struct Pending {
    stream: TcpStream,
    peer: SocketAddr,
    head: heapless::Vec<u8, MAX_HEAD_BYTES>,
    passes: u16,
}

enum Progress {
    /// Request line complete, head full, or client finished sending.
    Ready,
    /// Nothing more to read right now.
    Waiting,
    /// Client went away (or errored) without sending anything usable.
    Closed,
}

impl Pending {
    /// Drain whatever the socket has without blocking.
    fn fill(&mut self) -> Progress {
        let mut chunk = [0u8; 128];
        loop {
            let room = MAX_HEAD_BYTES - self.head.len();
            if room == 0 {
                return Progress::Ready;
            }
            let want = room.min(chunk.len());
            match self.stream.read(&mut chunk[..want]) {
                Ok(0) if self.head.is_empty() => return Progress::Closed,
                Ok(0) => return Progress::Ready,
                Ok(n) => {
                    if self.head.extend_from_slice(&chunk[..n]).is_err() {
                        return Progress::Ready;
                    }
                    if has_line_end(&self.head) {
                        return Progress::Ready;
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => return Progress::Waiting,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    debug!("HTTP: read from {} failed: {}", self.peer, e);
                    return Progress::Closed;
                }
            }
        }
    }
}

pub struct HttpServer {
    listener: TcpListener,
    pending: heapless::Vec<Pending, MAX_PENDING>,
    served: u32,
}

impl HttpServer {
    /// Bind `0.0.0.0:<port>` in non-blocking mode.  Port `0` lets the OS
    /// pick one (see [`local_addr`](Self::local_addr)).
    pub fn bind(port: u16) -> Result<Self, NetworkError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).map_err(|e| {
            warn!("HTTP: bind {} failed: {}", addr, e);
            NetworkError::BindFailed
        })?;
        listener
            .set_nonblocking(true)
            .map_err(|_| NetworkError::BindFailed)?;
        info!("HTTP: listening on port {}", port);
        Ok(Self {
            listener,
            pending: heapless::Vec::new(),
            served: 0,
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr().ok()
    }

    /// Requests answered since boot.
    pub fn served(&self) -> u32 {
        self.served
    }

    /// Connections still waiting for their request line.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Accept new clients, read what has arrived, and answer up to `max`
    /// completed requests.  Never waits on a client.  Returns how many
    /// were answered.
    pub fn poll(
        &mut self,
        max: u8,
        mut handler: impl FnMut(ApiRequest) -> ApiResponse,
    ) -> usize {
        self.accept_new();

        let mut answered = 0;
        let mut i = 0;
        while i < self.pending.len() && answered < usize::from(max) {
            match self.pending[i].fill() {
                Progress::Waiting => {
                    let conn = &mut self.pending[i];
                    conn.passes += 1;
                    if conn.passes >= MAX_HEAD_PASSES {
                        debug!("HTTP: {} sent no request line, dropping", conn.peer);
                        self.pending.swap_remove(i);
                    } else {
                        i += 1;
                    }
                }
                Progress::Closed => {
                    self.pending.swap_remove(i);
                }
                Progress::Ready => {
                    let conn = self.pending.swap_remove(i);
                    if respond(conn, &mut handler) {
                        answered += 1;
                        self.served = self.served.wrapping_add(1);
                    }
                }
            }
        }
        answered
    }

    fn accept_new(&mut self) {
        while !self.pending.is_full() {
            let (stream, peer) = match self.listener.accept() {
                Ok(conn) => conn,
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!("HTTP: accept error: {}", e);
                    break;
                }
            };
            if let Err(e) = stream.set_nonblocking(true) {
                warn!("HTTP: socket setup failed for {}: {}", peer, e);
                continue;
            }
            let conn = Pending {
                stream,
                peer,
                head: heapless::Vec::new(),
                passes: 0,
            };
            // Loop condition guarantees room.
            let _ = self.pending.push(conn);
        }
    }
}

fn respond(mut conn: Pending, handler: &mut impl FnMut(ApiRequest) -> ApiResponse) -> bool {
    let Some(line) = request_line(&conn.head) else {
        debug!("HTTP: no request line from {}", conn.peer);
        return false;
    };
    debug!("HTTP: {} {}", conn.peer, line);

    let response = handler(ApiRequest::parse(line));

    if conn.stream.set_nonblocking(false).is_err()
        || conn.stream.set_write_timeout(Some(WRITE_TIMEOUT)).is_err()
    {
        warn!("HTTP: socket setup failed for {}", conn.peer);
        return false;
    }
    if let Err(e) = response.write_to(&mut conn.stream) {
        warn!("HTTP: write to {} failed: {}", conn.peer, e);
        return false;
    }
    let _ = conn.stream.shutdown(Shutdown::Both);
    true
}

fn has_line_end(head: &[u8]) -> bool {
    head.windows(2).any(|w| w == b"\r\n")
}

/// First line of a buffered head, trimmed.  `None` when empty or not UTF-8.
fn request_line(head: &[u8]) -> Option<&str> {
    let head = core::str::from_utf8(head).ok()?;
    let line = head.lines().next()?.trim();
    if line.is_empty() { None } else { Some(line) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::time::Instant;

    fn server() -> (HttpServer, SocketAddr) {
        let s = HttpServer::bind(0).unwrap();
        let port = s.local_addr().unwrap().port();
        (s, SocketAddr::from(([127, 0, 0, 1], port)))
    }

    /// Poll until `want` requests are answered or ~1 s passes.
    fn poll_until(
        s: &mut HttpServer,
        want: usize,
        handler: &mut impl FnMut(ApiRequest) -> ApiResponse,
    ) -> usize {
        let mut total = 0;
        for _ in 0..100 {
            total += s.poll(4, &mut *handler);
            if total >= want {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        total
    }

    /// Poll until at least `want` connections are parked.
    fn accept_until(s: &mut HttpServer, want: usize) {
        for _ in 0..100 {
            s.poll(4, |_| ApiResponse::not_found());
            if s.pending() >= want {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn poll_without_clients_returns_zero() {
        let (mut s, _) = server();
        assert_eq!(s.poll(4, |_| ApiResponse::not_found()), 0);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn serves_one_request_per_connection() {
        let (mut s, addr) = server();
        let mut client = TcpStream::connect(addr).unwrap();
        client
            .write_all(b"GET /toggle-mode HTTP/1.1\r\nHost: x\r\n\r\n")
            .unwrap();

        let mut seen = None;
        let n = poll_until(&mut s, 1, &mut |req| {
            seen = Some(req);
            ApiResponse::text("Mode toggled")
        });
        assert_eq!(n, 1);
        assert_eq!(seen, Some(ApiRequest::ToggleMode));
        assert_eq!(s.served(), 1);
        assert_eq!(s.pending(), 0);

        let mut reply = String::new();
        client.read_to_string(&mut reply).unwrap();
        assert!(reply.starts_with("HTTP/1.1 200 OK"));
        assert!(reply.ends_with("Mode toggled"));
    }

    #[test]
    fn silent_clients_do_not_stall_poll() {
        let (mut s, addr) = server();
        let _idle: Vec<_> = (0..MAX_PENDING)
            .map(|_| TcpStream::connect(addr).unwrap())
            .collect();
        accept_until(&mut s, MAX_PENDING);
        assert_eq!(s.pending(), MAX_PENDING);

        let started = Instant::now();
        let mut answered = 0;
        for _ in 0..5 {
            answered += s.poll(4, |_| ApiResponse::not_found());
        }
        assert_eq!(answered, 0);
        assert!(
            started.elapsed() < Duration::from_millis(100),
            "poll waited on idle clients: {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn partial_head_completes_on_later_pass() {
        let (mut s, addr) = server();
        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /sta").unwrap();
        accept_until(&mut s, 1);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(s.poll(4, |_| ApiResponse::not_found()), 0);
        assert_eq!(s.pending(), 1);

        client.write_all(b"tus HTTP/1.1\r\n\r\n").unwrap();
        let mut seen = None;
        let n = poll_until(&mut s, 1, &mut |req| {
            seen = Some(req);
            ApiResponse::text("ok")
        });
        assert_eq!(n, 1);
        assert_eq!(seen, Some(ApiRequest::Status));
    }

    #[test]
    fn stale_connection_is_dropped() {
        let (mut s, addr) = server();
        let _idle = TcpStream::connect(addr).unwrap();
        accept_until(&mut s, 1);
        for _ in 0..MAX_HEAD_PASSES {
            s.poll(4, |_| ApiResponse::not_found());
        }
        assert_eq!(s.pending(), 0);
        assert_eq!(s.served(), 0);
    }

    #[test]
    fn hung_up_client_is_dropped_unanswered() {
        let (mut s, addr) = server();
        drop(TcpStream::connect(addr).unwrap());
        let mut called = false;
        for _ in 0..20 {
            s.poll(4, |_| {
                called = true;
                ApiResponse::not_found()
            });
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!called);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn request_line_stops_at_crlf() {
        assert_eq!(
            request_line(b"GET /status HTTP/1.1\r\nHost: a\r\n\r\n"),
            Some("GET /status HTTP/1.1")
        );
        assert_eq!(request_line(b""), None);
        assert_eq!(request_line(b"\r\n"), None);
        assert!(has_line_end(b"GET / HTTP/1.1\r\n"));
        assert!(!has_line_end(b"GET / HTT"));
    }
}
