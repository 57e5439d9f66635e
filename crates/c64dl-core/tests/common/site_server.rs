//! Minimal HTTP/1.1 server that serves a fixed set of routes for integration tests.
//!
//! GET and POST are routed by exact path (query ignored). Unknown routes get 404.
//! Every POST is recorded so tests can assert what was submitted.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
    /// Sleep before answering (simulates a hung server).
    pub delay: Option<Duration>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub path: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedPost {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
pub struct SiteBuilder {
    routes: HashMap<(String, String), Response>,
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(mut self, path: &str, response: Response) -> Self {
        self.routes
            .insert(("GET".to_string(), path.to_string()), response);
        self
    }

    pub fn post(mut self, path: &str, response: Response) -> Self {
        self.routes
            .insert(("POST".to_string(), path.to_string()), response);
        self
    }

    /// Starts the server in a background thread. It runs until the process exits.
    pub fn start(self) -> Site {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(self.routes);
        let posts = Arc::new(Mutex::new(Vec::new()));
        let posts_srv = Arc::clone(&posts);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let posts = Arc::clone(&posts_srv);
                thread::spawn(move || handle(stream, &routes, &posts));
            }
        });
        Site {
            base_url: format!("http://127.0.0.1:{}/", port),
            posts,
        }
    }
}

pub struct Site {
    /// e.g. "http://127.0.0.1:12345/"
    pub base_url: String,
    posts: Arc<Mutex<Vec<RecordedPost>>>,
}

impl Site {
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<(String, String), Response>,
    posts: &Mutex<Vec<RecordedPost>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let Some((method, path, headers, body)) = read_request(&mut stream) else {
        return;
    };

    if method == "POST" {
        posts.lock().unwrap().push(RecordedPost {
            path: path.clone(),
            body: String::from_utf8_lossy(&body).into_owned(),
            headers,
        });
    }

    let response = routes
        .get(&(method, path))
        .cloned()
        .unwrap_or_else(|| Response::status(404));
    if let Some(d) = response.delay {
        thread::sleep(d);
    }
    let head = format!(
        "HTTP/1.1 {} X\r\nContent-Length: {}\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n",
        response.status,
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&response.body);
    let _ = stream.flush();
}

type Request = (String, String, Vec<(String, String)>, Vec<u8>);

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..header_end]).ok()?;
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_ascii_uppercase();
    let target = parts.next()?;
    let path = target.split('?').next().unwrap_or(target).to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let (name, value) = (name.trim(), value.trim());
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name.to_string(), value.to_string()));
        }
    }

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);
    Some((method, path, headers, body))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
