#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rtimeclock::core::session::SessionManager;
use rtimeclock::db::kv::KvStore;
use rtimeclock::models::user::Session;
use serde::Serialize;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// Isolated HOME plus a store path inside it.
pub struct Sandbox {
    pub home: TempDir,
    pub db: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp home");
        let db = home
            .path()
            .join("store.sqlite")
            .to_string_lossy()
            .to_string();
        Self { home, db }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// `rtimeclock --db <store>` with HOME pointing at the sandbox.
    pub fn rtc(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rtimeclock");
        cmd.env("HOME", self.home())
            .env("RUST_LOG", "off")
            .env_remove("RTIMECLOCK_API_URL")
            .env_remove("RTIMECLOCK_CPF")
            .env_remove("RTIMECLOCK_PASSWORD")
            .args(["--db", &self.db]);
        cmd
    }

    /// Same as `rtc` but talking to `server`.
    pub fn rtc_at(&self, server: &StubServer) -> Command {
        let mut cmd = self.rtc();
        cmd.args(["--api-url", &server.url]);
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.home().join(".rtimeclock").join("rtimeclock.conf")
    }
}

// ---------------------------
// JWT
// ---------------------------

#[derive(Serialize)]
struct Claims {
    id: String,
    exp: i64,
}

/// HS256 token whose `exp` is `secs` from now (negative for expired).
pub fn token_expiring_in(secs: i64) -> String {
    let claims = Claims {
        id: "u1".into(),
        exp: (Utc::now() + Duration::seconds(secs)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("encode token")
}

pub fn login_body(token: &str, role: &str) -> String {
    serde_json::json!({
        "token": token,
        "user": {
            "_id": "u1",
            "name": "maria da silva",
            "role": role,
            "companyId": "c1",
            "companyName": "ACME"
        }
    })
    .to_string()
}

// ---------------------------
// HTTP stub
// ---------------------------

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

type Handler = dyn Fn(&Recorded) -> (u16, String) + Send + Sync;

/// Minimal HTTP/1.1 server answering every connection once and closing it.
pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let url = format!("http://{}/", listener.local_addr().expect("addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                if let Some(req) = read_request(&stream) {
                    let (status, body) = handler(&req);
                    seen.lock().expect("lock").push(req);
                    write_response(stream, status, &body);
                }
            }
        });

        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self, method: &str, path: &str) -> Option<Recorded> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
    }
}

fn read_request(stream: &TcpStream) -> Option<Recorded> {
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target, String::new()),
    };

    let mut headers = Vec::new();
    loop {
        let mut h = String::new();
        reader.read_line(&mut h).ok()?;
        let h = h.trim_end();
        if h.is_empty() {
            break;
        }
        if let Some((k, v)) = h.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let find = |name: &str| {
        headers
            .iter()
            .find(|(k, _): &&(String, String)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    let body = if find("transfer-encoding").is_some_and(|v| v.contains("chunked")) {
        read_chunked(&mut reader)?
    } else {
        let len: usize = find("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).ok()?;
        buf
    };

    Some(Recorded {
        method,
        path,
        query,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn read_chunked(reader: &mut BufReader<&TcpStream>) -> Option<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let mut size = String::new();
        reader.read_line(&mut size).ok()?;
        let size = usize::from_str_radix(size.trim(), 16).ok()?;
        if size == 0 {
            let mut end = String::new();
            reader.read_line(&mut end).ok()?;
            return Some(body);
        }
        let mut chunk = vec![0u8; size + 2];
        reader.read_exact(&mut chunk).ok()?;
        body.extend_from_slice(&chunk[..size]);
    }
}

fn write_response(mut stream: TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Error",
    };
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body.as_bytes());
    let _ = stream.flush();
}

/// Stub for a signed-in employee: login works, today has no record yet,
/// clock actions and telemetry are accepted.
pub fn default_routes(req: &Recorded) -> (u16, String) {
    match (req.method.as_str(), req.path.as_str()) {
        ("POST", "/login") => (200, login_body(&token_expiring_in(3600), "employee")),
        ("GET", "/time-records") => (404, r#"{"error":"Nenhum registro"}"#.into()),
        ("POST", "/clock-in") => (201, r#"{"_id":"rec-1"}"#.into()),
        ("POST", "/lunch-start") | ("POST", "/lunch-end") | ("POST", "/clock-out") => {
            (200, r#"{"message":"ok"}"#.into())
        }
        ("POST", "/log-event") => (201, "{}".into()),
        _ => (404, "{}".into()),
    }
}

/// Write a session for `token` straight into the sandbox store.
pub fn store_session(sb: &Sandbox, token: &str) {
    let store = KvStore::open(&sb.db).expect("open store");
    let body: serde_json::Value =
        serde_json::from_str(&login_body(token, "employee")).expect("login json");
    let session = Session {
        token: token.to_string(),
        user: serde_json::from_value(body["user"].clone()).expect("user json"),
    };
    SessionManager::new(store).save(&session).expect("save session");
}

/// Record id the client cached for the day in progress.
pub fn cached_record_id(sb: &Sandbox) -> Option<String> {
    let store = KvStore::open(&sb.db).expect("open store");
    SessionManager::new(store).record_id().expect("read record id")
}

/// Log the sandbox in against `server`.
pub fn login(sb: &Sandbox, server: &StubServer) {
    sb.rtc_at(server)
        .args(["login", "--cpf", "123.456.789-01", "--password", "secret1"])
        .assert()
        .success();
}
