//! テスト用: 1 リクエストだけ受けて決まったレスポンスを返す HTTP サーバ

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct CannedResponse {
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
}

impl CannedResponse {
    pub fn ok(content_type: &'static str, body: &'static str) -> Self {
        Self::status("200 OK", content_type, body)
    }

    pub fn status(status_line: &'static str, content_type: &'static str, body: &'static str) -> Self {
        Self {
            status_line,
            content_type,
            body,
        }
    }
}

/// 受け取ったリクエスト（ヘッダ部と本文）
pub struct CapturedRequest {
    head: String,
    body: String,
}

impl CapturedRequest {
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.head.starts_with(prefix)
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

pub struct TestServer {
    pub url: String,
    rx: mpsc::Receiver<CapturedRequest>,
}

impl TestServer {
    pub fn request(&self) -> CapturedRequest {
        self.rx
            .recv_timeout(Duration::from_secs(10))
            .expect("server received a request")
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse().ok())
        .unwrap_or(0)
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            if buf.len() >= pos + 4 + content_length(&head) {
                break;
            }
        }
    }
    let text = String::from_utf8_lossy(&buf).to_string();
    let (head, body) = text.split_once("\r\n\r\n").unwrap_or((text.as_str(), ""));
    CapturedRequest {
        head: head.to_string(),
        body: body.to_string(),
    }
}

/// 127.0.0.1 の空きポートで 1 回だけ応答する。URL のパスは `/request/rag_model/lcel`
pub fn serve_once(response: CannedResponse) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let raw = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response.status_line,
            response.content_type,
            response.body.len(),
            response.body
        );
        stream.write_all(raw.as_bytes()).unwrap();
        stream.flush().unwrap();
        let _ = tx.send(request);
    });
    TestServer {
        url: format!("http://{}/request/rag_model/lcel", addr),
        rx,
    }
}
