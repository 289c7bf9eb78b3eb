#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

use serde_json::Value;

pub const HAIKU_INVOKE_PATH: &str = "/model/anthropic.claude-3-haiku-20240307-v1:0/invoke";

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn reply(text: &str) -> Self {
        Self::new(
            200,
            serde_json::json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": text}],
                "stop_reason": "end_turn",
            })
            .to_string(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

/// Serves `responses` in order, one connection each, and hands back what it saw.
pub fn spawn_server(responses: Vec<CannedResponse>) -> (SocketAddr, JoinHandle<Vec<CapturedRequest>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("address should be available");

    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for response in responses {
            let (stream, _) = listener.accept().expect("accept should succeed");
            let mut reader = BufReader::new(stream.try_clone().expect("clone should succeed"));
            captured.push(read_request(&mut reader));

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                response.body.len(),
                response.body
            )
            .expect("response should be written");
            stream.flush().expect("response should flush");
        }
        captured
    });

    (addr, handle)
}

fn read_request(reader: &mut impl BufRead) -> CapturedRequest {
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("request line should be readable");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header should be readable");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).expect("body should be readable");

    CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8(body).expect("body should be utf-8"),
    }
}
