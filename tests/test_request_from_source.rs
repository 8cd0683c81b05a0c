//! バイトソースからのリクエスト読み取りテスト
//!
//! TCP のように、データが任意の位置で分割されて届く状況を `ChunkSource` で再現する。

use std::io;

use httpfromtcp::{ByteSource, Error, ReaderLimits, Request};

const DEFAULT_REQUEST_LINE: &str = "GET /coffee HTTP/1.1\r\n";
const DEFAULT_HEADERS: &str = "Host: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";

/// 1 回の読み取りで最大 `chunk_size` バイトだけ返すソース
struct ChunkSource<'a> {
    data: &'a [u8],
    chunk_size: usize,
}

impl<'a> ChunkSource<'a> {
    fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self { data, chunk_size }
    }
}

impl ByteSource for ChunkSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk_size.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn parse(raw: &str) -> Request {
    parse_chunked(raw, raw.len().max(1))
}

fn parse_chunked(raw: &str, chunk_size: usize) -> Request {
    let mut source = ChunkSource::new(raw.as_bytes(), chunk_size);
    Request::from_source(&mut source).unwrap()
}

fn assert_format_error(request: &Request) {
    match request.error() {
        Some(Error::Format(_)) => {}
        other => panic!("expected format error, got {:?}", other),
    }
}

// ========================================
// リクエストライン
// ========================================

#[test]
fn good_request_lines() {
    let cases = [
        ("GET", "/", "GET / HTTP/1.1\r\n"),
        ("POST", "/", "POST / HTTP/1.1\r\n"),
        ("GET", "/coffee", "GET /coffee HTTP/1.1\r\n"),
        ("POST", "/coffee", "POST /coffee HTTP/1.1\r\n"),
    ];

    for (method, target, line) in cases {
        let request = parse(&format!("{}{}", line, DEFAULT_HEADERS));
        assert!(request.is_ok(), "{:?}", request.error());
        assert_eq!(request.method(), method);
        assert_eq!(request.target(), target);
        assert_eq!(request.http_version(), "1.1");
        assert_eq!(request.header("Host"), Some("localhost:42069"));
        assert_eq!(request.header("User-Agent"), Some("curl/7.81.0"));
        assert_eq!(request.header("Accept"), Some("*/*"));
    }
}

#[test]
fn bad_request_lines() {
    let cases = [
        "/coffee HTTP/1.1\r\n",
        "GET   /   HTTP/1.1\r\n",
        "GET / HTTP/2.1\r\n",
        "GET / HTTP/1.0\r\n",
        "GET / http/1.1\r\n",
        "GET /coffee\r\n",
    ];

    for line in cases {
        let request = parse(&format!("{}{}", line, DEFAULT_HEADERS));
        assert_format_error(&request);
    }
}

#[test]
fn lenient_request_lines() {
    let request = parse(&format!("GET /coffee HTTP/1.1 extra\r\n{}", DEFAULT_HEADERS));
    assert!(request.is_ok(), "{:?}", request.error());
    assert_eq!(request.target(), "/coffee");

    let request = parse(&format!("GET  HTTP/1.1\r\n{}", DEFAULT_HEADERS));
    assert!(request.is_ok(), "{:?}", request.error());
    assert_eq!(request.method(), "GET");
    assert_eq!(request.target(), "");
}

#[test]
fn every_chunk_size_matches_one_shot() {
    let raw = format!(
        "{}{}Content-Length: 13\r\n\r\nhello world!\n",
        "POST /coffee HTTP/1.1\r\n", "Host: localhost:42069\r\nUser-Agent: curl/7.81.0\r\n"
    );
    let expected = parse(&raw);
    assert!(expected.is_ok());

    for chunk_size in 1..=raw.len() {
        assert_eq!(parse_chunked(&raw, chunk_size), expected, "chunk size {}", chunk_size);
    }
}

#[test]
fn variable_chunk_size() {
    for chunk_size in [1, 2, 3, 4, 5, 100] {
        let request = parse_chunked("GET /test HTTP/1.1\r\n\r\n", chunk_size);
        assert!(request.is_ok());
        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/test");
        assert_eq!(request.http_version(), "1.1");
    }
}

// ========================================
// ヘッダー
// ========================================

#[test]
fn standard_headers() {
    let request = parse_chunked(&format!("{}{}", DEFAULT_REQUEST_LINE, DEFAULT_HEADERS), 3);
    assert!(request.is_ok());
    assert_eq!(request.header("host"), Some("localhost:42069"));
    assert_eq!(request.header("user-agent"), Some("curl/7.81.0"));
    assert_eq!(request.header("accept"), Some("*/*"));
    assert_eq!(request.headers().len(), 3);
    assert!(request.body().is_empty());
}

#[test]
fn long_header_block() {
    let headers = "Host: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n";
    let raw = format!("{}{}\r\n", DEFAULT_REQUEST_LINE, headers.repeat(1000));

    let request = parse_chunked(&raw, 1024);
    assert!(request.is_ok());
    assert_eq!(request.header("Host").unwrap().len(), 16998);
    assert_eq!(request.header("User-Agent").unwrap().len(), 12998);
    assert_eq!(request.header("Accept").unwrap().len(), 4998);
    assert_eq!(request.headers().len(), 3);
}

#[test]
fn single_long_header() {
    let raw = format!("{}Host: {}\r\n\r\n", DEFAULT_REQUEST_LINE, "Test, ".repeat(1000));
    let request = parse(&raw);
    assert!(request.is_ok());
    assert_eq!(request.headers().len(), 1);
    assert!(request.header("host").unwrap().ends_with("Test,"));
}

#[test]
fn empty_headers() {
    let request = parse(&format!("{}\r\n", DEFAULT_REQUEST_LINE));
    assert!(request.is_ok());
    assert!(request.headers().is_empty());
}

#[test]
fn duplicate_headers() {
    let request = parse(&format!(
        "{}Host: localhost:42069\r\nHost: www.test.pl\r\n\r\n",
        DEFAULT_REQUEST_LINE
    ));
    assert_eq!(request.header("Host"), Some("localhost:42069, www.test.pl"));
    assert_eq!(request.headers().len(), 1);
}

#[test]
fn malformed_headers() {
    let cases = [
        "Host : localhost:42069\r\nHost: www.test.pl\r\n\r\n",
        ":x\r\n\r\n",
        "Host:\r\n\r\n",
        "Host localhost\r\n\r\n",
        "H@st: localhost\r\n\r\n",
    ];

    for headers in cases {
        let request = parse(&format!("{}{}", DEFAULT_REQUEST_LINE, headers));
        assert_format_error(&request);
    }
}

#[test]
fn latin1_header_value() {
    let mut raw = DEFAULT_REQUEST_LINE.as_bytes().to_vec();
    raw.extend_from_slice(b"X-Name: caf\xe9\r\n\r\n");
    for chunk_size in [1, 4, raw.len()] {
        let mut source = ChunkSource::new(&raw, chunk_size);
        let request = Request::from_source(&mut source).unwrap();
        assert!(request.is_ok(), "{:?}", request.error());
        assert_eq!(request.header("x-name"), Some("caf\u{FFFD}"));
    }
}

#[test]
fn too_many_headers() {
    let headers: String = (0..101).map(|i| format!("X-{}: v\r\n", i)).collect();
    let raw = format!("{}{}\r\n", DEFAULT_REQUEST_LINE, headers);
    let request = parse_chunked(&raw, 64);
    assert_eq!(
        request.error(),
        Some(&Error::TooManyHeaders {
            count: 101,
            limit: 100
        })
    );
}

#[test]
fn missing_end_of_headers() {
    let request = parse(&format!("{}Host: localhost:42069\r\n", DEFAULT_REQUEST_LINE));
    assert_format_error(&request);
}

// ========================================
// ボディ
// ========================================

#[test]
fn standard_body() {
    let raw = "GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";
    for chunk_size in [1, 3, raw.len()] {
        let request = parse_chunked(raw, chunk_size);
        assert!(request.is_ok());
        assert_eq!(request.body(), b"hello world!\n");
    }
}

#[test]
fn body_shorter_than_content_length() {
    let raw = "POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 20\r\n\r\npartial content";
    let request = parse_chunked(raw, 3);
    assert_format_error(&request);
}

#[test]
fn body_without_content_length_is_ignored() {
    let raw = "POST /submit HTTP/1.1\r\nHost: localhost:42069\r\n\r\nhello world!\n";
    let request = parse(raw);
    assert!(request.is_ok());
    assert!(request.body().is_empty());
}

#[test]
fn zero_content_length() {
    let raw = "POST /submit HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
    let request = parse(raw);
    assert!(request.is_ok());
    assert!(request.body().is_empty());
}

#[test]
fn invalid_content_length() {
    for value in ["abc", "-1", "5, 5", "1e3"] {
        let raw = format!("POST /submit HTTP/1.1\r\nContent-Length: {}\r\n\r\nhello", value);
        assert_format_error(&parse(&raw));
    }
}

#[test]
fn body_too_large() {
    let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 100\r\n\r\n";
    let limits = ReaderLimits {
        max_body_size: 10,
        ..ReaderLimits::default()
    };
    let mut data = &raw[..];
    let request = Request::from_source_with_limits(&mut data, &limits).unwrap();
    assert_eq!(
        request.error(),
        Some(&Error::BodyTooLarge {
            size: 100,
            limit: 10
        })
    );
}
