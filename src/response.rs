use std::fmt;

use crate::parser::{CRLF, Headers};

/// ステータスコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// 数値のステータスコード
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// ステータスフレーズ
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// ステータスコードが成功 (2xx) か確認
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason_phrase())
    }
}

const NOT_FOUND_PAGE: &str = "<html>
  <head>
    <title>404 Not Found</title>
  </head>
  <body>
    <h1>404 - Page not found</h1>
  </body>
</html>";

/// HTTP レスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// ステータスコード
    pub status: StatusCode,
    /// ヘッダー
    pub headers: Headers,
    /// ボディ
    pub body: Vec<u8>,
}

impl Response {
    /// 新しいレスポンスを作成
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// 404 ページ
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
            .header("Content-Type", "text/html")
            .body(NOT_FOUND_PAGE.as_bytes().to_vec())
    }

    /// 400 レスポンス (理由をテキストで返す)
    pub fn bad_request(reason: &str) -> Self {
        Self::new(StatusCode::BadRequest).body(reason.as_bytes().to_vec())
    }

    /// ヘッダーを追加 (ビルダーパターン)
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// ボディを設定 (ビルダーパターン)
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// 既定のヘッダーを設定
    ///
    /// - `content-length`: ボディ長
    /// - `connection`: close (1 接続 1 リクエスト)
    /// - `content-type`: 未設定なら text/plain
    pub fn add_default_headers(&mut self) {
        self.headers
            .set("Content-Length", &self.body.len().to_string());
        self.headers.set("Connection", "close");
        if !self.headers.contains("Content-Type") {
            self.headers.set("Content-Type", "text/plain");
        }
    }

    /// レスポンスをバイト列にエンコード
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        // Status line: HTTP-version SP status-code SP reason-phrase CRLF
        buf.extend_from_slice(b"HTTP/1.1 ");
        buf.extend_from_slice(self.status.to_string().as_bytes());
        buf.extend_from_slice(CRLF);

        // Headers
        for (name, value) in self.headers.iter() {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(CRLF);
        }

        // End of headers
        buf.extend_from_slice(CRLF);

        // Body
        buf.extend_from_slice(&self.body);

        buf
    }
}
