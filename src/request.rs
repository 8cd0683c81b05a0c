use std::io::{self, Read};

use crate::error::Error;
use crate::limits::ReaderLimits;
use crate::parser::{Headers, RequestLine};
use crate::reader::read_request;
use crate::source::{ByteSource, ReadSource};

/// HTTP リクエスト
///
/// パーサーだけが組み立て、終端状態に達した後は読み取り専用になる。
/// 不正なリクエストは `error()` に理由を持つ通常の値として返される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub(crate) request_line: RequestLine,
    pub(crate) headers: Headers,
    pub(crate) body: Vec<u8>,
    pub(crate) error: Option<Error>,
}

impl Request {
    /// バイトソースからリクエストを 1 つ読み取る
    ///
    /// 書式エラーは `Ok(request)` の `error()` に記録される。
    /// `Err` を返すのはソースの I/O エラーのみ。
    ///
    /// ```rust
    /// use httpfromtcp::Request;
    ///
    /// let mut data: &[u8] = b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
    /// let request = Request::from_source(&mut data).unwrap();
    /// assert!(request.error().is_none());
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.header("host"), Some("localhost:42069"));
    /// ```
    pub fn from_source<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Self> {
        read_request(source, &ReaderLimits::default())
    }

    /// 制限付きでバイトソースからリクエストを 1 つ読み取る
    pub fn from_source_with_limits<S: ByteSource + ?Sized>(
        source: &mut S,
        limits: &ReaderLimits,
    ) -> io::Result<Self> {
        read_request(source, limits)
    }

    /// 任意の `std::io::Read` からリクエストを 1 つ読み取る
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        Self::from_source(&mut ReadSource(reader))
    }

    /// リクエストライン
    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    /// HTTP メソッド
    pub fn method(&self) -> &str {
        &self.request_line.method
    }

    /// リクエストターゲット
    pub fn target(&self) -> &str {
        &self.request_line.target
    }

    /// HTTP バージョン ("1.1")
    pub fn http_version(&self) -> &str {
        &self.request_line.http_version
    }

    /// ヘッダーテーブル
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// ボディ
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// パースエラー
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// エラーなしでパースできたかどうか
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// エラーがあれば `Err` に変換する
    pub fn into_result(self) -> Result<Self, Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }
}
