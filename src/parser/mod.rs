//! HTTP/1.1 リクエストパーサーモジュール
//!
//! Sans I/O 設計のインクリメンタルパーサーを提供。
//! データが 1 バイトずつ届いても、一括で届いた場合と同じ結果になる。
//!
//! ## 構成
//!
//! - `RequestLine::parse`: リクエストライン
//! - `Headers::parse`: ヘッダー 1 行 (空行でブロック終了)
//! - `BodyReader`: Content-Length 分のボディ
//! - `RequestParser`: 上記を順に駆動する状態機械
//!
//! ## 使い方
//!
//! ```rust
//! use httpfromtcp::{Headers, HeadersProgress};
//!
//! let mut headers = Headers::new();
//! let progress = headers.parse(b"Host: a\r\n\r\n").unwrap();
//! assert_eq!(progress, HeadersProgress::Field { consumed: 9 });
//! headers.parse(b"Host: b\r\n\r\n").unwrap();
//! assert_eq!(headers.get("host"), Some("a, b"));
//! ```

mod body;
mod headers;
mod line;
mod phase;
mod request;
mod request_line;

// 公開 API
pub use body::{BodyProgress, BodyReader};
pub use headers::{Headers, HeadersProgress};
pub use phase::ParseState;
pub use request::RequestParser;
pub use request_line::{HTTP_VERSION, RequestLine};

pub(crate) use line::CRLF;
