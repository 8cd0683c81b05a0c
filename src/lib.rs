//! # httpfromtcp
//!
//! バイトストリームから HTTP/1.1 リクエストを 1 つ読み取るライブラリ
//!
//! ## 特徴
//!
//! - **Sans I/O**: パーサーは I/O を持たず、渡されたバイト列だけを見る
//! - **インクリメンタル**: データがどの位置で分割されて届いても結果は同じ
//! - **エラーは値**: 書式エラーは `Request::error()` に記録され、I/O エラーだけが `Err` になる
//!
//! ## 使い方
//!
//! ### ブロッキング読み取り
//!
//! ```rust
//! use httpfromtcp::Request;
//!
//! let mut data: &[u8] = b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";
//! let request = Request::from_source(&mut data).unwrap();
//! assert!(request.is_ok());
//! assert_eq!(request.method(), "POST");
//! assert_eq!(request.body(), b"hello world!\n");
//! ```
//!
//! ### パーサーを直接使う
//!
//! ```rust
//! use httpfromtcp::{ParseState, RequestParser};
//!
//! let mut parser = RequestParser::new();
//! let consumed = parser.parse(b"GET / HTTP/1.1\r\n");
//! assert_eq!(consumed, 16);
//! assert_eq!(parser.state(), ParseState::ParsingHeaders);
//! parser.parse(b"\r\n");
//! assert_eq!(parser.state(), ParseState::Done);
//! ```
//!
//! ### レスポンスを作成
//!
//! ```rust
//! use httpfromtcp::{Response, StatusCode};
//!
//! let mut response = Response::new(StatusCode::Ok).body(b"Hello, World!".to_vec());
//! response.add_default_headers();
//! let bytes = response.encode();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

mod buffer;
mod error;
mod limits;
pub mod parser;
mod reader;
mod request;
mod response;
mod source;

pub use buffer::ReadBuffer;
pub use error::Error;
pub use limits::ReaderLimits;
pub use parser::{
    BodyProgress, BodyReader, HTTP_VERSION, Headers, HeadersProgress, ParseState, RequestLine,
    RequestParser,
};
pub use reader::read_request;
pub use request::Request;
pub use response::{Response, StatusCode};
pub use source::{ByteSource, ReadSource};
