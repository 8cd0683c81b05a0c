//! tokio_httpfromtcp - Tokio integration for httpfromtcp
//!
//! tokio を使用した非同期 HTTP/1.1 サーバーライブラリ。
//!
//! ## 特徴
//!
//! - **httpfromtcp ベース**: Sans I/O パーサーを `AsyncRead` から駆動する
//! - **1 接続 1 リクエスト**: レスポンスには常に `Connection: close` を付けて接続を閉じる
//! - **ルーティング**: `(メソッド, ターゲット)` の完全一致
//!
//! ## サーバー
//!
//! ```ignore
//! use tokio_httpfromtcp::{Request, Response, Router, Server, StatusCode};
//!
//! let router = Router::new().get("/", |_: &Request| {
//!     Response::new(StatusCode::Ok).body(b"Hello, World!".to_vec())
//! });
//!
//! let server = Server::bind("127.0.0.1:42069").await?;
//! server.serve(router).await?;
//! ```

pub mod error;
pub mod reader;
pub mod router;
pub mod server;

pub use error::{Error, Result};
pub use reader::read_request;
pub use router::Router;
pub use server::{Handler, Server};

// httpfromtcp の型を re-export
pub use httpfromtcp::{ReaderLimits, Request, Response, StatusCode};
