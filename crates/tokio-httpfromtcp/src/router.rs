//! ルーティング
//!
//! `(メソッド, ターゲット)` の完全一致でハンドラーを選ぶ。
//!
//! ```rust
//! use tokio_httpfromtcp::{Request, Response, Router, StatusCode};
//!
//! let router = Router::new()
//!     .get("/", |_: &Request| Response::new(StatusCode::Ok).body(b"ok".to_vec()))
//!     .post("/echo", |request: &Request| {
//!         Response::new(StatusCode::Ok).body(request.body().to_vec())
//!     });
//!
//! let mut data: &[u8] = b"GET /missing HTTP/1.1\r\n\r\n";
//! let request = Request::from_source(&mut data).unwrap();
//! assert_eq!(router.dispatch(&request).status, StatusCode::NotFound);
//! ```

use std::fmt;
use std::future::Future;

use httpfromtcp::{Request, Response};

use crate::server::Handler;

type Route = Box<dyn Fn(&Request) -> Response + Send + Sync>;

/// ルートテーブル
#[derive(Default)]
pub struct Router {
    routes: Vec<(String, String, Route)>,
}

impl Router {
    /// 空のルートテーブルを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ルートを登録
    ///
    /// 同じ `(method, target)` が登録済みの場合は置き換える。
    pub fn route<F>(mut self, method: &str, target: &str, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.routes.retain(|(m, t, _)| !(m == method && t == target));
        self.routes
            .push((method.to_string(), target.to_string(), Box::new(handler)));
        self
    }

    /// GET ルートを登録
    pub fn get<F>(self, target: &str, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.route("GET", target, handler)
    }

    /// POST ルートを登録
    pub fn post<F>(self, target: &str, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.route("POST", target, handler)
    }

    /// 登録済みルート数
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// ルートが未登録かどうか
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// リクエストをハンドラーに振り分ける
    ///
    /// - パースエラーを持つリクエスト: 400 (エラーメッセージ)
    /// - 一致するルートなし: 404 ページ
    pub fn dispatch(&self, request: &Request) -> Response {
        if let Some(error) = request.error() {
            return Response::bad_request(&error.to_string());
        }

        let route = self
            .routes
            .iter()
            .find(|(method, target, _)| method == request.method() && target == request.target());
        match route {
            Some((_, _, handler)) => handler(request),
            None => {
                tracing::debug!(
                    method = request.method(),
                    target = request.target(),
                    "no matching route"
                );
                Response::not_found()
            }
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.routes
                    .iter()
                    .map(|(method, target, _)| format!("{} {}", method, target)),
            )
            .finish()
    }
}

impl Handler for Router {
    fn handle(&self, request: Request) -> impl Future<Output = Response> + Send {
        std::future::ready(self.dispatch(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpfromtcp::StatusCode;

    fn parse(raw: &[u8]) -> Request {
        let mut data = raw;
        Request::from_source(&mut data).unwrap()
    }

    fn router() -> Router {
        Router::new()
            .get("/", |_: &Request| {
                Response::new(StatusCode::Ok).body(b"root".to_vec())
            })
            .post("/echo", |request: &Request| {
                Response::new(StatusCode::Ok).body(request.body().to_vec())
            })
    }

    #[test]
    fn matching_route() {
        let response = router().dispatch(&parse(b"GET / HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(response.body, b"root");
    }

    #[test]
    fn method_must_match() {
        let response = router().dispatch(&parse(b"POST / HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status, StatusCode::NotFound);
    }

    #[test]
    fn target_must_match_exactly() {
        let response = router().dispatch(&parse(b"GET /echo HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status, StatusCode::NotFound);
        let response = router().dispatch(&parse(b"GET /?q=1 HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status, StatusCode::NotFound);
    }

    #[test]
    fn echo_body() {
        let response =
            router().dispatch(&parse(b"POST /echo HTTP/1.1\r\nContent-Length: 4\r\n\r\nping"));
        assert_eq!(response.body, b"ping");
    }

    #[test]
    fn malformed_request_is_bad_request() {
        let response = router().dispatch(&parse(b"GET / HTTP/1.0\r\n\r\n"));
        assert_eq!(response.status, StatusCode::BadRequest);
        assert!(String::from_utf8(response.body).unwrap().starts_with("format error"));
    }

    #[test]
    fn later_route_replaces_earlier() {
        let router = router().get("/", |_: &Request| Response::new(StatusCode::InternalServerError));
        assert_eq!(router.len(), 2);
        let response = router.dispatch(&parse(b"GET / HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status, StatusCode::InternalServerError);
    }

    #[test]
    fn debug_lists_routes() {
        assert_eq!(format!("{:?}", router()), r#"["GET /", "POST /echo"]"#);
    }
}
