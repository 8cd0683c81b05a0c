//! PBT テスト共通ユーティリティ

use std::io;

use httpfromtcp::ByteSource;
use proptest::prelude::*;

// ========================================
// 分割読み取りソース
// ========================================

/// 1 回の読み取りで最大 `chunk_size` バイトだけ返すソース
#[derive(Debug)]
pub struct ChunkSource<'a> {
    data: &'a [u8],
    chunk_size: usize,
}

impl<'a> ChunkSource<'a> {
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            chunk_size: chunk_size.max(1),
        }
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

// ========================================
// リクエスト要素の生成
// ========================================

/// HTTP メソッド
pub fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
        "[A-Z]{1,10}".prop_map(|s| s),
    ]
}

/// リクエストターゲット (スペースや CRLF を含まない)
pub fn request_target() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        "/[a-zA-Z0-9/_.?=&-]{1,64}".prop_map(|s| s),
    ]
}

/// ヘッダー名: tchar のみ、Content-Length は除く
pub fn header_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!#$%&'*+.^_`|~-]{1,24}"
        .prop_filter("content-length is generated separately", |name| {
            !name.eq_ignore_ascii_case("content-length")
        })
}

/// ヘッダー値: 先頭と末尾は VCHAR、内側に SP を含んでもよい
pub fn header_value() -> impl Strategy<Value = String> {
    "[!-~]([ !-~]{0,30}[!-~])?".prop_map(|s| s)
}

/// ヘッダーのリスト
pub fn headers() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec((header_name(), header_value()), 0..8)
}

/// ボディ
pub fn body() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..256)
}

/// 正しい形式のリクエストをバイト列にする
///
/// ボディが空でなければ Content-Length を付ける。
pub fn encode_request(
    method: &str,
    target: &str,
    headers: &[(String, String)],
    body: &[u8],
) -> Vec<u8> {
    let mut buf = format!("{} {} HTTP/1.1\r\n", method, target).into_bytes();
    for (name, value) in headers {
        buf.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
    }
    if !body.is_empty() {
        buf.extend_from_slice(format!("Content-Length: {}\r\n", body.len()).as_bytes());
    }
    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(body);
    buf
}
