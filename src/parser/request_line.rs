//! リクエストラインのパース
//!
//! request-line = method SP request-target SP HTTP-version CRLF

use std::fmt;

use crate::error::Error;

use super::line::{CRLF, find_line, line_text};

/// サポートする HTTP バージョン
pub const HTTP_VERSION: &str = "1.1";

/// リクエストライン
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    /// HTTP メソッド (GET, POST, etc.)
    pub method: String,
    /// リクエストターゲット
    pub target: String,
    /// HTTP バージョン ("HTTP/" を除いた "1.1")
    pub http_version: String,
}

impl RequestLine {
    /// バッファ先頭のリクエストラインをパース
    ///
    /// CRLF がまだ届いていない場合は `Ok(None)` を返す。
    /// 成功時は CRLF を含む消費バイト数を返す。
    pub fn parse(data: &[u8]) -> Result<Option<(RequestLine, usize)>, Error> {
        let Some(pos) = find_line(data) else {
            return Ok(None);
        };
        let line = line_text(&data[..pos]);

        // 4 つ目以降のトークンは無視する
        let parts: Vec<&str> = line.split(' ').collect();
        let &[method, target, version, ..] = parts.as_slice() else {
            return Err(Error::format(format!(
                "invalid request line: expected 3 parts, got {}: {:?}",
                parts.len(),
                line
            )));
        };

        if method.is_empty() {
            return Err(Error::format(format!(
                "invalid request line: empty method: {:?}",
                line
            )));
        }

        let http_version = parse_http_version(version)?;

        let request_line = RequestLine {
            method: method.to_string(),
            target: target.to_string(),
            http_version: http_version.to_string(),
        };
        Ok(Some((request_line, pos + CRLF.len())))
    }
}

/// "HTTP/1.1" からバージョン部分を取り出す
fn parse_http_version(token: &str) -> Result<&str, Error> {
    let parts: Vec<&str> = token.split('/').collect();
    let &[name, version] = parts.as_slice() else {
        return Err(Error::format(format!(
            "invalid HTTP version token: {:?}",
            token
        )));
    };
    if name != "HTTP" {
        return Err(Error::format(format!(
            "invalid HTTP version token: {:?}",
            token
        )));
    }
    if version != HTTP_VERSION {
        return Err(Error::format(format!(
            "unsupported HTTP version: {:?}",
            version
        )));
    }
    Ok(version)
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} HTTP/{}", self.method, self.target, self.http_version)
    }
}
