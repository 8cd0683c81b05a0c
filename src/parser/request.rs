//! リクエストの状態機械

use crate::buffer::ReadBuffer;
use crate::error::Error;
use crate::limits::ReaderLimits;
use crate::request::Request;

use super::body::{BodyProgress, BodyReader};
use super::headers::HeadersProgress;
use super::phase::ParseState;
use super::request_line::RequestLine;

/// HTTP リクエストパーサー (Sans I/O)
///
/// `parse()` にバッファ先頭の未パースデータを渡すと、消費したバイト数を返す。
/// 構造単位 (行やボディ片) を完結できるだけのデータがない場合は 0 を返し、
/// エラーにはしない。
///
/// サブパーサーのエラーはここで捕捉して `ParseState::Error` に遷移し、
/// `Request` のエラーとして保持する。
///
/// ```rust
/// use httpfromtcp::{ParseState, RequestParser};
///
/// let mut parser = RequestParser::new();
/// let data = b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
///
/// let mut offset = 0;
/// while !parser.is_terminal() {
///     let consumed = parser.parse(&data[offset..]);
///     assert!(consumed > 0);
///     offset += consumed;
/// }
/// assert_eq!(parser.state(), ParseState::Done);
///
/// let request = parser.finish();
/// assert_eq!(request.target(), "/coffee");
/// assert_eq!(request.headers().get("Host"), Some("localhost:42069"));
/// ```
#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    request: Request,
    body: BodyReader,
    limits: ReaderLimits,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    /// 新しいパーサーを作成
    pub fn new() -> Self {
        Self::with_limits(ReaderLimits::default())
    }

    /// 制限付きでパーサーを作成
    pub fn with_limits(limits: ReaderLimits) -> Self {
        Self {
            state: ParseState::Initialized,
            request: Request::default(),
            body: BodyReader::new(0),
            limits,
        }
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &ReaderLimits {
        &self.limits
    }

    /// 現在の状態
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// 終端状態 (`Done` または `Error`) かどうか
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// パース途中のリクエスト
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// データをパースし、消費したバイト数を返す
    ///
    /// 1 回の呼び出しで処理するのは 1 つの構造単位 (リクエストライン、ヘッダー 1 行、
    /// 利用可能なボディ片) まで。終端状態では何も消費しない。
    pub fn parse(&mut self, data: &[u8]) -> usize {
        match self.step(data) {
            Ok(consumed) => {
                tracing::trace!(consumed, state = ?self.state, "parsed");
                consumed
            }
            Err(e) => {
                self.fail(e);
                0
            }
        }
    }

    /// バッファの未パースデータを消費できる限りパースし、消費分をバッファから取り除く
    ///
    /// 消費した合計バイト数を返す。
    pub fn parse_buffered(&mut self, buf: &mut ReadBuffer) -> usize {
        let mut total = 0;
        while !self.is_terminal() {
            let consumed = self.parse(buf.filled());
            if consumed == 0 {
                break;
            }
            buf.consume(consumed);
            total += consumed;
        }
        total
    }

    /// データ終端に達したことを通知する
    ///
    /// リクエストが完結していなければエラーに遷移する。
    pub fn mark_eof(&mut self) {
        let result = match self.state {
            ParseState::Initialized => Err(Error::format(
                "unexpected end of data before end of request line",
            )),
            ParseState::ParsingHeaders => Err(Error::format(
                "unexpected end of data before end of header block",
            )),
            ParseState::ParsingBody => self.body.finish(&self.request.body),
            ParseState::Done | ParseState::Error => return,
        };
        match result {
            Ok(()) => self.transition(ParseState::Done),
            Err(e) => self.fail(e),
        }
    }

    /// エラーを記録して `Error` 状態に遷移する
    ///
    /// 既に終端状態の場合は何もしない。
    pub fn fail(&mut self, error: Error) {
        if self.is_terminal() {
            return;
        }
        tracing::debug!(state = ?self.state, %error, "request parse failed");
        self.request.error = Some(error);
        self.state = ParseState::Error;
    }

    /// パース結果のリクエストを取り出す
    pub fn finish(self) -> Request {
        self.request
    }

    fn step(&mut self, data: &[u8]) -> Result<usize, Error> {
        match self.state {
            ParseState::Initialized => match RequestLine::parse(data)? {
                Some((request_line, consumed)) => {
                    self.request.request_line = request_line;
                    self.transition(ParseState::ParsingHeaders);
                    Ok(consumed)
                }
                None => Ok(0),
            },
            ParseState::ParsingHeaders => {
                let progress = self.request.headers.parse(data)?;
                match progress {
                    HeadersProgress::Incomplete => {}
                    HeadersProgress::Field { .. } => self.check_headers_count()?,
                    HeadersProgress::Complete { .. } => self.start_body()?,
                }
                Ok(progress.consumed())
            }
            ParseState::ParsingBody => {
                let progress = self.body.read(&mut self.request.body, data)?;
                if let BodyProgress::Complete { .. } = progress {
                    self.transition(ParseState::Done);
                }
                Ok(progress.consumed())
            }
            ParseState::Done | ParseState::Error => Ok(0),
        }
    }

    /// 同名ヘッダーは連結されるため、異なる名前の数を制限と比べる
    fn check_headers_count(&self) -> Result<(), Error> {
        let count = self.request.headers.len();
        if count > self.limits.max_headers_count {
            return Err(Error::TooManyHeaders {
                count,
                limit: self.limits.max_headers_count,
            });
        }
        Ok(())
    }

    /// ヘッダーブロック終了後、Content-Length からボディの有無を決める
    fn start_body(&mut self) -> Result<(), Error> {
        match self.request.headers.content_length()? {
            None | Some(0) => self.transition(ParseState::Done),
            Some(len) => {
                if len > self.limits.max_body_size {
                    return Err(Error::BodyTooLarge {
                        size: len,
                        limit: self.limits.max_body_size,
                    });
                }
                self.body = BodyReader::new(len);
                tracing::trace!(declared = self.body.declared(), "body expected");
                self.transition(ParseState::ParsingBody);
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: ParseState) {
        tracing::debug!(from = ?self.state, to = ?next, "request parse state");
        self.state = next;
    }
}
