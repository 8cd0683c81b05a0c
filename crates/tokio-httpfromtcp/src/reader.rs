//! 非同期読み取りループ
//!
//! `AsyncRead` から読んだデータを `ReadBuffer` に溜め、パーサーが終端状態に達するまで
//! パースを繰り返す。ブロッキング版の `httpfromtcp::read_request` と同じ結果を返す。

use std::io;

use httpfromtcp::{ReadBuffer, ReaderLimits, Request, RequestParser};
use tokio::io::{AsyncRead, AsyncReadExt};

/// 非同期ストリームからリクエストを 1 つ読み取る
///
/// `read` が 0 を返したらデータ終端として扱う。
/// 書式エラーは返り値の `Request` に記録され、I/O エラーだけを `Err` で返す。
pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    limits: &ReaderLimits,
) -> io::Result<Request> {
    let mut parser = RequestParser::with_limits(limits.clone());
    let mut buf = ReadBuffer::new(limits.initial_buffer_size, limits.max_buffer_size);

    loop {
        parser.parse_buffered(&mut buf);
        if parser.is_terminal() {
            break;
        }

        let region = match buf.unfilled_mut() {
            Ok(region) => region,
            Err(e) => {
                parser.fail(e);
                break;
            }
        };
        let n = reader.read(region).await?;
        if n == 0 {
            tracing::trace!(buffered = buf.len(), "end of stream");
            parser.mark_eof();
            break;
        }
        tracing::trace!(bytes = n, "read from stream");
        buf.advance(n);
    }

    Ok(parser.finish())
}
