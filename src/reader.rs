//! ブロッキング読み取りループ
//!
//! バイトソースから読んだデータを `ReadBuffer` に溜め、`RequestParser` が終端状態に
//! 達するまでパースを繰り返す。

use std::io::{self, ErrorKind};

use crate::buffer::ReadBuffer;
use crate::limits::ReaderLimits;
use crate::parser::RequestParser;
use crate::request::Request;
use crate::source::ByteSource;

/// 1 回の読み取りの結果
enum Fill {
    /// データを読み込んだ
    Read(usize),
    /// 現在読めるデータがない
    Pending,
    /// データ終端
    Eof,
}

/// バイトソースからリクエストを 1 つ読み取る
///
/// 書式エラーは返り値の `Request` に記録される。I/O エラーだけを `Err` で返す。
pub fn read_request<S: ByteSource + ?Sized>(
    source: &mut S,
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
        match fill(source, region)? {
            Fill::Read(n) => {
                tracing::trace!(bytes = n, buffered = buf.len() + n, "read from source");
                buf.advance(n);
            }
            Fill::Pending => std::thread::yield_now(),
            Fill::Eof => {
                tracing::trace!(buffered = buf.len(), "end of data");
                parser.mark_eof();
                break;
            }
        }
    }

    Ok(parser.finish())
}

fn fill<S: ByteSource + ?Sized>(source: &mut S, region: &mut [u8]) -> io::Result<Fill> {
    if !source.data_available() {
        return Ok(Fill::Pending);
    }
    match source.read(region) {
        Ok(0) => Ok(Fill::Eof),
        Ok(n) => Ok(Fill::Read(n.min(region.len()))),
        Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
            Ok(Fill::Pending)
        }
        Err(e) => Err(e),
    }
}
