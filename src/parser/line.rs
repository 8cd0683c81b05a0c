//! 行単位の共通処理

use std::borrow::Cow;

/// 行終端
pub(crate) const CRLF: &[u8] = b"\r\n";

/// CRLF で終わる行を探す
pub(crate) fn find_line(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == CRLF)
}

/// 行を文字列として取り出す
///
/// UTF-8 として不正なバイト (obs-text など) は U+FFFD に置き換える。
/// 置き換え後の文字はトークン文字ではないため、名前やメソッドの検証では弾かれる。
pub(crate) fn line_text(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}

/// OWS (SP / HTAB) を取り除く
pub(crate) fn trim_ows(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || c == '\t')
}

/// トークン文字か確認
pub(crate) fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'0'..=b'9' | b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}

/// ヘッダー名が有効か確認
pub(crate) fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_token_char)
}
