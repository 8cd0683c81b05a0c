use std::fmt;

/// リクエストパースエラー
///
/// いずれのエラーもパース境界で `Request` に記録され、呼び出し元へは伝播しない。
/// I/O エラーはこの型に含めず `std::io::Error` のまま返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 書式エラー (リクエストライン、ヘッダー行、Content-Length、ボディ長の不整合)
    Format(String),
    /// バッファサイズ超過
    BufferOverflow { size: usize, limit: usize },
    /// ヘッダー数超過
    TooManyHeaders { count: usize, limit: usize },
    /// ボディサイズ超過
    BodyTooLarge { size: usize, limit: usize },
}

impl Error {
    /// 書式エラーを作成
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// 書式エラーかどうか
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(msg) => write!(f, "format error: {}", msg),
            Error::BufferOverflow { size, limit } => {
                write!(f, "buffer overflow: {} > {}", size, limit)
            }
            Error::TooManyHeaders { count, limit } => {
                write!(f, "too many headers: {} > {}", count, limit)
            }
            Error::BodyTooLarge { size, limit } => {
                write!(f, "body too large: {} > {}", size, limit)
            }
        }
    }
}

impl std::error::Error for Error {}
