//! tokio-httpfromtcp エラー型

use std::fmt;

/// tokio-httpfromtcp エラー
///
/// リクエストの書式エラーは `Request::error()` に記録されるため、ここには含まれない。
#[derive(Debug)]
pub enum Error {
    /// I/O エラー
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
