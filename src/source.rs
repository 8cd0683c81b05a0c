//! バイトソース
//!
//! 読み取りバッファにデータを供給する側の抽象。

use std::io::{self, Cursor, Read};
use std::net::TcpStream;

/// リクエストの読み取り元
///
/// `read` は呼び出し元の領域にデータを書き込み、書き込んだバイト数を返す。
/// 0 は読み取りを試みた結果のデータ終端を意味する。
/// ノンブロッキングなソースは `ErrorKind::WouldBlock` を返してよく、その場合は
/// 「現在読めるデータがない」として扱われる。
pub trait ByteSource {
    /// 領域にデータを読み込む
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// 読み取り待ちのデータがあるかどうか
    ///
    /// `false` を返すと読み取りを行わずに 0 バイトとして扱う。
    /// 有限のメモリ上のソースは終端に達するまで常に `true` を返す。
    fn data_available(&self) -> bool {
        true
    }
}

impl ByteSource for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }
}

impl ByteSource for TcpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn data_available(&self) -> bool {
        (**self).data_available()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn data_available(&self) -> bool {
        (**self).data_available()
    }
}

/// 任意の `std::io::Read` を `ByteSource` として扱うアダプター
#[derive(Debug)]
pub struct ReadSource<R>(pub R);

impl<R: Read> ByteSource for ReadSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R> ReadSource<R> {
    /// 内部のリーダーを取り出す
    pub fn into_inner(self) -> R {
        self.0
    }
}
