//! 読み取りバッファ
//!
//! ソケットから読んだバイト列をパーサーに渡すための可変長バッファ。
//! 有効データは常に先頭から `len` バイトに連続して置かれる。

use crate::error::Error;

/// 読み取りバッファ
///
/// - `unfilled_mut()` で空き領域を取得して読み込み、`advance()` で有効データに加える
/// - `filled()` をパーサーに渡し、消費されたバイト数を `consume()` で先頭から取り除く
/// - 空きがなくなると容量を 2 倍に拡張する
#[derive(Debug)]
pub struct ReadBuffer {
    buf: Vec<u8>,
    len: usize,
    max_size: usize,
}

impl ReadBuffer {
    /// 初期容量と最大容量を指定してバッファを作成
    pub fn new(initial_size: usize, max_size: usize) -> Self {
        let initial_size = initial_size.min(max_size);
        Self {
            buf: vec![0; initial_size],
            len: 0,
            max_size,
        }
    }

    /// 未パースの有効データ
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// 読み込み用の空き領域を取得
    ///
    /// 空きがない場合は容量を 2 倍にしてから返す。
    /// 最大容量に達している場合は `Error::BufferOverflow` を返す。
    pub fn unfilled_mut(&mut self) -> Result<&mut [u8], Error> {
        if self.len == self.buf.len() {
            self.grow()?;
        }
        Ok(&mut self.buf[self.len..])
    }

    /// 読み込んだバイト数だけ有効データを伸ばす
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.len + n <= self.buf.len());
        self.len = (self.len + n).min(self.buf.len());
    }

    /// 先頭から `n` バイトを取り除き、残りを先頭に詰める
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.len);
        if n == 0 {
            return;
        }
        self.buf.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// 有効データのバイト数
    pub fn len(&self) -> usize {
        self.len
    }

    /// 有効データが空かどうか
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 現在の容量
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn grow(&mut self) -> Result<(), Error> {
        let current = self.buf.len();
        if current >= self.max_size {
            return Err(Error::BufferOverflow {
                size: current.saturating_add(1),
                limit: self.max_size,
            });
        }
        let new_size = current.saturating_mul(2).max(1).min(self.max_size);
        self.buf.resize(new_size, 0);
        tracing::debug!(from = current, to = new_size, "grew read buffer");
        Ok(())
    }
}
