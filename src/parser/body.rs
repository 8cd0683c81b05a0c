//! Content-Length で区切られたボディの読み取り

use crate::error::Error;

/// ボディ読み取りの進捗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyProgress {
    /// まだ宣言長に達していない
    Continue { consumed: usize },
    /// 宣言長ちょうどに達した
    Complete { consumed: usize },
}

impl BodyProgress {
    /// 消費したバイト数
    pub fn consumed(&self) -> usize {
        match self {
            BodyProgress::Continue { consumed } | BodyProgress::Complete { consumed } => *consumed,
        }
    }
}

/// ボディリーダー
///
/// 宣言されたバイト数だけを読み取り、それ以降のデータには手を付けない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyReader {
    declared: usize,
}

impl BodyReader {
    /// 宣言長を指定してリーダーを作成
    pub fn new(declared: usize) -> Self {
        Self { declared }
    }

    /// 宣言長
    pub fn declared(&self) -> usize {
        self.declared
    }

    /// 利用可能なデータを宣言長まで `body` に追加
    pub fn read(&self, body: &mut Vec<u8>, data: &[u8]) -> Result<BodyProgress, Error> {
        self.check_overrun(body)?;

        let remaining = self.declared - body.len();
        let take = remaining.min(data.len());
        body.extend_from_slice(&data[..take]);

        self.check_overrun(body)?;
        if body.len() == self.declared {
            Ok(BodyProgress::Complete { consumed: take })
        } else {
            Ok(BodyProgress::Continue { consumed: take })
        }
    }

    /// データ終端に達したときの検証
    pub fn finish(&self, body: &[u8]) -> Result<(), Error> {
        if body.len() < self.declared {
            return Err(Error::format(format!(
                "body shorter than declared length: {} < {}",
                body.len(),
                self.declared
            )));
        }
        self.check_overrun(body)
    }

    fn check_overrun(&self, body: &[u8]) -> Result<(), Error> {
        if body.len() > self.declared {
            return Err(Error::format(format!(
                "body longer than declared length: {} > {}",
                body.len(),
                self.declared
            )));
        }
        Ok(())
    }
}
