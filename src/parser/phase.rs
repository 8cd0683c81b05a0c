//! パース状態の定義

/// パース状態
///
/// `Initialized → ParsingHeaders → ParsingBody → Done` の順に進む。
/// `Error` は最初の 3 状態のいずれからも遷移する吸収状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// リクエストライン待ち
    Initialized,
    /// ヘッダー待ち
    ParsingHeaders,
    /// ボディ読み取り中
    ParsingBody,
    /// 完了
    Done,
    /// エラー
    Error,
}

impl ParseState {
    /// 終端状態 (`Done` または `Error`) かどうか
    pub fn is_terminal(&self) -> bool {
        matches!(self, ParseState::Done | ParseState::Error)
    }
}
