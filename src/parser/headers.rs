//! ヘッダーブロックのパース
//!
//! ```text
//! *( field-line CRLF )
//! CRLF
//!
//! field-line = field-name ":" OWS field-value OWS
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::Error;

use super::line::{CRLF, find_line, is_valid_header_name, line_text, trim_ows};

/// ヘッダー 1 行のパース結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadersProgress {
    /// CRLF がまだ届いていない (追加データが必要)
    Incomplete,
    /// ヘッダー行を 1 行読み取った
    Field { consumed: usize },
    /// 空行を読み取った (ヘッダーブロック終了)
    Complete { consumed: usize },
}

impl HeadersProgress {
    /// 消費したバイト数
    pub fn consumed(&self) -> usize {
        match self {
            HeadersProgress::Incomplete => 0,
            HeadersProgress::Field { consumed } | HeadersProgress::Complete { consumed } => {
                *consumed
            }
        }
    }
}

/// ヘッダーテーブル
///
/// 名前は小文字に正規化して保持し、同じ名前は 1 エントリにまとめる。
/// 2 回目以降の値は `", "` 区切りで既存の値に連結する。
/// 名前から位置への索引を持ち、検索と追加はヘッダー数によらない。
/// 列挙は最初に現れた順。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Headers {
    /// 空のヘッダーテーブルを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    pub fn get(&self, name: &str) -> Option<&str> {
        let i = *self.index.get(&name.to_ascii_lowercase())?;
        Some(self.entries[i].1.as_str())
    }

    /// ヘッダーが存在するか確認
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// すべてのヘッダーを (小文字の名前, 値) で列挙
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ヘッダーを追加
    ///
    /// 同じ名前が既にある場合は `", "` 区切りで値を連結する。
    pub fn insert(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.index.get(&name) {
            Some(&i) => {
                let existing = &mut self.entries[i].1;
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => self.push(name, value),
        }
    }

    /// ヘッダーを設定
    ///
    /// 同じ名前が既にある場合は値を置き換える。
    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = value.to_string(),
            None => self.push(name, value),
        }
    }

    fn push(&mut self, name: String, value: &str) {
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value.to_string()));
    }

    /// Content-Length ヘッダーを解析
    ///
    /// ヘッダーがない場合は `Ok(None)`、数値でない場合はエラー。
    pub fn content_length(&self) -> Result<Option<usize>, Error> {
        let Some(value) = self.get("Content-Length") else {
            return Ok(None);
        };
        let value = trim_ows(value);
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::format(format!(
                "invalid Content-Length: not a number: {:?}",
                value
            )));
        }
        value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| Error::format(format!("invalid Content-Length: overflow: {:?}", value)))
    }

    /// バッファ先頭のヘッダー行を 1 行パース
    ///
    /// 空行の場合は `Complete` を返す。CRLF がない場合は何も消費せず `Incomplete` を返す。
    pub fn parse(&mut self, data: &[u8]) -> Result<HeadersProgress, Error> {
        let Some(pos) = find_line(data) else {
            return Ok(HeadersProgress::Incomplete);
        };
        if pos == 0 {
            return Ok(HeadersProgress::Complete {
                consumed: CRLF.len(),
            });
        }

        let line = line_text(&data[..pos]);
        let (name, value) = parse_field_line(&line)?;
        self.insert(&name, value);

        Ok(HeadersProgress::Field {
            consumed: pos + CRLF.len(),
        })
    }
}

/// field-line を検証して (小文字の名前, 値) を返す
fn parse_field_line(line: &str) -> Result<(String, &str), Error> {
    let trimmed = trim_ows(line);

    let Some((raw_name, raw_value)) = trimmed.split_once(':') else {
        return Err(Error::format(format!(
            "invalid header line {:?}: missing colon",
            line
        )));
    };

    let name = trim_ows(raw_name);
    let value = trim_ows(raw_value);
    if name.is_empty() {
        return Err(Error::format(format!(
            "invalid header line {:?}: empty name",
            line
        )));
    }
    if value.is_empty() {
        return Err(Error::format(format!(
            "invalid header line {:?}: empty value",
            line
        )));
    }
    if name.len() != raw_name.len() {
        return Err(Error::format(format!(
            "invalid header line {:?}: whitespace before colon",
            line
        )));
    }

    let name = name.to_ascii_lowercase();
    if !is_valid_header_name(&name) {
        return Err(Error::format(format!(
            "invalid header line {:?}: invalid character in name",
            line
        )));
    }

    Ok((name, value))
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
