//! コード（連続キー）とキー履歴
//!
//! "g u" のような空白区切りの表記を1〜2個のキートークン列として保持する。

use super::key::Key;
use std::fmt;

/// キーシーケンス（連続キー対応）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    notation: String,
    keys: Vec<Key>,
}

impl Chord {
    /// 文字列表現からパース
    ///
    /// 失敗しない。空の表記や3キー以上の表記も受け付けるが、決してマッチしない。
    pub fn parse(notation: &str) -> Self {
        let keys = notation.split_whitespace().map(Key::normalize).collect();
        Self {
            notation: notation.to_string(),
            keys,
        }
    }

    /// 登録時の表記
    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// マッチし得ない表記かどうか
    pub fn is_inert(&self) -> bool {
        self.keys.is_empty() || self.keys.len() > KeyHistory::CAPACITY
    }

    /// 履歴の先頭から位置ごとに一致するか
    pub fn matches_history(&self, history: &KeyHistory) -> bool {
        if self.is_inert() || self.keys.len() > history.len() {
            return false;
        }
        self.keys
            .iter()
            .zip(history.keys())
            .all(|(expected, typed)| expected == typed)
    }

    /// 単一キーのコードが直前のキーと一致するか
    pub fn matches_single(&self, key: &Key) -> bool {
        self.keys.len() == 1 && &self.keys[0] == key
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation)
    }
}

/// 直近のキー入力履歴（最大2件）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyHistory {
    keys: Vec<Key>,
}

impl KeyHistory {
    /// 保持するキーの上限
    pub const CAPACITY: usize = 2;

    pub fn new() -> Self {
        Self {
            keys: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// キーを追加
    ///
    /// 上限に達している場合は最古のキーを捨てる。照合側が上限到達時に
    /// クリアするため通常は起きない。
    pub fn push(&mut self, key: Key) {
        if self.keys.len() >= Self::CAPACITY {
            self.keys.remove(0);
        }
        self.keys.push(key);
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.keys.len() >= Self::CAPACITY
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
