//! キー入力の内部表現
//!
//! ブラウザ由来のキー名（`event.key` 相当）を正規化したトークンとして扱う。

use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一部のプラットフォームが報告する短いキー名と、照合に使う正規名の対応表
const KEY_ALIASES: [(&str, &str); 5] = [
    ("Esc", "Escape"),
    ("Up", "ArrowUp"),
    ("Down", "ArrowDown"),
    ("Left", "ArrowLeft"),
    ("Right", "ArrowRight"),
];

/// 正規化済みキートークン
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key(String);

impl Key {
    /// 生のキー名を正規化する
    ///
    /// 対応表にない名前はそのまま通す。
    pub fn normalize(raw: &str) -> Self {
        let canonical = KEY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(raw);
        Self(canonical.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

/// キーイベントの送り先要素
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventTarget {
    /// ページ本体（ショートカット有効）
    #[default]
    Document,
    /// テキスト入力欄
    Input,
    /// 複数行テキスト欄
    TextArea,
    /// その他の要素（タグ名）
    Element(String),
}

impl EventTarget {
    /// 文字入力を受け付ける要素かどうか
    pub fn accepts_text(&self) -> bool {
        matches!(self, EventTarget::Input | EventTarget::TextArea)
    }
}

/// 正規化前のキーダウンイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    /// プラットフォームが報告したキー名
    pub key: String,
    /// イベントの送り先
    pub target: EventTarget,
}

impl RawKeyEvent {
    /// ページ本体に送られたキーイベント
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: EventTarget::Document,
        }
    }

    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }
}

/// crossterm統合
///
/// 矢印キーと Esc は短い名前で報告し、正規化の経路を通す。
/// Ctrl/Alt 付きのキーと対応のないキーは `Err(())`。
impl TryFrom<KeyEvent> for RawKeyEvent {
    type Error = ();

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        if event.modifiers.intersects(CrosstermModifiers::CONTROL | CrosstermModifiers::ALT) {
            return Err(());
        }

        let key = match event.code {
            CrosstermKeyCode::Char(c) => c.to_string(),
            CrosstermKeyCode::Up => "Up".to_string(),
            CrosstermKeyCode::Down => "Down".to_string(),
            CrosstermKeyCode::Left => "Left".to_string(),
            CrosstermKeyCode::Right => "Right".to_string(),
            CrosstermKeyCode::Esc => "Esc".to_string(),
            CrosstermKeyCode::Enter => "Enter".to_string(),
            CrosstermKeyCode::Tab => "Tab".to_string(),
            CrosstermKeyCode::Backspace => "Backspace".to_string(),
            CrosstermKeyCode::Delete => "Delete".to_string(),
            CrosstermKeyCode::Home => "Home".to_string(),
            CrosstermKeyCode::End => "End".to_string(),
            CrosstermKeyCode::PageUp => "PageUp".to_string(),
            CrosstermKeyCode::PageDown => "PageDown".to_string(),
            CrosstermKeyCode::F(n) => format!("F{}", n),
            _ => return Err(()),
        };

        Ok(RawKeyEvent::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_aliases_normalize_to_long_names() {
        assert_eq!(Key::normalize("Esc").as_str(), "Escape");
        assert_eq!(Key::normalize("Up").as_str(), "ArrowUp");
        assert_eq!(Key::normalize("Down").as_str(), "ArrowDown");
        assert_eq!(Key::normalize("Left").as_str(), "ArrowLeft");
        assert_eq!(Key::normalize("Right").as_str(), "ArrowRight");
    }

    #[test]
    fn unmapped_keys_pass_through() {
        assert_eq!(Key::normalize("ArrowLeft").as_str(), "ArrowLeft");
        assert_eq!(Key::normalize("g").as_str(), "g");
        assert_eq!(Key::normalize("A").as_str(), "A");
        // 大文字小文字は区別する
        assert_eq!(Key::normalize("up").as_str(), "up");
    }

    #[test]
    fn text_controls_accept_text() {
        assert!(EventTarget::Input.accepts_text());
        assert!(EventTarget::TextArea.accepts_text());
        assert!(!EventTarget::Document.accepts_text());
        assert!(!EventTarget::Element("BUTTON".into()).accepts_text());
    }

    #[test]
    fn crossterm_arrow_reports_short_name() {
        let event = KeyEvent::new(CrosstermKeyCode::Left, CrosstermModifiers::NONE);
        let raw = RawKeyEvent::try_from(event).unwrap();
        assert_eq!(raw.key, "Left");
        assert_eq!(Key::normalize(&raw.key).as_str(), "ArrowLeft");
    }

    #[test]
    fn crossterm_shifted_char_keeps_case() {
        let event = KeyEvent::new(CrosstermKeyCode::Char('A'), CrosstermModifiers::SHIFT);
        let raw = RawKeyEvent::try_from(event).unwrap();
        assert_eq!(raw.key, "A");
    }

    #[test]
    fn crossterm_ctrl_chord_is_not_routed() {
        let event = KeyEvent::new(CrosstermKeyCode::Char('c'), CrosstermModifiers::CONTROL);
        assert!(RawKeyEvent::try_from(event).is_err());
    }
}
