//! コマンドシステム
//!
//! コード表から呼び出される操作の定義と、設定ファイル用のコマンド名

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ページ内リンクの種類（`data-page` 属性の値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLink {
    Unread,
    History,
    Feeds,
    Categories,
    Settings,
    Previous,
    Next,
}

impl PageLink {
    pub fn as_str(self) -> &'static str {
        match self {
            PageLink::Unread => "unread",
            PageLink::History => "history",
            PageLink::Feeds => "feeds",
            PageLink::Categories => "categories",
            PageLink::Settings => "settings",
            PageLink::Previous => "previous",
            PageLink::Next => "next",
        }
    }
}

/// ルーターが実行するコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Command {
    /// 指定ページへ移動
    GoToPage(PageLink),
    /// 一覧では前の項目、単一表示では前のページ
    Previous,
    /// 一覧では次の項目、単一表示では次のページ
    Next,
    /// 選択中項目を開く
    OpenSelectedItem,
    /// 元記事を新しいタブで開く
    OpenOriginalLink,
    /// 選択中項目の既読/未読を切り替え
    ToggleEntryStatus,
    /// 表示中の項目をすべて既読にする
    MarkPageRead,
}

impl Command {
    /// 全コマンド（名前の一覧表示用）
    pub const ALL: [Command; 13] = [
        Command::GoToPage(PageLink::Unread),
        Command::GoToPage(PageLink::History),
        Command::GoToPage(PageLink::Feeds),
        Command::GoToPage(PageLink::Categories),
        Command::GoToPage(PageLink::Settings),
        Command::GoToPage(PageLink::Previous),
        Command::GoToPage(PageLink::Next),
        Command::Previous,
        Command::Next,
        Command::OpenSelectedItem,
        Command::OpenOriginalLink,
        Command::ToggleEntryStatus,
        Command::MarkPageRead,
    ];

    /// コマンド名
    pub fn name(self) -> &'static str {
        match self {
            Command::GoToPage(PageLink::Unread) => "go-to-unread",
            Command::GoToPage(PageLink::History) => "go-to-history",
            Command::GoToPage(PageLink::Feeds) => "go-to-feeds",
            Command::GoToPage(PageLink::Categories) => "go-to-categories",
            Command::GoToPage(PageLink::Settings) => "go-to-settings",
            Command::GoToPage(PageLink::Previous) => "go-to-previous-page",
            Command::GoToPage(PageLink::Next) => "go-to-next-page",
            Command::Previous => "previous",
            Command::Next => "next",
            Command::OpenSelectedItem => "open-selected-item",
            Command::OpenOriginalLink => "open-original-link",
            Command::ToggleEntryStatus => "toggle-entry-status",
            Command::MarkPageRead => "mark-page-read",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .iter()
            .copied()
            .find(|command| command.name() == s)
            .ok_or_else(|| InputError::UnknownCommand {
                command: s.to_string(),
            })
    }
}

impl TryFrom<String> for Command {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.name().to_string()
    }
}
