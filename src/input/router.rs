//! 入力ルーター
//!
//! キー・クリック・フォーム送信を受け取り、コード照合器とナビゲーターへ振り分ける。
//! 各ハンドラは同期的に完了し、外部サービスの呼び出しは高々1回。

use super::commands::{Command, PageLink};
use super::key::RawKeyEvent;
use super::matcher::{ChordMatcher, KeyProcessResult};
use crate::config::Bindings;
use crate::navigation::{Direction, ListNavigator};
use crate::page::{PageDom, ViewMode};
use crate::status::StatusUpdateService;

/// クリック対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// `data-on-click=markPageAsRead` のリンク
    MarkPageRead,
    /// それ以外（確認ダイアログやメニューは扱わない）
    Other(String),
}

/// 入力ルーター
#[derive(Debug, Clone)]
pub struct InputRouter {
    matcher: ChordMatcher<Command>,
    navigator: ListNavigator,
}

impl InputRouter {
    /// キーバインド表からルーターを構築
    pub fn new(bindings: &Bindings, navigator: ListNavigator) -> Self {
        let mut matcher = ChordMatcher::new();
        for binding in bindings.iter() {
            matcher.register(&binding.chord, binding.command);
        }
        Self { matcher, navigator }
    }

    pub fn matcher(&self) -> &ChordMatcher<Command> {
        &self.matcher
    }

    pub fn navigator(&self) -> &ListNavigator {
        &self.navigator
    }

    /// キー入力を処理する
    ///
    /// 実行したコマンドを返す。
    pub fn handle_key<P, S>(&mut self, event: &RawKeyEvent, page: &mut P, service: &mut S) -> Option<Command>
    where
        P: PageDom + ?Sized,
        S: StatusUpdateService + ?Sized,
    {
        match self.matcher.process_key(event) {
            KeyProcessResult::Action(command) => {
                self.execute(command, page, service);
                Some(command)
            }
            KeyProcessResult::Ignored => {
                log::debug!("key {:?} ignored in text control", event.key);
                None
            }
            KeyProcessResult::Pending | KeyProcessResult::NoMatch => None,
        }
    }

    /// クリックを処理する
    pub fn handle_click<P, S>(&mut self, target: &ClickTarget, page: &mut P, service: &mut S)
    where
        P: PageDom + ?Sized,
        S: StatusUpdateService + ?Sized,
    {
        match target {
            ClickTarget::MarkPageRead => self.execute(Command::MarkPageRead, page, service),
            ClickTarget::Other(name) => log::debug!("click on {:?} not handled", name),
        }
    }

    /// フォーム送信時に送信ボタンを読み込み中表示にする
    pub fn handle_form_submit<P: PageDom + ?Sized>(&mut self, page: &mut P) {
        page.begin_submit();
    }

    /// コマンドを実行
    pub fn execute<P, S>(&self, command: Command, page: &mut P, service: &mut S)
    where
        P: PageDom + ?Sized,
        S: StatusUpdateService + ?Sized,
    {
        match command {
            Command::GoToPage(link) => {
                self.navigator.go_to_page(page, link);
            }
            Command::Previous => self.step(page, Direction::Backward, PageLink::Previous),
            Command::Next => self.step(page, Direction::Forward, PageLink::Next),
            Command::OpenSelectedItem => {
                if let Some(url) = page.current_item().and_then(|id| page.item_link(id)) {
                    page.navigate(&url);
                }
            }
            Command::OpenOriginalLink => {
                if let Some(url) = original_link(&*page) {
                    page.open_new_tab(&url);
                }
            }
            Command::ToggleEntryStatus => {
                self.navigator.toggle_current_status(page, service);
            }
            Command::MarkPageRead => {
                self.navigator.mark_page_read(page, service);
            }
        }
    }

    /// 一覧では項目移動、単一表示ではページ移動
    fn step<P: PageDom + ?Sized>(&self, page: &mut P, direction: Direction, fallback: PageLink) {
        match page.view_mode() {
            ViewMode::List => {
                self.navigator.advance(page, direction);
            }
            ViewMode::Single => {
                self.navigator.go_to_page(page, fallback);
            }
        }
    }
}

/// エントリページの元記事リンク、なければ選択中項目の元記事リンク
fn original_link<P: PageDom + ?Sized>(page: &P) -> Option<String> {
    page.entry_original_link()
        .or_else(|| page.current_item().and_then(|id| page.item_original_link(id)))
}
