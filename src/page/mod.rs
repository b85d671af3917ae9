//! ページ状態
//!
//! サーバーが描画したページを、ナビゲーションから読み書きする境界として抽象化する。
//! 項目の生成・削除は行わず、選択マーカー・既読状態・スクロール位置・遷移先のみを変更する。

mod model;

pub use model::{Item, Page, SubmitButton};

use crate::input::commands::PageLink;
use crate::navigation::viewport::{ItemBox, Viewport};
use crate::status::{EntryStatus, ItemId};

/// 表示モード（保存せず、項目一覧コンテナの有無から導く）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// 項目一覧ページ
    List,
    /// 単一エントリページ
    Single,
}

/// ページ操作のインターフェース
pub trait PageDom {
    /// 項目一覧コンテナがあるか
    fn has_item_list(&self) -> bool;

    /// 全項目の識別子（文書順、非表示を含む）
    fn item_ids(&self) -> Vec<ItemId>;

    /// 項目の描画矩形。描画されていない項目は `None`
    fn item_box(&self, id: ItemId) -> Option<ItemBox>;

    /// 選択マーカーを持つ項目
    fn current_item(&self) -> Option<ItemId>;

    /// 選択マーカーの付け外し
    fn set_current(&mut self, id: ItemId, current: bool);

    /// 既読状態。どちらのクラスも持たない場合は `None`
    fn item_status(&self, id: ItemId) -> Option<EntryStatus>;

    fn set_item_status(&mut self, id: ItemId, status: EntryStatus);

    fn viewport(&self) -> Viewport;

    fn scroll_to(&mut self, offset: i64);

    /// `data-page` 属性付きリンクの遷移先
    fn page_link(&self, link: PageLink) -> Option<String>;

    /// 項目タイトルのリンク
    fn item_link(&self, id: ItemId) -> Option<String>;

    /// 項目の元記事リンク
    fn item_original_link(&self, id: ItemId) -> Option<String>;

    /// 単一エントリページの元記事リンク
    fn entry_original_link(&self) -> Option<String>;

    /// 同じタブで遷移
    fn navigate(&mut self, url: &str);

    fn open_new_tab(&mut self, url: &str);

    /// ページに埋め込まれた CSRF トークン
    fn csrf_token(&self) -> Option<String>;

    /// フォーム送信中表示に切り替える
    fn begin_submit(&mut self);

    fn view_mode(&self) -> ViewMode {
        if self.has_item_list() {
            ViewMode::List
        } else {
            ViewMode::Single
        }
    }

    /// 描画されている項目（文書順）
    ///
    /// 描画矩形があり、高さが0でない項目だけを含む。
    fn visible_items(&self) -> Vec<ItemId> {
        self.item_ids()
            .into_iter()
            .filter(|id| self.item_box(*id).is_some_and(|layout| layout.has_area()))
            .collect()
    }
}
