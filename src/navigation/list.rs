//! 一覧ナビゲーション
//!
//! 表示中の項目列における選択マーカーの移動と、既読/未読の切り替え手順を扱う。
//!
//! マーカーの状態遷移:
//! - 未選択 → 先頭項目（最初の移動。方向によらず先頭）
//! - 項目X → 隣の項目Y（範囲内の移動）
//! - 項目X → 未選択（端での移動）

use super::viewport::{scroll_target, DEFAULT_SCROLL_MARGIN};
use crate::input::commands::PageLink;
use crate::page::PageDom;
use crate::status::{self, EntryStatus, ItemId, StatusUpdateRequest, StatusUpdateService};

/// 移動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// 一覧ナビゲーター
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListNavigator {
    scroll_margin: i64,
}

impl ListNavigator {
    pub fn new() -> Self {
        Self::with_scroll_margin(DEFAULT_SCROLL_MARGIN)
    }

    pub fn with_scroll_margin(scroll_margin: i64) -> Self {
        Self { scroll_margin }
    }

    /// 選択マーカーを1つ進める/戻す
    ///
    /// 移動後に選択されている項目を返す。
    pub fn advance<P: PageDom + ?Sized>(&self, page: &mut P, direction: Direction) -> Option<ItemId> {
        let items = page.visible_items();
        let first = *items.first()?;

        let Some(current) = page.current_item() else {
            page.set_current(first, true);
            return Some(first);
        };

        // 選択中の項目が非表示なら何もしない
        let index = items.iter().position(|id| *id == current)?;
        page.set_current(current, false);

        let neighbor = match direction {
            Direction::Forward => index.checked_add(1).filter(|next| *next < items.len()),
            Direction::Backward => index.checked_sub(1),
        };

        match neighbor {
            Some(next) => {
                let id = items[next];
                page.set_current(id, true);
                self.scroll_into_view(page, id);
                Some(id)
            }
            None => None,
        }
    }

    /// 項目が表示領域に入るようスクロールする
    ///
    /// 実際にスクロールした場合は `true`。
    pub fn scroll_into_view<P: PageDom + ?Sized>(&self, page: &mut P, id: ItemId) -> bool {
        let Some(layout) = page.item_box(id) else {
            return false;
        };

        match scroll_target(page.viewport(), layout, self.scroll_margin) {
            Some(offset) => {
                page.scroll_to(offset);
                true
            }
            None => false,
        }
    }

    /// 表示中の全項目を既読にして次のページへ進む
    ///
    /// 新たに既読にした項目の識別子を返す。既に既読の項目は要求に含めない。
    /// 更新要求は空でなければ1回だけ送る。
    pub fn mark_page_read<P, S>(&self, page: &mut P, service: &mut S) -> Vec<ItemId>
    where
        P: PageDom + ?Sized,
        S: StatusUpdateService + ?Sized,
    {
        let mut entry_ids = Vec::new();
        for id in page.visible_items() {
            if page.item_status(id) != Some(EntryStatus::Read) {
                entry_ids.push(id);
            }
            page.set_item_status(id, EntryStatus::Read);
        }

        if !entry_ids.is_empty() {
            let token = page.csrf_token().unwrap_or_default();
            status::dispatch(
                service,
                StatusUpdateRequest::new(entry_ids.clone(), EntryStatus::Read, token),
            );
        }

        self.go_to_page(page, PageLink::Next);
        entry_ids
    }

    /// 選択中項目の既読/未読を切り替える
    ///
    /// 先にマーカーを次の項目へ進めてから元の項目の状態を反転する。
    /// 状態クラスを持たない項目では何もしない。新しい状態を返す。
    pub fn toggle_current_status<P, S>(&self, page: &mut P, service: &mut S) -> Option<EntryStatus>
    where
        P: PageDom + ?Sized,
        S: StatusUpdateService + ?Sized,
    {
        let current = page.current_item()?;
        let Some(status) = page.item_status(current) else {
            log::debug!("entry {} has no status; toggle skipped", current);
            return None;
        };

        self.advance(page, Direction::Forward);

        let new_status = status.toggled();
        page.set_item_status(current, new_status);

        let token = page.csrf_token().unwrap_or_default();
        status::dispatch(service, StatusUpdateRequest::new(vec![current], new_status, token));
        Some(new_status)
    }

    /// `data-page` リンクへ遷移する。リンクがなければ何もしない
    pub fn go_to_page<P: PageDom + ?Sized>(&self, page: &mut P, link: PageLink) -> bool {
        match page.page_link(link) {
            Some(url) => {
                page.navigate(&url);
                true
            }
            None => false,
        }
    }
}

impl Default for ListNavigator {
    fn default() -> Self {
        Self::new()
    }
}
