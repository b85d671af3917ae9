//! メモリ上のページモデル
//!
//! JSON から読み込める。遷移やタブ表示は記録するだけで実際には行わない。

use super::PageDom;
use crate::error::{EntryNavError, Result};
use crate::input::commands::PageLink;
use crate::navigation::viewport::{ItemBox, Viewport};
use crate::status::{EntryStatus, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 一覧の1項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    /// 描画矩形（`None` は非表示）
    #[serde(default)]
    pub layout: Option<ItemBox>,
    #[serde(default)]
    pub status: Option<EntryStatus>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub original_link: Option<String>,
}

impl Item {
    /// 描画済みの項目
    pub fn new(id: ItemId, layout: ItemBox) -> Self {
        Self {
            id,
            title: String::new(),
            layout: Some(layout),
            status: None,
            current: false,
            link: None,
            original_link: None,
        }
    }

    /// 非表示（描画矩形なし）の項目
    pub fn hidden(id: ItemId) -> Self {
        Self {
            layout: None,
            ..Self::new(id, ItemBox::new(0, 0))
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_links(mut self, link: impl Into<String>, original_link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self.original_link = Some(original_link.into());
        self
    }

    pub fn current(mut self) -> Self {
        self.current = true;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.layout.is_some_and(|layout| layout.has_area())
    }
}

/// 送信ボタン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitButton {
    pub label: String,
    pub loading_label: String,
    #[serde(default)]
    pub disabled: bool,
}

/// ページ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// 項目一覧（`None` は単一エントリページ）
    #[serde(default)]
    pub items: Option<Vec<Item>>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub links: HashMap<PageLink, String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub entry_original_link: Option<String>,
    #[serde(default)]
    pub submit_button: Option<SubmitButton>,
    #[serde(skip)]
    location: Option<String>,
    #[serde(skip)]
    opened_tabs: Vec<String>,
    #[serde(skip)]
    scroll_count: usize,
}

impl Page {
    /// 項目一覧ページ
    pub fn list(items: Vec<Item>) -> Self {
        Self {
            items: Some(items),
            ..Self::default()
        }
    }

    /// 単一エントリページ
    pub fn single() -> Self {
        Self::default()
    }

    /// 高さ `item_height` の項目を上から順に並べた一覧ページ
    pub fn stacked(items: impl IntoIterator<Item = Item>, item_height: i64) -> Self {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, mut item)| {
                if item.layout.is_some() {
                    item.layout = Some(ItemBox::new(index as i64 * item_height, item_height));
                }
                item
            })
            .collect();
        Self::list(items)
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_link(mut self, link: PageLink, url: impl Into<String>) -> Self {
        self.links.insert(link, url.into());
        self
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn with_entry_original_link(mut self, url: impl Into<String>) -> Self {
        self.entry_original_link = Some(url.into());
        self
    }

    pub fn with_submit_button(mut self, label: impl Into<String>, loading_label: impl Into<String>) -> Self {
        self.submit_button = Some(SubmitButton {
            label: label.into(),
            loading_label: loading_label.into(),
            disabled: false,
        });
        self
    }

    /// JSON 文字列から読み込む
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| EntryNavError::Page(err.to_string()))
    }

    /// JSON ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| EntryNavError::Page(format!("{}: {}", path.display(), err)))?;
        Self::from_json(&content)
    }

    /// デモ用の一覧ページ
    pub fn sample() -> Self {
        let items = (1..=12).map(|id| {
            let status = if id % 4 == 0 {
                EntryStatus::Read
            } else {
                EntryStatus::Unread
            };
            Item::new(id, ItemBox::new(0, 0))
                .with_title(format!("Entry #{}", id))
                .with_status(status)
                .with_links(
                    format!("/unread/entry/{}", id),
                    format!("https://example.org/articles/{}", id),
                )
        });

        Self::stacked(items, 3)
            .with_viewport(Viewport::new(0, 20))
            .with_link(PageLink::Unread, "/unread")
            .with_link(PageLink::History, "/history")
            .with_link(PageLink::Feeds, "/feeds")
            .with_link(PageLink::Categories, "/categories")
            .with_link(PageLink::Settings, "/settings")
            .with_link(PageLink::Next, "/unread?offset=12")
            .with_csrf_token("sample-token")
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or(&[])
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items().iter().find(|item| item.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items
            .as_mut()
            .and_then(|items| items.iter_mut().find(|item| item.id == id))
    }

    /// 最後に遷移した先
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// 新しいタブで開いたリンク（開いた順）
    pub fn opened_tabs(&self) -> &[String] {
        &self.opened_tabs
    }

    /// 実際にスクロール位置が変わった回数
    pub fn scroll_count(&self) -> usize {
        self.scroll_count
    }

    /// 文書全体の高さ
    pub fn document_height(&self) -> i64 {
        self.items()
            .iter()
            .filter_map(|item| item.layout.map(|layout| layout.bottom()))
            .max()
            .unwrap_or(0)
    }
}

impl PageDom for Page {
    fn has_item_list(&self) -> bool {
        self.items.is_some()
    }

    fn item_ids(&self) -> Vec<ItemId> {
        self.items().iter().map(|item| item.id).collect()
    }

    fn item_box(&self, id: ItemId) -> Option<ItemBox> {
        self.item(id).and_then(|item| item.layout)
    }

    fn visible_items(&self) -> Vec<ItemId> {
        self.items()
            .iter()
            .filter(|item| item.is_visible())
            .map(|item| item.id)
            .collect()
    }

    fn current_item(&self) -> Option<ItemId> {
        self.items().iter().find(|item| item.current).map(|item| item.id)
    }

    fn set_current(&mut self, id: ItemId, current: bool) {
        if current {
            // マーカーは常に高々1項目
            if let Some(items) = self.items.as_mut() {
                for item in items.iter_mut() {
                    item.current = false;
                }
            }
        }
        if let Some(item) = self.item_mut(id) {
            item.current = current;
        }
    }

    fn item_status(&self, id: ItemId) -> Option<EntryStatus> {
        self.item(id).and_then(|item| item.status)
    }

    fn set_item_status(&mut self, id: ItemId, status: EntryStatus) {
        if let Some(item) = self.item_mut(id) {
            item.status = Some(status);
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, offset: i64) {
        let offset = offset.max(0);
        if offset != self.viewport.scroll_offset {
            self.viewport.scroll_offset = offset;
            self.scroll_count += 1;
        }
    }

    fn page_link(&self, link: PageLink) -> Option<String> {
        self.links.get(&link).cloned()
    }

    fn item_link(&self, id: ItemId) -> Option<String> {
        self.item(id).and_then(|item| item.link.clone())
    }

    fn item_original_link(&self, id: ItemId) -> Option<String> {
        self.item(id).and_then(|item| item.original_link.clone())
    }

    fn entry_original_link(&self) -> Option<String> {
        self.entry_original_link.clone()
    }

    fn navigate(&mut self, url: &str) {
        log::debug!("navigate to {}", url);
        self.location = Some(url.to_string());
    }

    fn open_new_tab(&mut self, url: &str) {
        log::debug!("open {} in new tab", url);
        self.opened_tabs.push(url.to_string());
    }

    fn csrf_token(&self) -> Option<String> {
        self.csrf_token.clone()
    }

    fn begin_submit(&mut self) {
        if let Some(button) = self.submit_button.as_mut() {
            button.label = button.loading_label.clone();
            button.disabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ViewMode;

    #[test]
    fn view_mode_follows_item_list() {
        assert_eq!(Page::list(vec![]).view_mode(), ViewMode::List);
        assert_eq!(Page::single().view_mode(), ViewMode::Single);
    }

    #[test]
    fn hidden_items_are_not_visible() {
        let page = Page::stacked(
            vec![
                Item::new(1, ItemBox::new(0, 0)),
                Item::hidden(2),
                Item::new(3, ItemBox::new(0, 0)),
            ],
            50,
        );
        assert_eq!(page.item_ids(), vec![1, 2, 3]);
        assert_eq!(page.visible_items(), vec![1, 3]);
        assert_eq!(page.item_box(3), Some(ItemBox::new(100, 50)));
    }

    #[test]
    fn zero_height_layout_is_not_visible() {
        let page = Page::list(vec![
            Item::new(1, ItemBox::new(0, 0)),
            Item::new(2, ItemBox::new(0, 40)),
            Item::hidden(3),
        ]);
        assert!(!page.item(1).unwrap().is_visible());
        assert_eq!(page.visible_items(), vec![2]);
        assert_eq!(page.document_height(), 40);
    }

    #[test]
    fn setting_current_clears_previous_marker() {
        let mut page = Page::stacked(
            vec![Item::new(1, ItemBox::new(0, 0)).current(), Item::new(2, ItemBox::new(0, 0))],
            10,
        );
        page.set_current(2, true);
        assert_eq!(page.current_item(), Some(2));
        assert!(!page.item(1).unwrap().current);
    }

    #[test]
    fn scroll_to_counts_only_real_moves() {
        let mut page = Page::list(vec![]).with_viewport(Viewport::new(0, 100));
        page.scroll_to(40);
        page.scroll_to(40);
        page.scroll_to(-5);
        assert_eq!(page.viewport().scroll_offset, 0);
        assert_eq!(page.scroll_count(), 2);
    }

    #[test]
    fn begin_submit_switches_to_loading_label() {
        let mut page = Page::single().with_submit_button("Save", "Loading...");
        page.begin_submit();
        let button = page.submit_button.as_ref().unwrap();
        assert_eq!(button.label, "Loading...");
        assert!(button.disabled);
    }

    #[test]
    fn page_deserializes_from_json() {
        let page = Page::from_json(
            r#"{
                "items": [
                    {"id": 10, "title": "a", "layout": {"top": 0, "height": 40}, "status": "unread"},
                    {"id": 11, "title": "b", "status": "read"}
                ],
                "viewport": {"scroll_offset": 0, "height": 300},
                "links": {"next": "/unread?offset=2"},
                "csrf_token": "abc"
            }"#,
        )
        .unwrap();

        assert_eq!(page.visible_items(), vec![10]);
        assert_eq!(page.item_status(11), Some(EntryStatus::Read));
        assert_eq!(page.page_link(PageLink::Next).as_deref(), Some("/unread?offset=2"));
        assert_eq!(page.csrf_token().as_deref(), Some("abc"));
    }

    #[test]
    fn invalid_json_is_page_error() {
        assert!(matches!(Page::from_json("{"), Err(EntryNavError::Page(_))));
    }
}
