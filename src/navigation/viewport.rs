//! ビューポート管理
//!
//! 表示領域と項目のレイアウト矩形から、スクロールが必要かを判定する。

use serde::{Deserialize, Serialize};

/// 項目のスクロール後に上端へ空ける余白
pub const DEFAULT_SCROLL_MARGIN: i64 = 10;

/// 表示領域（縦方向のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// 文書先頭からのスクロール量
    pub scroll_offset: i64,
    /// 表示可能な高さ
    pub height: i64,
}

impl Viewport {
    pub fn new(scroll_offset: i64, height: i64) -> Self {
        Self {
            scroll_offset,
            height,
        }
    }

    /// 表示領域の下端位置
    pub fn bottom(&self) -> i64 {
        self.scroll_offset + self.height
    }
}

/// 項目の描画矩形（縦方向のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBox {
    /// 文書先頭からの上端位置
    pub top: i64,
    pub height: i64,
}

impl ItemBox {
    pub fn new(top: i64, height: i64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> i64 {
        self.top + self.height
    }

    /// 高さ0の矩形は描画されていないものとして扱う
    pub fn has_area(&self) -> bool {
        self.height > 0
    }
}

/// 項目を表示するためのスクロール先を求める
///
/// 項目の下端が表示領域の下にはみ出すか、上端が表示領域より上にある場合に
/// 項目上端から `margin` だけ上の位置を返す。移動量が0なら `None`。
pub fn scroll_target(viewport: Viewport, item: ItemBox, margin: i64) -> Option<i64> {
    let bottom = viewport.bottom();
    let below_fold = bottom - item.bottom() < 0;
    let above_top = bottom - item.top > viewport.height;

    if !(below_fold || above_top) {
        return None;
    }

    let target = (item.top - margin).max(0);
    if target == viewport.scroll_offset {
        None
    } else {
        Some(target)
    }
}
