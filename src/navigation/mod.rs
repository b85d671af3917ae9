//! ナビゲーションモジュール
//!
//! 一覧の選択マーカー移動とビューポート追従を提供

pub mod list;
pub mod viewport;

pub use list::{Direction, ListNavigator};
pub use viewport::{ItemBox, Viewport, DEFAULT_SCROLL_MARGIN};
