//! entrynav - フィードリーダーのキーボードナビゲーション
//!
//! コード照合エンジンと一覧ナビゲーションの状態機械を中心に、
//! ページ状態・状態更新サービスとの境界を定義する。

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// ロジック層
pub mod input;
pub mod navigation;

// 外部との境界
pub mod page;
pub mod status;

// 表示層
pub mod frontend;

// 公開API
pub use config::{Binding, Bindings, Settings};
pub use error::{EntryNavError, Result};
pub use frontend::TuiApplication;
pub use input::{ChordMatcher, ClickTarget, Command, InputRouter, KeyProcessResult, PageLink, RawKeyEvent};
pub use navigation::{Direction, ListNavigator};
pub use page::{Item, Page, PageDom, ViewMode};
pub use status::{EntryStatus, JsonLinesStatusService, RecordingStatusService, StatusUpdateRequest, StatusUpdateService};
