//! 入力処理モジュール
//!
//! キー正規化、コード照合、コマンド定義、入力ルーティングを提供

pub mod chord;
pub mod commands;
pub mod key;
pub mod matcher;
pub mod router;

// 公開API
pub use chord::{Chord, KeyHistory};
pub use commands::{Command, PageLink};
pub use key::{EventTarget, Key, RawKeyEvent};
pub use matcher::{ChordMatcher, KeyProcessResult};
pub use router::{ClickTarget, InputRouter};
