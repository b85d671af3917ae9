//! 設定
//!
//! 起動時に一度だけ組み立てるキーバインド表と、JSON 設定ファイルの読み込み

use crate::error::{ConfigError, Result};
use crate::input::commands::{Command, PageLink};
use crate::logging::LogLevel;
use crate::navigation::DEFAULT_SCROLL_MARGIN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// コード表記とコマンドの組
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub chord: String,
    pub command: Command,
}

impl Binding {
    pub fn new(chord: impl Into<String>, command: Command) -> Self {
        Self {
            chord: chord.into(),
            command,
        }
    }
}

/// キーバインド表（登録順を保持）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings(Vec<Binding>);

impl Bindings {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self(bindings)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Bindings {
    /// 標準のキーバインド
    fn default() -> Self {
        use Command::*;

        Self(vec![
            Binding::new("g u", GoToPage(PageLink::Unread)),
            Binding::new("g h", GoToPage(PageLink::History)),
            Binding::new("g f", GoToPage(PageLink::Feeds)),
            Binding::new("g c", GoToPage(PageLink::Categories)),
            Binding::new("g s", GoToPage(PageLink::Settings)),
            Binding::new("ArrowLeft", Previous),
            Binding::new("ArrowRight", Next),
            Binding::new("j", Previous),
            Binding::new("p", Previous),
            Binding::new("k", Next),
            Binding::new("n", Next),
            Binding::new("h", GoToPage(PageLink::Previous)),
            Binding::new("l", GoToPage(PageLink::Next)),
            Binding::new("o", OpenSelectedItem),
            Binding::new("v", OpenOriginalLink),
            Binding::new("m", ToggleEntryStatus),
            Binding::new("A", MarkPageRead),
        ])
    }
}

/// 設定ファイルの内容
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// 標準表を置き換えるキーバインド
    pub bindings: Option<Bindings>,
    pub scroll_margin: i64,
    /// 状態更新要求の記録先
    pub status_log: Option<String>,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: None,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
            status_log: None,
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

impl Settings {
    /// 標準の設定ファイルパス
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("entrynav").join("config.json"))
    }

    /// JSON 文字列から読み込む
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|err| ConfigError::InvalidFile {
                path: origin.to_string(),
                message: err.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// 設定ファイルを読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// 標準パスから読み込む。ファイルがなければ既定値
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.scroll_margin < 0 {
            return Err(ConfigError::InvalidValue {
                key: "scroll_margin".to_string(),
                value: self.scroll_margin.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// 有効なキーバインド表
    pub fn bindings(&self) -> Bindings {
        self.bindings.clone().unwrap_or_default()
    }

    /// `~` を展開した状態更新記録先
    pub fn status_log_path(&self) -> Option<PathBuf> {
        self.status_log.as_deref().map(expand_path)
    }

    /// `~` を展開したログファイル
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(expand_path)
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
