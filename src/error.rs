//! エラーハンドリングシステム
//!
//! entrynav 全体で使用される統一エラー型を定義する。
//! ナビゲーション本体はエラーを返さず、設定読み込み・ステータス更新・端末制御など
//! 周辺処理のみが `Result` を返す。

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug)]
pub enum EntryNavError {
    /// 入力処理エラー
    #[error("Input processing failed")]
    Input(#[from] InputError),

    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// ステータス更新エラー
    #[error("Status update failed")]
    Status(#[from] StatusError),

    /// UI操作エラー
    #[error("UI operation failed")]
    Ui(#[from] UiError),

    /// ページデータ読み込みエラー
    #[error("Page fixture error: {0}")]
    Page(String),
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },
}

/// 設定固有のエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// ステータス更新サービスのエラー
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("Status log unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot encode status update: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Status update rejected: {reason}")]
    Rejected { reason: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Terminal operation failed: {operation}: {message}")]
    Terminal { operation: String, message: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, EntryNavError>;

/// パニックハンドラの設定
///
/// 端末が raw mode のままにならないよう、パニック時は端末状態を戻してから報告する。
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("PANIC at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        std::process::exit(1);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_wraps_into_crate_error() {
        let error: EntryNavError = ConfigError::InvalidValue {
            key: "scroll_margin".to_string(),
            value: "-1".to_string(),
        }
        .into();

        assert!(matches!(error, EntryNavError::Config(ConfigError::InvalidValue { .. })));
        assert_eq!(error.to_string(), "Configuration error");
    }

    #[test]
    fn status_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: StatusError = io.into();
        assert!(error.to_string().contains("denied"));
    }

    #[test]
    fn input_error_message_names_command() {
        let error = InputError::UnknownCommand {
            command: "fly".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown command: fly");
    }
}
