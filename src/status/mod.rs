//! エントリ状態更新
//!
//! 既読/未読の更新要求と、それを受け取る外部サービスの境界を定義する。
//! 要求は投げっぱなしで、失敗してもローカル状態は巻き戻さない。

mod journal;

pub use journal::JsonLinesStatusService;

use crate::error::StatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// エントリ識別子
pub type ItemId = i64;

/// エントリの既読状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Read,
    Unread,
}

impl EntryStatus {
    /// 反対の状態
    pub fn toggled(self) -> Self {
        match self {
            EntryStatus::Read => EntryStatus::Unread,
            EntryStatus::Unread => EntryStatus::Read,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryStatus::Read => "read",
            EntryStatus::Unread => "unread",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 状態更新要求
///
/// 本文は `{"entry_ids": [...], "status": "read"}`。CSRF トークンはヘッダ相当として別に運ぶ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub entry_ids: Vec<ItemId>,
    pub status: EntryStatus,
    #[serde(skip)]
    pub csrf_token: String,
}

impl StatusUpdateRequest {
    pub fn new(entry_ids: Vec<ItemId>, status: EntryStatus, csrf_token: impl Into<String>) -> Self {
        Self {
            entry_ids,
            status,
            csrf_token: csrf_token.into(),
        }
    }
}

/// 状態更新サービス
///
/// 1回の操作につき1回だけ呼ばれる。バッチ操作でも項目ごとには呼ばれない。
pub trait StatusUpdateService {
    fn update_entries(&mut self, request: &StatusUpdateRequest) -> Result<(), StatusError>;
}

impl<S: StatusUpdateService + ?Sized> StatusUpdateService for &mut S {
    fn update_entries(&mut self, request: &StatusUpdateRequest) -> Result<(), StatusError> {
        (**self).update_entries(request)
    }
}

impl<S: StatusUpdateService + ?Sized> StatusUpdateService for Box<S> {
    fn update_entries(&mut self, request: &StatusUpdateRequest) -> Result<(), StatusError> {
        (**self).update_entries(request)
    }
}

/// 要求をメモリに保持するだけのサービス
#[derive(Debug, Clone, Default)]
pub struct RecordingStatusService {
    requests: Vec<StatusUpdateRequest>,
}

impl RecordingStatusService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 受け取った要求（受信順）
    pub fn requests(&self) -> &[StatusUpdateRequest] {
        &self.requests
    }

    pub fn take_requests(&mut self) -> Vec<StatusUpdateRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl StatusUpdateService for RecordingStatusService {
    fn update_entries(&mut self, request: &StatusUpdateRequest) -> Result<(), StatusError> {
        self.requests.push(request.clone());
        Ok(())
    }
}

/// 要求を送り、失敗はログに残して捨てる
pub(crate) fn dispatch<S: StatusUpdateService + ?Sized>(service: &mut S, request: StatusUpdateRequest) {
    log::debug!(
        "status update: {} entries -> {}",
        request.entry_ids.len(),
        request.status
    );
    if let Err(err) = service.update_entries(&request) {
        log::warn!("status update for {:?} failed: {}", request.entry_ids, err);
    }
}
