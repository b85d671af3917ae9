use super::{StatusUpdateRequest, StatusUpdateService};
use crate::error::StatusError;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// 状態更新要求を JSON Lines 形式でファイルへ追記するサービス
///
/// 実際の送信の代わりに使う。1要求につき1行。
#[derive(Debug, Clone)]
pub struct JsonLinesStatusService {
    path: PathBuf,
}

impl JsonLinesStatusService {
    pub fn new(path: PathBuf) -> io::Result<Self> {
        ensure_parent_dir(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatusUpdateService for JsonLinesStatusService {
    fn update_entries(&mut self, request: &StatusUpdateRequest) -> Result<(), StatusError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let record = serde_json::json!({
            "tag": "entries-status",
            "ts": timestamp_ms(),
            "has_token": !request.csrf_token.is_empty(),
            "payload": request,
        });
        let line = serde_json::to_string(&record)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::EntryStatus;

    #[test]
    fn appends_one_line_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("status.jsonl");
        let mut service = JsonLinesStatusService::new(path.clone()).unwrap();

        service
            .update_entries(&StatusUpdateRequest::new(vec![1, 2], EntryStatus::Read, "tok"))
            .unwrap();
        service
            .update_entries(&StatusUpdateRequest::new(vec![5], EntryStatus::Unread, ""))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["payload"]["entry_ids"], serde_json::json!([1, 2]));
        assert_eq!(lines[0]["payload"]["status"], "read");
        assert_eq!(lines[0]["has_token"], true);
        assert_eq!(lines[1]["payload"]["status"], "unread");
        assert_eq!(lines[1]["has_token"], false);
    }
}
