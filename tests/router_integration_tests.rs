// router_integration_tests.rs - 入力ルーターの統合テスト

use entrynav::input::{ClickTarget, InputRouter, RawKeyEvent};
use entrynav::status::JsonLinesStatusService;
use entrynav::{Bindings, Command, EntryStatus, ListNavigator, Page, PageDom, RecordingStatusService, Settings};

const PAGE_JSON: &str = r#"{
    "items": [
        {"id": 101, "title": "first", "layout": {"top": 0, "height": 120}, "status": "unread",
         "link": "/unread/entry/101", "original_link": "https://example.org/101"},
        {"id": 102, "title": "hidden", "status": "unread"},
        {"id": 103, "title": "second", "layout": {"top": 120, "height": 120}, "status": "read"},
        {"id": 104, "title": "third", "layout": {"top": 240, "height": 120}, "status": "unread"}
    ],
    "viewport": {"scroll_offset": 0, "height": 200},
    "links": {"next": "/unread?offset=4", "previous": "/unread", "history": "/history"},
    "csrf_token": "token-1"
}"#;

fn route(router: &mut InputRouter, page: &mut Page, service: &mut RecordingStatusService, keys: &[&str]) -> Vec<Command> {
    keys.iter()
        .filter_map(|key| router.handle_key(&RawKeyEvent::new(*key), page, service))
        .collect()
}

#[test]
fn reading_session_with_default_bindings() {
    let mut router = InputRouter::new(&Bindings::default(), ListNavigator::new());
    let mut page = Page::from_json(PAGE_JSON).unwrap();
    let mut service = RecordingStatusService::new();

    let fired = route(&mut router, &mut page, &mut service, &["k", "m"]);
    assert_eq!(fired, vec![Command::Next, Command::ToggleEntryStatus]);

    // 非表示の102を飛ばして103へ
    assert_eq!(page.current_item(), Some(103));
    assert_eq!(page.item_status(101), Some(EntryStatus::Read));
    assert_eq!(service.requests().len(), 1);
    assert_eq!(service.requests()[0].entry_ids, vec![101]);
    assert_eq!(service.requests()[0].csrf_token, "token-1");

    // 103 (top=120, bottom=240) は表示領域 0..200 からはみ出すためスクロール済み
    assert_eq!(page.viewport().scroll_offset, 110);

    route(&mut router, &mut page, &mut service, &["g", "h"]);
    assert_eq!(page.location(), Some("/history"));
}

#[test]
fn mark_page_read_key_and_click_share_behaviour() {
    let mut router = InputRouter::new(&Bindings::default(), ListNavigator::new());
    let mut service = RecordingStatusService::new();

    let mut by_key = Page::from_json(PAGE_JSON).unwrap();
    route(&mut router, &mut by_key, &mut service, &["A"]);

    let mut by_click = Page::from_json(PAGE_JSON).unwrap();
    router.handle_click(&ClickTarget::MarkPageRead, &mut by_click, &mut service);

    let requests = service.take_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
    assert_eq!(requests[0].entry_ids, vec![101, 104]);
    assert_eq!(by_key.location(), Some("/unread?offset=4"));
    assert_eq!(by_click.location(), Some("/unread?offset=4"));
    // 非表示の項目は変更しない
    assert_eq!(by_key.item_status(102), Some(EntryStatus::Unread));
}

#[test]
fn custom_bindings_from_settings() {
    let settings = Settings::from_json(
        r#"{"bindings": [{"chord": "space", "command": "next"}, {"chord": "x x", "command": "mark-page-read"}]}"#,
        "inline",
    )
    .unwrap();
    let mut router = InputRouter::new(&settings.bindings(), ListNavigator::new());
    let mut page = Page::from_json(PAGE_JSON).unwrap();
    let mut service = RecordingStatusService::new();

    // 標準のキーは無効
    assert!(route(&mut router, &mut page, &mut service, &["k"]).is_empty());

    let fired = route(&mut router, &mut page, &mut service, &["space", "x", "x"]);
    assert_eq!(fired, vec![Command::Next, Command::MarkPageRead]);
}

#[test]
fn status_updates_are_journaled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status.jsonl");
    let mut service = JsonLinesStatusService::new(path.clone()).unwrap();

    let mut router = InputRouter::new(&Bindings::default(), ListNavigator::new());
    let mut page = Page::from_json(PAGE_JSON).unwrap();

    for key in ["k", "m", "A"] {
        router.handle_key(&RawKeyEvent::new(key), &mut page, &mut service);
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["payload"]["entry_ids"], serde_json::json!([101]));
    assert_eq!(records[1]["payload"]["entry_ids"], serde_json::json!([104]));
    assert_eq!(records[1]["payload"]["status"], "read");
}
