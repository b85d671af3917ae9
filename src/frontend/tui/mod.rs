//! 端末フロントエンド
//!
//! ページの項目一覧を描画し、crossterm のキー入力を入力ルーターへ流す。
//! 1行を文書座標の1単位として扱う。

use crate::error::{EntryNavError, Result, UiError};
use crate::input::{Command, InputRouter, RawKeyEvent};
use crate::page::{Item, Page, PageDom};
use crate::status::{EntryStatus, StatusUpdateService};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::stdout;
use std::time::Duration;

pub struct TuiApplication {
    page: Page,
    router: InputRouter,
    service: Box<dyn StatusUpdateService>,
    last_command: Option<Command>,
    running: bool,
}

impl TuiApplication {
    pub fn new(page: Page, router: InputRouter, service: Box<dyn StatusUpdateService>) -> Self {
        Self {
            page,
            router,
            service,
            last_command: None,
            running: true,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;
        terminal.hide_cursor().map_err(|err| terminal_error("hide cursor", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(Duration::from_millis(16)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.handle_key_event(key_event),
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
        }

        Ok(())
    }

    /// 端末のキーイベントを処理する
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        let quit = matches!(key_event.code, KeyCode::Char('q'))
            || (key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL));
        if quit {
            self.running = false;
            return;
        }

        if let Ok(raw) = RawKeyEvent::try_from(key_event) {
            if let Some(command) = self.router.handle_key(&raw, &mut self.page, self.service.as_mut()) {
                self.last_command = Some(command);
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 2 {
            return;
        }

        let list_area = Rect::new(area.x, area.y, area.width, area.height - 1);
        let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

        // 表示領域の高さを端末サイズに合わせる
        self.page.viewport.height = i64::from(list_area.height);

        if self.page.has_item_list() {
            self.draw_items(frame, list_area);
        } else {
            let text = match self.page.entry_original_link() {
                Some(url) => format!("Entry page ({})", url),
                None => "Entry page".to_string(),
            };
            frame.render_widget(Paragraph::new(text), list_area);
        }

        frame.render_widget(Paragraph::new(self.status_line()), status_area);
    }

    fn draw_items(&self, frame: &mut Frame, area: Rect) {
        let viewport = self.page.viewport();
        let bottom = viewport.bottom();

        for item in self.page.items().iter().filter(|item| item.is_visible()) {
            let Some(layout) = item.layout else {
                continue;
            };
            // 完全に表示領域に収まる項目だけを描く
            if layout.top < viewport.scroll_offset || layout.bottom() > bottom {
                continue;
            }

            let y = area.y + (layout.top - viewport.scroll_offset) as u16;
            let rect = Rect::new(area.x, y, area.width, layout.height as u16);
            frame.render_widget(item_widget(item), rect);
        }
    }

    fn status_line(&self) -> Line<'static> {
        let mut spans = Vec::new();

        let pending: Vec<&str> = self
            .router
            .matcher()
            .history()
            .keys()
            .iter()
            .map(|key| key.as_str())
            .collect();
        if !pending.is_empty() {
            spans.push(Span::styled(
                format!("{}- ", pending.join(" ")),
                Style::default().fg(Color::Cyan),
            ));
        }

        if let Some(command) = self.last_command {
            spans.push(Span::raw(format!("[{}] ", command)));
        }
        if let Some(location) = self.page.location() {
            spans.push(Span::raw(format!("-> {} ", location)));
        }
        if let Some(tab) = self.page.opened_tabs().last() {
            spans.push(Span::raw(format!("tab: {} ", tab)));
        }
        if let Some(position) = scroll_position(&self.page) {
            spans.push(Span::raw(format!("{} ", position)));
        }
        spans.push(Span::styled("q: quit", Style::default().fg(Color::DarkGray)));

        Line::from(spans)
    }
}

/// スクロール位置の表示（"Top" / "Bot" / "NN%"）。文書が表示領域に収まるなら `None`
fn scroll_position(page: &Page) -> Option<String> {
    let viewport = page.viewport();
    let scrollable = page.document_height() - viewport.height;
    if scrollable <= 0 {
        return None;
    }

    let position = if viewport.scroll_offset <= 0 {
        "Top".to_string()
    } else if viewport.scroll_offset >= scrollable {
        "Bot".to_string()
    } else {
        format!("{}%", viewport.scroll_offset * 100 / scrollable)
    };
    Some(position)
}

fn item_widget(item: &Item) -> Paragraph<'_> {
    let mut style = Style::default();
    if item.status == Some(EntryStatus::Read) {
        style = style.fg(Color::DarkGray);
    }

    let mut border_style = Style::default();
    if item.current {
        border_style = border_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }

    let marker = match item.status {
        Some(EntryStatus::Read) => "read",
        Some(EntryStatus::Unread) => "unread",
        None => "-",
    };

    Paragraph::new(Line::from(vec![
        Span::styled(item.title.as_str(), style),
        Span::styled(format!("  ({})", marker), Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(border_style))
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(operation: &str, err: impl std::fmt::Display) -> EntryNavError {
    EntryNavError::Ui(UiError::Terminal {
        operation: operation.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bindings;
    use crate::navigation::ListNavigator;
    use crate::status::RecordingStatusService;

    fn app() -> TuiApplication {
        TuiApplication::new(
            Page::sample(),
            InputRouter::new(&Bindings::default(), ListNavigator::new()),
            Box::new(RecordingStatusService::new()),
        )
    }

    fn press(app: &mut TuiApplication, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrow_keys_move_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.page().current_item(), Some(2));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.page().current_item(), Some(1));
    }

    #[test]
    fn toggle_marks_entry_read() {
        let mut app = app();
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.page().item_status(1), Some(EntryStatus::Read));
        assert_eq!(app.page().current_item(), Some(2));
    }

    #[test]
    fn q_quits_without_routing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.is_running());
        assert_eq!(app.page().current_item(), None);
    }

    #[test]
    fn renders_into_test_backend() {
        let mut app = app();
        press(&mut app, KeyCode::Char('k'));

        let backend = ratatui::backend::TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Entry #1"));
        assert!(text.contains("[next]"));
        assert_eq!(app.page().viewport().height, 11);
    }

    #[test]
    fn scroll_position_follows_viewport() {
        use crate::navigation::Viewport;

        // 12項目 x 高さ3 = 36行
        let page = Page::sample().with_viewport(Viewport::new(0, 20));
        assert_eq!(scroll_position(&page).as_deref(), Some("Top"));

        let page = page.with_viewport(Viewport::new(8, 20));
        assert_eq!(scroll_position(&page).as_deref(), Some("50%"));

        let page = page.with_viewport(Viewport::new(16, 20));
        assert_eq!(scroll_position(&page).as_deref(), Some("Bot"));

        let page = page.with_viewport(Viewport::new(0, 40));
        assert_eq!(scroll_position(&page), None);
    }
}
