use anyhow::Context;
use entrynav::logging::Logger;
use entrynav::status::{JsonLinesStatusService, RecordingStatusService, StatusUpdateService};
use entrynav::{error, InputRouter, ListNavigator, Page, Settings, TuiApplication};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args);

    let settings = match &options.config {
        Some(path) => Settings::load(path),
        None => Settings::load_default(),
    }
    .context("failed to load settings")?;

    // TUI 描画中は stderr へ出さない
    let mut logger = Logger::new(settings.log_level).without_stderr();
    if let Some(path) = settings.log_file_path() {
        logger = logger.with_file_output(path);
    }
    logger.init();

    let page = match &options.page {
        Some(path) => Page::load(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => Page::sample(),
    };

    let service: Box<dyn StatusUpdateService> = match settings.status_log_path() {
        Some(path) => Box::new(
            JsonLinesStatusService::new(path.clone())
                .with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(RecordingStatusService::new()),
    };

    let router = InputRouter::new(
        &settings.bindings(),
        ListNavigator::with_scroll_margin(settings.scroll_margin),
    );

    log::info!("entrynav {} starting", env!("CARGO_PKG_VERSION"));
    let mut app = TuiApplication::new(page, router, service);
    app.run()?;
    Ok(())
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    page: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(next) = iter.next() {
                    options.config = Some(PathBuf::from(next));
                }
            }
            other if !other.starts_with('-') => options.page = Some(PathBuf::from(other)),
            _ => {}
        }
    }

    options
}
