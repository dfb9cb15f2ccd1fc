//! A draggable bottom-sheet TUI.
//!
//! A sheet peeks from the bottom of the screen.  Drag its handle with the
//! mouse: pointer samples are averaged over a short accumulation window,
//! clamped to the sheet's travel range, and on release the sheet snaps to
//! extended or collapsed depending on how far it was pulled.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::ui::{layout::AppLayout, popup::HelpPopup, sheet_widget::SheetWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Draggable bottom-sheet demo")]
struct Cli {
    /// Share of the screen an extended sheet covers, in percent (20–90).
    #[arg(long)]
    height: Option<u16>,

    /// Pointer-sample accumulation window in milliseconds (16–1000).
    #[arg(long)]
    accumulation: Option<u64>,

    /// Offset ratio past which a released sheet snaps open (0.05–0.95).
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of placeholder paragraphs inside the sheet.
    #[arg(long, default_value_t = 2)]
    paragraphs: usize,
}

/// Frame cadence — also bounds how late an averager flush can run.
const TICK_RATE: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // ── configuration (CLI flags override the config file) ────
    let mut config = AppConfig::load();
    if let Some(pct) = cli.height {
        config.sheet_height_pct = pct.clamp(20, 90);
    }
    if let Some(ms) = cli.accumulation {
        config.accumulation_ms = ms.clamp(16, 1000);
    }
    if let Some(ratio) = cli.threshold {
        config.snap_threshold = ratio.clamp(0.05, 0.95);
    }

    let paragraphs: Vec<String> = (0..cli.paragraphs.max(1))
        .map(|i| lipsum::lipsum(40 + (i % 3) * 25))
        .collect();

    let mut state = AppState::new(config, paragraphs);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(
        stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // ── event loop ────────────────────────────────────────────
    let mut events = spawn_event_reader(TICK_RATE);

    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            draw(frame, &mut state);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };

        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, Instant::now()),
            AppEvent::FocusLost => handler::handle_pointer_cancel(&mut state),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => handler::handle_tick(&mut state, Instant::now()),
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    Ok(())
}

// ───────────────────────────────────────── rendering ─────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());

    // ── page behind the sheet ──────────────────────────────────
    let page_block = Block::default()
        .title(" snap-sheet ")
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());

    let page = Paragraph::new(vec![
        Line::raw(""),
        Line::raw("A bottom sheet is resting at the foot of this page."),
        Line::raw(""),
        Line::raw("Grab its handle with the mouse and pull it up. Let go"),
        Line::raw("past the halfway mark and it snaps open; short of it,"),
        Line::raw("the sheet slides back down."),
    ])
    .style(Theme::page_text_style())
    .wrap(Wrap { trim: false })
    .block(page_block);

    frame.render_widget(page, layout.content_area);

    // ── the sheet ──────────────────────────────────────────────
    let geom = state.geometry();
    let sheet_rect = geom.sheet_rect(state.animator.offset_rows());
    let sheet = SheetWidget::new(&state.paragraphs).grabbed(state.sampler.is_active());
    frame.render_stateful_widget(sheet, sheet_rect, &mut state.sheet_state);

    // ── status bar ─────────────────────────────────────────────
    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    // ── overlays ───────────────────────────────────────────────
    if state.active_view == ActiveView::Help {
        frame.render_widget(
            HelpPopup {
                config: &state.config,
            },
            frame.area(),
        );
    }
}
