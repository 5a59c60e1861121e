//! Terminal demo of the ruler picker.
//!
//! Shows a vertical height tape and a horizontal weight tape.  Drag a tape
//! with the mouse, use the wheel, or the arrow keys; the tape always comes
//! to rest on a whole value.  Run with `--print` to write the final values
//! to stdout on exit.

mod app;
mod config;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use ruler_picker::ui::{popup::HelpPopup, ruler_widget::RulerWidget, theme::Theme};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    layout::AppLayout,
    state::{AppState, PickerId},
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Snapping ruler picker demo")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/ruler-picker/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the selected values to stdout on exit.
    #[arg(long)]
    print: bool,

    /// Override the event-loop tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());

    for (id, area) in [
        (PickerId::Height, layout.height_area),
        (PickerId::Weight, layout.weight_area),
    ] {
        let focused = state.focus == id;
        let block = Block::default()
            .title(format!(" {} ", state.spec(id).title))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style(focused));
        let widget = RulerWidget::new().block(block).focused(focused);
        frame.render_stateful_widget(widget, area, state.ruler_mut(id));
    }

    let readout = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(format!("  {}", state.report()), Theme::readout_style())),
        Line::raw(""),
        Line::from(Span::styled(
            "  Drag a tape, scroll over it, or use the keys below.",
            Theme::hint_style(),
        )),
    ]);
    frame.render_widget(readout, layout.readout_area);

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    if state.show_help {
        let rows = state.config.help_rows();
        frame.render_widget(HelpPopup { rows: &rows }, frame.area());
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing stays silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut user_config = config::AppConfig::load(cli.config.as_deref())?;
    if let Some(ms) = cli.tick_ms {
        user_config.tick_rate_ms = ms.clamp(10, 250);
    }
    let tick_rate = Duration::from_millis(user_config.tick_rate_ms);

    // ── async channel ─────────────────────────────────────────
    // Terminal events and picker settles share one queue.
    let (tx, mut events) = tokio::sync::mpsc::unbounded_channel::<AppEvent>();
    let mut state = AppState::new(user_config, tx.clone())?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    spawn_event_reader(tick_rate, tx);

    // ── event loop ────────────────────────────────────────────
    loop {
        // Draw first: rendering is the layout pass that sizes each tape.
        terminal.draw(|frame| draw(frame, &mut state))?;

        // Next turn after layout: apply deferred scrolls and advance any
        // deceleration by one frame.
        state.advance();

        if let Some(event) = events.recv().await {
            match event {
                AppEvent::Key(k) => handler::handle_key(&mut state, k),
                AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                AppEvent::Settled { picker, index } => {
                    handler::handle_settled(&mut state, picker, index);
                }
                AppEvent::Resize | AppEvent::Tick => {}
            }
        } else {
            break;
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
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if cli.print {
        println!("weight={}", state.weight.picker.highlighted_value());
        println!("height={}", state.height.picker.highlighted_value());
    }

    Ok(())
}
