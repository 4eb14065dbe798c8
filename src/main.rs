//! FastClock Shell - terminal front end for the FastClock web app
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - presentation state machine processing events
//! - Network Layer (Tokio) - reachability polling and the page fetch

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use fastclock_shell::constants::{APP_NAME, APP_VERSION};
use fastclock_shell::messages::ui_events::key_to_ui_event;
use fastclock_shell::ui::{centered_rect, page_lines, spinner_frame, status_color};
use fastclock_shell::{
    AppActor, NetworkActor, NetworkCommand, NetworkResponse, RenderState, Screen, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "fastclock-shell.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut tick: usize = 0;

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state, tick))?;
        tick = tick.wrapping_add(1);

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.screen, current_state.show_help) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, tick: usize) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match state.screen {
        Screen::Error => draw_error_view(f, chunks[0]),
        Screen::Loading => draw_splash(f, chunks[0], tick),
        Screen::Ready => draw_content(f, state, chunks[0]),
    }

    draw_status_bar(f, state, chunks[1]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

/// The splash overlay shown until the page is considered ready
fn draw_splash(f: &mut Frame, area: Rect, tick: usize) {
    let splash = centered_rect(50, 60, area);

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "╭───────────╮",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            "│    12     │",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            "│ 9    •──3 │",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            "│     6     │",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            "╰───────────╯",
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            APP_NAME,
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!("v{}", APP_VERSION),
            Style::default().fg(Color::DarkGray),
        )),
        Line::raw(""),
    ];
    lines.push(Line::from(vec![
        Span::styled(spinner_frame(tick), Style::default().fg(Color::Cyan)),
        Span::raw(" Loading..."),
    ]));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, splash);
}

/// Full-screen message with a manual retry action
fn draw_error_view(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "No Internet Connection",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" to retry"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(paragraph, popup);
}

/// The content pane showing the fetched page
fn draw_content(f: &mut Frame, state: &RenderState, area: Rect) {
    let status_text = match state.content.status_code {
        Some(code) => Span::styled(
            format!(" {} ", code),
            Style::default().fg(status_color(code)).bold(),
        ),
        None => Span::raw(format!(" {} ", APP_NAME)),
    };

    let time_text = if state.content.time_ms > 0 {
        format!(" {}ms ", state.content.time_ms)
    } else {
        String::new()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(status_text)
        .title_top(Line::from(format!(" {} ", state.url)).right_aligned())
        .title_bottom(Line::from(time_text).right_aligned());

    let page = Paragraph::new(page_lines(&state.content.body))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(page, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if !state.connected {
        " Offline | r:retry | ?:help | q:quit "
    } else if state.is_fetching {
        " Loading... | ?:help | q:quit "
    } else {
        " ↑/↓:scroll | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);

    let help_text = r#"
 FASTCLOCK SHELL - Keyboard Shortcuts

 GENERAL
   q / Ctrl+C         Quit
   ?                  Toggle this help

 PAGE
   ↑ / ↓              Scroll the page

 OFFLINE
   r / Enter          Retry the connection

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
