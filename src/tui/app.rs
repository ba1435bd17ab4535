//! TUI application main loop.

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{info, warn};

use crate::error::{JournalError, Result};
use crate::model::Mode;

use super::components::{centered_rect, entry_list_item, entry_view_lines, StatusBar};
use super::events::{Event, EventHandler, KeyBindings};
use super::state::{AppState, Focus};
use super::theme::Theme;

/// Width of the entry list column.
const SIDEBAR_WIDTH: u16 = 34;

/// Placeholder shown in an empty editor.
const PLACEHOLDER: &str = "Write your thoughts...";

/// Run the TUI until the user quits.
pub fn run(app: &mut AppState, tick_rate: Duration) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        JournalError::io(
            "Cannot launch TUI - no interactive terminal available. \
             The TUI requires a terminal with keyboard input support",
            e,
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| JournalError::io("Failed to enter alternate screen", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JournalError::io("Failed to create terminal", e))?;

    info!(entries = app.journal.entries().len(), "tui started");
    let result = run_loop(&mut terminal, app, tick_rate);

    // Restore the terminal even when the loop failed
    let restored = [
        disable_raw_mode().map_err(|e| JournalError::io("Failed to disable raw mode", e)),
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| JournalError::io("Failed to leave alternate screen", e)),
        terminal
            .show_cursor()
            .map_err(|e| JournalError::io("Failed to show cursor", e)),
    ]
    .into_iter()
    .collect::<Result<Vec<()>>>()
    .map(|_| ());

    settle(result, restored)
}

/// Combine the loop outcome with the terminal restore outcome.
///
/// A loop error wins; a restore failure on top of it is only logged.
fn settle(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            warn!(error = %restore_err, "could not restore terminal");
            Err(e)
        }
        (result, restored) => result.and(restored),
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> Result<()> {
    let events = EventHandler::new(tick_rate);
    let bindings = KeyBindings::default();

    while !app.should_quit {
        terminal
            .draw(|f| draw_ui(f, app))
            .map_err(|e| JournalError::io("Failed to draw TUI", e))?;

        match events.next() {
            Ok(Event::Key(key)) => {
                app.status_message = None;
                if let Some(action) = bindings.resolve(&key, app.key_context()) {
                    app.apply(action);
                }
            }
            Ok(Event::Tick | Event::Resize(_, _)) => {}
            Err(_) => {
                return Err(JournalError::TuiError {
                    message: "terminal event channel closed".to_string(),
                })
            }
        }
    }

    Ok(())
}

/// Draw the whole screen.
pub fn draw_ui(f: &mut Frame, app: &AppState) {
    let theme = app.theme();
    let area = f.area();
    f.render_widget(Block::default().style(theme.base_style()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    if app.sidebar_visible(area.width) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[0]);
        draw_sidebar(f, app, &theme, columns[0]);
        draw_main(f, app, &theme, columns[1]);
    } else {
        draw_main(f, app, &theme, rows[0]);
    }

    draw_status_bar(f, app, &theme, rows[1]);

    if app.show_help {
        draw_help_overlay(f, &theme);
    }
}

fn draw_sidebar(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let selected_id = app.journal.selected().map(|e| e.id);
    let sidebar_focused = app.focus == Focus::Sidebar;

    let items: Vec<ListItem> = if app.journal.entries().is_empty() {
        vec![ListItem::new(Span::styled("No entries yet", theme.muted_style()))]
    } else {
        app.journal
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let highlighted = (sidebar_focused && i == app.list_cursor)
                    || (!sidebar_focused && Some(entry.id) == selected_id);
                entry_list_item(entry, theme, app.preview_chars, highlighted)
            })
            .collect()
    };

    // Keep the cursor row on screen; each item is two lines tall
    let visible_items = (area.height.saturating_sub(2) / 2).max(1) as usize;
    let skip = (app.list_cursor + 1).saturating_sub(visible_items);
    let items: Vec<ListItem> = items.into_iter().skip(skip).collect();

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(" Entries ", theme.heading_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(sidebar_focused)),
    );
    f.render_widget(list, area);
}

fn draw_main(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    match (app.journal.mode(), app.journal.selected()) {
        (Mode::Viewing(_), Some(entry)) => {
            let paragraph = Paragraph::new(entry_view_lines(entry, theme))
                .block(
                    Block::default()
                        .title(Span::styled(" Entry ", theme.heading_style()))
                        .borders(Borders::ALL)
                        .border_style(theme.border_style(app.focus == Focus::Main)),
                )
                .wrap(Wrap { trim: false })
                .scroll((app.scroll, 0));
            f.render_widget(paragraph, area);
        }
        _ => draw_editor(f, app, theme, area),
    }
}

fn draw_editor(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let mut lines = Vec::new();
    if let Some(prompt) = app.journal.current_prompt() {
        lines.push(Line::from(Span::styled(prompt.to_string(), theme.prompt_style())));
        lines.push(Line::from(""));
    }

    let draft = app.journal.draft();
    let focused = app.focus == Focus::Main;
    if draft.is_empty() {
        lines.push(Line::from(Span::styled(PLACEHOLDER, theme.muted_style())));
    } else {
        // split('\n') keeps a trailing empty line so the cursor follows Enter
        lines.extend(draft.split('\n').map(|l| Line::from(l.to_string())));
    }
    if focused {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(
                "▏",
                theme.heading_style().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(" New Entry ", theme.heading_style()))
                .title_bottom(Line::from(Span::styled(
                    " ^S save  ^P prompt  ^N new  ^T theme  F1 help ",
                    theme.muted_style(),
                )))
                .borders(Borders::ALL)
                .border_style(theme.border_style(focused)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let mut left = vec![
        Span::styled(format!(" {} ", crate::NAME), theme.heading_style()),
        Span::raw("│ "),
        Span::raw(app.journal.mode().to_string().to_uppercase()),
        Span::raw(" │ "),
    ];
    if let Some(msg) = &app.status_message {
        left.push(Span::styled(msg.clone(), theme.success_style()));
    } else if !app.is_persistent() {
        left.push(Span::styled(
            "storage unavailable: changes last for this session only",
            theme.warning_style(),
        ));
    }

    let count = app.journal.entries().len();
    let right = vec![Span::styled(
        format!(
            "{count} entr{} │ {} ",
            if count == 1 { "y" } else { "ies" },
            theme.name
        ),
        theme.muted_style(),
    )];

    StatusBar::new(theme.selection_style().remove_modifier(Modifier::BOLD))
        .left(left)
        .right(right)
        .render(f, area);
}

fn draw_help_overlay(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 70, f.area());

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.heading_style())),
        Line::from(""),
        Line::from("Writing:"),
        Line::from("  Ctrl-S    Save entry"),
        Line::from("  Ctrl-N    New entry"),
        Line::from("  Ctrl-P    Get a writing prompt"),
        Line::from("  Ctrl-X    Remove the prompt"),
        Line::from(""),
        Line::from("Browsing:"),
        Line::from("  Tab       Switch between list and entry"),
        Line::from("  Ctrl-B    Open/close entry list"),
        Line::from("  j/↓ k/↑   Move in list, scroll entry"),
        Line::from("  Enter     Open entry"),
        Line::from("  Esc       Close list"),
        Line::from(""),
        Line::from("General:"),
        Line::from("  Ctrl-T    Toggle dark/light theme"),
        Line::from("  F1        Show this help"),
        Line::from("  Ctrl-Q    Quit"),
    ];

    let paragraph = Paragraph::new(help_text)
        .style(theme.base_style())
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(theme.border_style(true)),
        );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
